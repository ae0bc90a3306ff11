//! Expression AST.

use std::fmt;

use weave_ir::{Name, Value};

/// A parsed expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Literal value (`"a"`, `1`, `2.5`, `true`, `none`).
    Literal(Value),
    /// Variable reference, resolved through the scope chain.
    Var(Name),
    /// `base.name`
    Attr { base: Box<Expr>, name: Name },
    /// `base[index]`
    Index { base: Box<Expr>, index: Box<Expr> },
    /// `[a, b, c]`
    List(Vec<Expr>),
    /// `base | name(args...)`
    Filter {
        base: Box<Expr>,
        name: Name,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Collect every variable name this expression reads, in source order
    /// (duplicates included).
    pub fn free_names(&self, out: &mut Vec<Name>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Var(name) => out.push(name.clone()),
            Expr::Attr { base, .. } => base.free_names(out),
            Expr::Index { base, index } => {
                base.free_names(out);
                index.free_names(out);
            }
            Expr::List(items) => {
                for item in items {
                    item.free_names(out);
                }
            }
            Expr::Filter { base, args, .. } => {
                base.free_names(out);
                for arg in args {
                    arg.free_names(out);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Value::Str(s)) => write!(f, "{:?}", &**s),
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Attr { base, name } => write!(f, "{base}.{name}"),
            Expr::Index { base, index } => write!(f, "{base}[{index}]"),
            Expr::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Expr::Filter { base, name, args } => {
                write!(f, "{base} | {name}")?;
                if !args.is_empty() {
                    f.write_str("(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}
