//! Expression evaluation.

use weave_ir::stack::ensure_sufficient_stack;
use weave_ir::{ScopeFrame, Value};
use weave_parse::Expr;

use crate::error::RenderError;
use crate::filters;

/// Outcome of evaluating an expression.
///
/// Undefined is not an error at this level: a directive whose source is
/// undefined expands to nothing, and a lenient interpolation renders it as
/// an empty string. Callers decide.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Value(Value),
    /// A name, attribute or index did not resolve. `path` is the expression
    /// text that first came up empty (e.g. `data.items`).
    Undefined { path: String },
}

impl Resolved {
    /// The value, if defined.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Undefined { .. } => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Resolved::Undefined { .. })
    }

    fn undefined(expr: &Expr) -> Self {
        Resolved::Undefined {
            path: expr.to_string(),
        }
    }
}

/// Evaluate `expr` against `frame`, innermost binding first.
///
/// Any undefined read makes the whole result undefined, except inside a
/// `default(...)` filter, which exists to catch it.
pub fn eval(expr: &Expr, frame: &ScopeFrame) -> Result<Resolved, RenderError> {
    ensure_sufficient_stack(|| match expr {
        Expr::Literal(value) => Ok(Resolved::Value(value.clone())),

        Expr::Var(name) => Ok(frame
            .lookup(name.as_str())
            .cloned()
            .map_or_else(|| Resolved::undefined(expr), Resolved::Value)),

        Expr::Attr { base, name } => Ok(match eval(base, frame)? {
            Resolved::Value(value) => value
                .attr(name.as_str())
                .cloned()
                .map_or_else(|| Resolved::undefined(expr), Resolved::Value),
            undefined @ Resolved::Undefined { .. } => undefined,
        }),

        Expr::Index { base, index } => {
            let base = eval(base, frame)?;
            let index = eval(index, frame)?;
            Ok(match (base, index) {
                (Resolved::Value(base), Resolved::Value(index)) => base
                    .index(&index)
                    .cloned()
                    .map_or_else(|| Resolved::undefined(expr), Resolved::Value),
                (undefined @ Resolved::Undefined { .. }, _)
                | (_, undefined @ Resolved::Undefined { .. }) => undefined,
            })
        }

        Expr::List(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match eval(item, frame)? {
                    Resolved::Value(value) => values.push(value),
                    undefined @ Resolved::Undefined { .. } => return Ok(undefined),
                }
            }
            Ok(Resolved::Value(Value::from(values)))
        }

        Expr::Filter { base, name, args } => {
            let input = eval(base, frame)?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                match eval(arg, frame)? {
                    Resolved::Value(value) => values.push(value),
                    undefined @ Resolved::Undefined { .. } => return Ok(undefined),
                }
            }
            filters::apply(name.as_str(), input, &values)
        }
    })
}
