//! Static check that names only read loop variables bound on their own
//! ancestor path.
//!
//! A directive's source is read in the enclosing scope; its prefix, body and
//! suffix are read with its own variable bound. A plain name is read in the
//! enclosing scope. A loop variable read where no enclosing directive binds
//! it is an [`OffPathRead`].
//!
//! Names are not globally unique, so an off-path read may still resolve
//! against the top-level data. [`check_scoping`] only rejects the reads that
//! the data frame cannot answer either; names no directive binds are never
//! checked.

use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use weave_ir::stack::ensure_sufficient_stack;
use weave_ir::{Name, ScopeFrame};

use crate::error::TreeError;
use crate::node::ExpansionNode;

type Bound = SmallVec<[Name; 8]>;

/// A node reading a loop variable that only another branch binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffPathRead {
    /// Template-relative path of the reading node.
    pub path: String,
    pub name: Name,
}

impl fmt::Display for OffPathRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` reads `{}`, which is only bound by a loop on another branch",
            self.path, self.name
        )
    }
}

impl From<OffPathRead> for TreeError {
    fn from(read: OffPathRead) -> Self {
        TreeError::ForeignBinding {
            path: read.path,
            name: read.name,
        }
    }
}

/// Every off-path read under `root`, in depth-first order, each name once
/// per node.
#[tracing::instrument(level = "debug", skip_all)]
pub fn off_path_reads(root: &ExpansionNode) -> Vec<OffPathRead> {
    let mut loop_vars = FxHashSet::default();
    collect_loop_vars(root, &mut loop_vars);

    let mut reads = Vec::new();
    if loop_vars.is_empty() {
        return reads;
    }
    let mut bound = Bound::new();
    for child in &root.children {
        visit(child, &loop_vars, &mut bound, &mut reads);
    }
    reads
}

/// Fail on the first off-path read under `root` that `data` does not bind.
pub fn check_scoping(root: &ExpansionNode, data: &ScopeFrame) -> Result<(), TreeError> {
    match off_path_reads(root)
        .into_iter()
        .find(|read| data.lookup(read.name.as_str()).is_none())
    {
        Some(read) => Err(read.into()),
        None => Ok(()),
    }
}

fn collect_loop_vars(node: &ExpansionNode, out: &mut FxHashSet<Name>) {
    ensure_sufficient_stack(|| {
        if let Some(directive) = &node.directive {
            out.insert(directive.variable.clone());
        }
        for child in &node.children {
            collect_loop_vars(child, out);
        }
    });
}

fn visit(
    node: &ExpansionNode,
    loop_vars: &FxHashSet<Name>,
    bound: &mut Bound,
    reads: &mut Vec<OffPathRead>,
) {
    ensure_sufficient_stack(|| {
        let pushed = match &node.directive {
            Some(directive) => {
                record(node, directive.source_names(), loop_vars, bound, reads);
                bound.push(directive.variable.clone());
                record(node, directive.segment_names(), loop_vars, bound, reads);
                true
            }
            None => {
                let names = weave_parse::parse_template(&node.name)
                    .map(|template| template.free_names())
                    .unwrap_or_default();
                record(node, names, loop_vars, bound, reads);
                false
            }
        };

        for child in &node.children {
            visit(child, loop_vars, bound, reads);
        }

        if pushed {
            bound.pop();
        }
    });
}

fn record(
    node: &ExpansionNode,
    names: Vec<Name>,
    loop_vars: &FxHashSet<Name>,
    bound: &Bound,
    reads: &mut Vec<OffPathRead>,
) {
    let path = node.source.display().to_string();
    for name in names {
        if !loop_vars.contains(&name) || bound.contains(&name) {
            continue;
        }
        let seen = reads
            .iter()
            .rev()
            .take_while(|read| read.path == path)
            .any(|read| read.name == name);
        if !seen {
            reads.push(OffPathRead {
                path: path.clone(),
                name,
            });
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
