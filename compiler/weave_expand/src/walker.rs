//! Reading a template directory into an [`ExpansionNode`] tree.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};
use weave_ir::stack::ensure_sufficient_stack;

use crate::error::TreeError;
use crate::node::{ExpansionNode, NodeKind};

/// Builds the annotated tree for one template directory.
///
/// `is_included` receives each entry's path relative to the template root;
/// an excluded directory is skipped with everything below it. Directive
/// sources are never evaluated here.
pub struct TreeWalker<F> {
    is_included: F,
}

impl<F> TreeWalker<F>
where
    F: Fn(&Path) -> bool,
{
    pub fn new(is_included: F) -> Self {
        TreeWalker { is_included }
    }

    /// Walk `root` with `is_included` as the entry filter.
    pub fn build(root: &Path, is_included: F) -> Result<ExpansionNode, TreeError> {
        TreeWalker::new(is_included).walk(root)
    }

    /// Walk `root` depth-first, children in byte-wise name order.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
    pub fn walk(&self, root: &Path) -> Result<ExpansionNode, TreeError> {
        let children = self.walk_dir(root, Path::new(""))?;
        let tree = ExpansionNode::root(children);
        debug!(entries = tree.children.len(), "template tree built");
        Ok(tree)
    }

    fn walk_dir(&self, root: &Path, relative: &Path) -> Result<Vec<ExpansionNode>, TreeError> {
        ensure_sufficient_stack(|| {
            let dir = root.join(relative);
            let io_error = |source| TreeError::Io {
                path: dir.display().to_string(),
                source,
            };

            let mut entries = Vec::new();
            for entry in fs::read_dir(&dir).map_err(io_error)? {
                let entry = entry.map_err(io_error)?;
                let path = relative.join(entry.file_name());
                let Ok(name) = entry.file_name().into_string() else {
                    return Err(TreeError::NonUtf8Name {
                        path: path.display().to_string(),
                    });
                };
                entries.push((name, path));
            }
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            let mut nodes = Vec::with_capacity(entries.len());
            for (name, path) in entries {
                if !(self.is_included)(&path) {
                    trace!(path = %path.display(), "excluded");
                    continue;
                }

                // Follows symlinks, so a linked directory is walked like a real one.
                let metadata = fs::metadata(root.join(&path)).map_err(|source| TreeError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                let kind = if metadata.is_dir() {
                    NodeKind::Directory
                } else {
                    NodeKind::File
                };

                let mut node =
                    ExpansionNode::new(name, kind, path.clone()).map_err(|source| {
                        TreeError::Parse {
                            path: path.display().to_string(),
                            source,
                        }
                    })?;
                if kind == NodeKind::Directory {
                    node.children = self.walk_dir(root, &path)?;
                }
                nodes.push(node);
            }
            Ok(nodes)
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
