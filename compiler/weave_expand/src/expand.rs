//! Cartesian expansion of an annotated tree into concrete paths.
//!
//! # Algorithm
//!
//! Expansion is a depth-first walk driven by an explicit task stack, so it
//! can be consumed lazily and never recurses:
//!
//! - A node without a directive renders its name against the enclosing
//!   frame and passes that frame to its children unchanged.
//! - A node with a directive evaluates the source against the enclosing
//!   frame. Each element is bound in a fresh child frame, which renders the
//!   segment and is handed to the children. Frames are never mutated, so
//!   siblings cannot see each other's bindings.
//!
//! Branches come out outer-major: every descendant of `items[0]` precedes
//! the branch for `items[1]`. Two branches may resolve to the same path;
//! both are emitted in order and the writer keeps the later one.

use std::fmt;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace, warn};
use weave_eval::{eval, Render, Resolved};
use weave_ir::{ScopeFrame, Value};
use weave_parse::Directive;

use crate::error::ExpandError;
use crate::node::{ExpansionNode, NodeKind};

/// Default cap on the number of emitted branches.
pub const DEFAULT_MAX_BRANCHES: usize = 10_000;

/// One concrete output entry.
#[derive(Clone)]
pub struct Branch<'a> {
    /// Rendered path segments from the output root.
    pub segments: Vec<String>,
    pub kind: NodeKind,
    /// Frame that rendered the last segment. Files render their contents
    /// with it too.
    pub frame: ScopeFrame,
    /// Template-relative path of the node this branch came from.
    pub source: &'a Path,
}

impl Branch<'_> {
    /// The output path relative to the destination root.
    pub fn path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

impl fmt::Debug for Branch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("segments", &self.segments)
            .field("kind", &self.kind)
            .field("bindings", &self.frame.visible())
            .finish_non_exhaustive()
    }
}

/// What a directive source evaluated to.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceOutcome {
    /// A list, possibly empty. One branch per element.
    Items(Arc<[Value]>),
    /// The source read an undefined name: the node and its subtree produce
    /// nothing.
    Empty,
}

impl SourceOutcome {
    /// Evaluate `directive`'s source against the enclosing `frame`.
    ///
    /// `path` names the node in diagnostics.
    pub fn resolve(
        directive: &Directive,
        frame: &ScopeFrame,
        path: &Path,
    ) -> Result<SourceOutcome, ExpandError> {
        let resolved = eval(&directive.source, frame).map_err(|source| ExpandError::Render {
            path: path.display().to_string(),
            source,
        })?;
        match resolved {
            Resolved::Undefined { path: undefined } => {
                warn!(
                    path = %path.display(),
                    expression = %directive.source_text,
                    undefined = %undefined,
                    "loop source is undefined, skipping subtree"
                );
                Ok(SourceOutcome::Empty)
            }
            Resolved::Value(Value::List(items)) => Ok(SourceOutcome::Items(items)),
            Resolved::Value(other) => Err(ExpandError::NotIterable {
                path: path.display().to_string(),
                expression: directive.source_text.clone(),
                type_name: other.type_name(),
            }),
        }
    }
}

enum Task<'a> {
    /// Evaluate `node`'s directive (if any) under `frame`.
    Visit {
        node: &'a ExpansionNode,
        frame: ScopeFrame,
        parent: Arc<[String]>,
    },
    /// Render `node`'s segment with `frame` already holding its binding.
    Emit {
        node: &'a ExpansionNode,
        frame: ScopeFrame,
        parent: Arc<[String]>,
    },
}

/// Lazy iterator over the branches of a tree.
///
/// Stops after the first error.
pub struct Expansion<'a> {
    stack: Vec<Task<'a>>,
    renderer: &'a dyn Render,
    max_branches: usize,
    emitted: usize,
}

/// Expand every child of `root` against `frame`.
///
/// `root` itself contributes no segment; it stands for the template
/// directory.
pub fn expand<'a>(
    root: &'a ExpansionNode,
    frame: ScopeFrame,
    renderer: &'a dyn Render,
) -> Expansion<'a> {
    let parent: Arc<[String]> = Arc::from(Vec::new());
    let stack = root
        .children
        .iter()
        .rev()
        .map(|node| Task::Visit {
            node,
            frame: frame.clone(),
            parent: Arc::clone(&parent),
        })
        .collect();
    Expansion {
        stack,
        renderer,
        max_branches: DEFAULT_MAX_BRANCHES,
        emitted: 0,
    }
}

impl<'a> Expansion<'a> {
    /// Fail with [`ExpandError::ExpansionLimitExceeded`] once more than
    /// `limit` branches would be emitted.
    #[must_use]
    pub fn with_max_branches(mut self, limit: usize) -> Self {
        self.max_branches = limit;
        self
    }

    fn visit(
        &mut self,
        node: &'a ExpansionNode,
        frame: ScopeFrame,
        parent: Arc<[String]>,
    ) -> Result<(), ExpandError> {
        let Some(directive) = &node.directive else {
            self.stack.push(Task::Emit {
                node,
                frame,
                parent,
            });
            return Ok(());
        };

        let items = match SourceOutcome::resolve(directive, &frame, &node.source)? {
            SourceOutcome::Items(items) => items,
            SourceOutcome::Empty => return Ok(()),
        };
        if items.is_empty() {
            debug!(path = %node.source.display(), "loop source is empty");
        }

        // Reversed so the first element is popped first.
        for (index, item) in items.iter().enumerate().rev() {
            trace!(
                path = %node.source.display(),
                variable = %directive.variable,
                index,
                "binding loop element"
            );
            self.stack.push(Task::Emit {
                node,
                frame: frame.bind(directive.variable.clone(), item.clone()),
                parent: Arc::clone(&parent),
            });
        }
        Ok(())
    }

    fn emit(
        &mut self,
        node: &'a ExpansionNode,
        frame: ScopeFrame,
        parent: &[String],
    ) -> Result<Option<Branch<'a>>, ExpandError> {
        let segment = self.render_segment(node, &frame)?;
        if segment.trim().is_empty() {
            debug!(path = %node.source.display(), "segment rendered empty, pruning");
            return Ok(None);
        }
        if !is_single_component(&segment) {
            return Err(ExpandError::InvalidSegment {
                path: node.source.display().to_string(),
                segment,
            });
        }

        self.emitted += 1;
        if self.emitted > self.max_branches {
            return Err(ExpandError::ExpansionLimitExceeded {
                limit: self.max_branches,
            });
        }

        let mut segments = Vec::with_capacity(parent.len() + 1);
        segments.extend_from_slice(parent);
        segments.push(segment);

        if node.is_directory() {
            let shared: Arc<[String]> = Arc::from(segments.as_slice());
            for child in node.children.iter().rev() {
                self.stack.push(Task::Visit {
                    node: child,
                    frame: frame.clone(),
                    parent: Arc::clone(&shared),
                });
            }
        }

        trace!(path = %segments.join("/"), kind = %node.kind, "branch");
        Ok(Some(Branch {
            segments,
            kind: node.kind,
            frame,
            source: &node.source,
        }))
    }

    fn render_segment(&self, node: &ExpansionNode, frame: &ScopeFrame) -> Result<String, ExpandError> {
        let render = |text: &str| {
            self.renderer
                .render(text, frame)
                .map_err(|source| ExpandError::Render {
                    path: node.source.display().to_string(),
                    source,
                })
        };
        match &node.directive {
            Some(directive) => {
                let mut segment = render(&directive.prefix)?;
                segment.push_str(&render(&directive.body)?);
                segment.push_str(&render(&directive.suffix)?);
                Ok(segment)
            }
            None => render(&node.name),
        }
    }
}

/// Returns `true` if `segment` names exactly one entry inside its parent.
///
/// Both separators are rejected on every platform so a plan means the same
/// thing wherever it is written.
fn is_single_component(segment: &str) -> bool {
    !matches!(segment, "." | "..") && !segment.contains(['/', '\\', '\0'])
}

impl<'a> Iterator for Expansion<'a> {
    type Item = Result<Branch<'a>, ExpandError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(task) = self.stack.pop() {
            let step = match task {
                Task::Visit {
                    node,
                    frame,
                    parent,
                } => self.visit(node, frame, parent).map(|()| None),
                Task::Emit {
                    node,
                    frame,
                    parent,
                } => self.emit(node, frame, &parent),
            };
            match step {
                Ok(Some(branch)) => return Some(Ok(branch)),
                Ok(None) => {}
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl FusedIterator for Expansion<'_> {}
