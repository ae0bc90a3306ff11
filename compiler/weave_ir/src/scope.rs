//! Immutable, parent-linked binding environments.
//!
//! A [`ScopeFrame`] never changes after it is created. Binding a loop
//! variable produces a new child frame that points at its parent, so many
//! expansion branches share their common ancestors while each keeps a private
//! innermost frame. There is no "current scope" to push or pop: whoever holds
//! a frame holds the complete environment for that branch.
//!
//! Frames are `Arc`-backed and therefore `Send + Sync`; branches produced by
//! the expander can be rendered on any thread.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Name, Value};

/// One link of the scope chain.
struct Frame {
    bindings: FxHashMap<Name, Value>,
    parent: Option<ScopeFrame>,
    depth: u32,
}

/// Immutable binding environment chained to its enclosing frame.
#[derive(Clone)]
pub struct ScopeFrame(Arc<Frame>);

impl ScopeFrame {
    /// Create a root frame (no parent) from top-level bindings.
    pub fn root(bindings: impl IntoIterator<Item = (Name, Value)>) -> Self {
        ScopeFrame(Arc::new(Frame {
            bindings: bindings.into_iter().collect(),
            parent: None,
            depth: 0,
        }))
    }

    /// Root frame with no bindings.
    pub fn empty() -> Self {
        ScopeFrame::root(std::iter::empty())
    }

    /// Root frame whose bindings are the entries of a top-level data map.
    ///
    /// Any non-map value yields an empty root frame.
    pub fn from_data(data: &Value) -> Self {
        match data {
            Value::Map(entries) => ScopeFrame::root(
                entries
                    .iter()
                    .map(|(key, value)| (Name::new(key), value.clone())),
            ),
            _ => ScopeFrame::empty(),
        }
    }

    /// Create a child frame binding a single name.
    ///
    /// The receiver is left untouched; a binding that reuses an ancestor's
    /// name shadows it only for lookups through the new frame.
    #[must_use]
    pub fn bind(&self, name: Name, value: Value) -> ScopeFrame {
        self.with_bindings(std::iter::once((name, value)))
    }

    /// Create a child frame holding several bindings.
    #[must_use]
    pub fn with_bindings(&self, bindings: impl IntoIterator<Item = (Name, Value)>) -> ScopeFrame {
        ScopeFrame(Arc::new(Frame {
            bindings: bindings.into_iter().collect(),
            parent: Some(self.clone()),
            depth: self.0.depth + 1,
        }))
    }

    /// Look up a name, innermost frame first.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.ancestors()
            .find_map(|frame| frame.0.bindings.get(name))
    }

    /// Look up a name in this frame only.
    pub fn lookup_local(&self, name: &str) -> Option<&Value> {
        self.0.bindings.get(name)
    }

    /// The enclosing frame, if any.
    pub fn parent(&self) -> Option<&ScopeFrame> {
        self.0.parent.as_ref()
    }

    /// Number of frames between this one and the root (root is 0).
    pub fn depth(&self) -> u32 {
        self.0.depth
    }

    /// Iterate this frame and its ancestors, innermost first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns `true` if both handles point at the same frame.
    pub fn ptr_eq(a: &ScopeFrame, b: &ScopeFrame) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Every visible binding, with shadowed ancestors hidden.
    pub fn visible(&self) -> BTreeMap<Name, Value> {
        let mut out = BTreeMap::new();
        for frame in self.ancestors() {
            for (name, value) in &frame.0.bindings {
                out.entry(name.clone()).or_insert_with(|| value.clone());
            }
        }
        out
    }
}

impl fmt::Debug for ScopeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut local: Vec<_> = self.0.bindings.iter().collect();
        local.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_struct("ScopeFrame")
            .field("depth", &self.0.depth)
            .field("bindings", &local)
            .finish_non_exhaustive()
    }
}

/// Iterator over a frame and its ancestors. See [`ScopeFrame::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a ScopeFrame>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ScopeFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
