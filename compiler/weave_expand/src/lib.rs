//! Looped path-template expansion.
//!
//! A template tree is a directory whose entry names may carry a loop
//! directive:
//!
//! ```text
//! {% yield item from items %}dir-{{ item }}{% endyield %}/
//!     {{ item }}.txt.jinja
//! ```
//!
//! Expansion runs in three stages:
//!
//! 1. [`TreeWalker`] reads the template directory into an [`ExpansionNode`]
//!    tree, parsing every entry name once.
//! 2. [`check_scoping`] rejects names that read a loop variable bound only on
//!    another branch of the tree, unless the top-level data binds it too.
//! 3. [`expand`] enumerates every concrete output path together with the
//!    [`ScopeFrame`] that renders it, outer loops first.
//!
//! Nothing here touches the output directory; writing the plan is the
//! caller's job.
//!
//! [`ScopeFrame`]: weave_ir::ScopeFrame

mod error;
mod expand;
mod node;
mod scoping;
mod walker;

pub use error::{ExpandError, TreeError};
pub use expand::{expand, Branch, Expansion, SourceOutcome, DEFAULT_MAX_BRANCHES};
pub use node::{ExpansionNode, NodeKind};
pub use scoping::{check_scoping, off_path_reads, OffPathRead};
pub use walker::TreeWalker;
