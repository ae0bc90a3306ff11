//! Evaluation of weave expressions against a [`ScopeFrame`].
//!
//! Two consumers sit on top of this crate:
//!
//! - the expander calls [`eval`] on a directive's source expression and
//!   needs to tell "undefined" apart from real values, so evaluation returns
//!   [`Resolved`] rather than swallowing missing names;
//! - the writer and the expander render `{{ }}` templates through the
//!   [`Render`] trait, implemented here by [`Interpolator`].
//!
//! Neither path mutates the frame it is given.
//!
//! [`ScopeFrame`]: weave_ir::ScopeFrame

mod error;
mod eval;
mod filters;
mod render;

pub use error::RenderError;
pub use eval::{eval, Resolved};
pub use render::{Interpolator, Render, UndefinedPolicy};
