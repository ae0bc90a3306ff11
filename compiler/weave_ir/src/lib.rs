//! Shared data types for the weave path expander.
//!
//! Everything above this crate (the directive parser, the interpolator, the
//! tree expander and the CLI) speaks in terms of the types defined here:
//!
//! - [`Value`]: runtime data supplied by the user (JSON/YAML/TOML friendly).
//! - [`Name`]: cheap-to-clone identifier used as a binding key.
//! - [`ScopeFrame`]: immutable, parent-linked binding environment.
//! - [`Span`]: byte range inside a template string, for diagnostics.
//! - [`ErrorCode`]: stable codes attached to every user-facing error.

mod error_code;
mod name;
mod scope;
mod span;
pub mod stack;
mod value;

pub use error_code::ErrorCode;
pub use name::Name;
pub use scope::{Ancestors, ScopeFrame};
pub use span::Span;
pub use value::Value;
