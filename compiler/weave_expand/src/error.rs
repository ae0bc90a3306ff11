//! Tree-building and expansion errors.

use std::io;

use weave_eval::RenderError;
use weave_ir::{ErrorCode, Name};
use weave_parse::ParseError;

/// Errors raised while reading or checking the template tree.
///
/// Every variant is fatal: no plan is produced for a tree that fails here.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("`{path}` is not valid UTF-8")]
    NonUtf8Name { path: String },

    #[error("in `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    /// A name reads a loop variable that no directive on its ancestor path
    /// binds.
    #[error("`{path}` reads `{name}`, which is only bound by a loop on another branch")]
    ForeignBinding { path: String, name: Name },
}

impl TreeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TreeError::Io { .. } | TreeError::NonUtf8Name { .. } => ErrorCode::W3001,
            TreeError::Parse { source, .. } => source.code(),
            TreeError::ForeignBinding { .. } => ErrorCode::W2003,
        }
    }
}

/// Fatal errors raised while enumerating branches.
///
/// An undefined directive source is not an error; see
/// [`SourceOutcome::Empty`](crate::SourceOutcome::Empty).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExpandError {
    #[error("`{expression}` in `{path}` is a {type_name}, not a list")]
    NotIterable {
        path: String,
        expression: String,
        type_name: &'static str,
    },

    #[error("expansion produced more than {limit} paths")]
    ExpansionLimitExceeded { limit: usize },

    /// A rendered name is `.` or `..`, or holds a path separator, so it
    /// would not stay one entry under the destination.
    #[error("`{path}` renders to `{segment}`, which is not a single path component")]
    InvalidSegment { path: String, segment: String },

    #[error("cannot render `{path}`: {source}")]
    Render {
        path: String,
        #[source]
        source: RenderError,
    },
}

impl ExpandError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExpandError::NotIterable { .. } => ErrorCode::W2001,
            ExpandError::ExpansionLimitExceeded { .. } => ErrorCode::W2002,
            ExpandError::InvalidSegment { .. } => ErrorCode::W2005,
            ExpandError::Render { source, .. } => match source {
                RenderError::Parse(_) => ErrorCode::W2004,
                other => other.code(),
            },
        }
    }
}
