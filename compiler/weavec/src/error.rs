//! Errors surfaced by the generator.

use std::io;
use std::path::Path;

use weave_eval::RenderError;
use weave_expand::{ExpandError, TreeError};
use weave_ir::ErrorCode;

/// Any failure of `generate`, `plan` or `check`.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Expand(#[from] ExpandError),

    /// Rendering a `.jinja` file's contents failed.
    #[error("cannot render contents of `{path}`: {source}")]
    Render {
        path: String,
        #[source]
        source: RenderError,
    },

    #[error("{action} `{path}`: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid `{path}`: {message}")]
    Config { path: String, message: String },

    #[error("invalid data in `{origin}`: {message}")]
    Data { origin: String, message: String },

    #[error("invalid exclude pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl GenerateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateError::Tree(err) => err.code(),
            GenerateError::Expand(err) => err.code(),
            GenerateError::Render { source, .. } => source.code(),
            GenerateError::Io { .. } => ErrorCode::W3001,
            GenerateError::Config { .. } => ErrorCode::W3002,
            GenerateError::Data { .. } => ErrorCode::W3003,
            GenerateError::Glob { .. } => ErrorCode::W3004,
        }
    }

    /// `map_err` adapter for filesystem calls on `path`.
    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.display().to_string();
        move |source| GenerateError::Io {
            action,
            path,
            source,
        }
    }
}
