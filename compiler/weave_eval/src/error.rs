//! Render error types.

use weave_ir::ErrorCode;
use weave_parse::ParseError;

/// Errors raised while rendering a template or evaluating a filter.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Only raised under [`UndefinedPolicy::Strict`](crate::UndefinedPolicy).
    #[error("`{name}` is undefined")]
    Undefined { name: String },

    #[error("unknown filter `{name}`")]
    UnknownFilter { name: String },

    #[error("filter `{filter}` cannot be applied to a value of type {type_name}")]
    FilterType {
        filter: String,
        type_name: &'static str,
    },

    #[error("filter `{filter}` takes {expected} argument(s), got {got}")]
    FilterArity {
        filter: String,
        expected: usize,
        got: usize,
    },
}

impl RenderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RenderError::Parse(err) => err.code(),
            RenderError::Undefined { .. } => ErrorCode::W1001,
            RenderError::UnknownFilter { .. } => ErrorCode::W1002,
            RenderError::FilterType { .. } | RenderError::FilterArity { .. } => ErrorCode::W1003,
        }
    }
}
