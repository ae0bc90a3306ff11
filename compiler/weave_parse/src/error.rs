//! Parse error types.

use weave_ir::{ErrorCode, Span};

/// What went wrong while parsing a segment, template or expression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// `{% yield ...` without `%}`, or a body without `{% endyield %}`.
    #[error("unterminated `{{% yield %}}` directive: expected {expected}")]
    UnterminatedDirective { expected: &'static str },

    #[error("`{found}` is not a valid loop variable name")]
    InvalidVariableName { found: String },

    #[error("expected `from` after the loop variable, found `{found}`")]
    ExpectedFrom { found: String },

    #[error("invalid expression: {message}")]
    InvalidExpression { message: String },

    /// A second directive in the same segment, including one nested in a body.
    #[error("only one `{{% yield %}}` directive is allowed per path segment")]
    MultipleDirectives,

    #[error("unterminated `{{{{` interpolation: expected `}}}}`")]
    UnterminatedInterpolation,
}

impl ParseErrorKind {
    /// The stable error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::UnterminatedDirective { .. } => ErrorCode::W0001,
            ParseErrorKind::InvalidVariableName { .. } => ErrorCode::W0002,
            ParseErrorKind::ExpectedFrom { .. } => ErrorCode::W0003,
            ParseErrorKind::InvalidExpression { .. } => ErrorCode::W0004,
            ParseErrorKind::MultipleDirectives => ErrorCode::W0005,
            ParseErrorKind::UnterminatedInterpolation => ErrorCode::W0006,
        }
    }
}

/// A parse error with the byte span it refers to.
///
/// Spans are relative to the text handed to the parser (one path segment,
/// or one file body).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub(crate) fn invalid_expression(message: impl Into<String>, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::InvalidExpression {
                message: message.into(),
            },
            span,
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Re-anchor the span when the error came from a sub-slice starting at
    /// `offset`.
    #[must_use]
    pub fn shifted(self, offset: usize) -> Self {
        ParseError {
            kind: self.kind,
            span: self.span.shifted(offset),
        }
    }
}
