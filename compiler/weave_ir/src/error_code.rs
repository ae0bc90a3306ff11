use std::fmt;

/// Error codes for every weave diagnostic.
///
/// Format: W#### where the first digit indicates the phase:
/// - W0xxx: Segment and expression parsing
/// - W1xxx: Interpolation (render) errors
/// - W2xxx: Expansion errors
/// - W3xxx: Configuration, data and filesystem errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parse Errors (W0xxx)
    /// `{% yield %}` without its closing `%}` or `{% endyield %}`
    W0001,
    /// Loop variable is not a legal identifier
    W0002,
    /// Missing `from` keyword after the loop variable
    W0003,
    /// Source or interpolation expression does not parse
    W0004,
    /// More than one directive in a single path segment
    W0005,
    /// `{{` without a matching `}}`
    W0006,

    // Render Errors (W1xxx)
    /// Undefined variable under the strict undefined policy
    W1001,
    /// Unknown filter name
    W1002,
    /// Filter applied to an unsupported value or with bad arguments
    W1003,

    // Expansion Errors (W2xxx)
    /// Directive source is not a sequence
    W2001,
    /// Branch count exceeded the configured maximum
    W2002,
    /// Template references a loop variable bound on a non-ancestor branch
    W2003,
    /// Rendering a path segment failed
    W2004,
    /// Rendered segment is not a single path component
    W2005,

    // Environment Errors (W3xxx)
    /// Filesystem error
    W3001,
    /// Invalid `weave.toml`
    W3002,
    /// Invalid data file or `-d` override
    W3003,
    /// Invalid exclusion glob
    W3004,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::W0001 => "W0001",
            ErrorCode::W0002 => "W0002",
            ErrorCode::W0003 => "W0003",
            ErrorCode::W0004 => "W0004",
            ErrorCode::W0005 => "W0005",
            ErrorCode::W0006 => "W0006",
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::W1003 => "W1003",
            ErrorCode::W2001 => "W2001",
            ErrorCode::W2002 => "W2002",
            ErrorCode::W2003 => "W2003",
            ErrorCode::W2004 => "W2004",
            ErrorCode::W2005 => "W2005",
            ErrorCode::W3001 => "W3001",
            ErrorCode::W3002 => "W3002",
            ErrorCode::W3003 => "W3003",
            ErrorCode::W3004 => "W3004",
        }
    }

    /// Check if this is a parse-phase error.
    pub fn is_parse_error(self) -> bool {
        self.as_str().starts_with("W0")
    }

    /// Check if this is an expansion-phase error.
    pub fn is_expansion_error(self) -> bool {
        self.as_str().starts_with("W2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
