//! Parsing for weave path templates.
//!
//! Three grammars live here, all operating on a single path segment or file
//! body at a time:
//!
//! - **Expressions** (`items`, `data.names[0]`, `["a", "b"]`, `x | upper`),
//!   lexed with `logos` and parsed by recursive descent.
//! - **Interpolation templates**: literal text with `{{ expr }}` holes.
//! - **Directives**: `{% yield var from expr %}body{% endyield %}` loop tags
//!   that fan a single segment out into one segment per sequence element.
//!
//! Parsing is pure: nothing here evaluates an expression or touches the
//! filesystem.

mod ast;
mod cursor;
mod error;
mod lexer;
mod parser;
mod segment;
mod template;

pub use ast::Expr;
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{lex, Token, TokenKind};
pub use parser::parse_expression;
pub use segment::{parse_segment, Directive, DIRECTIVE_OPEN};
pub use template::{parse_template, Template, TemplatePart};
