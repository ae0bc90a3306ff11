//! Expression lexer built on `logos`.
//!
//! Covers the small expression language shared by directive sources and
//! `{{ }}` interpolations: names, literals, attribute/subscript access, list
//! literals and filter pipes.

use logos::Logos;
use weave_ir::Span;

use crate::error::ParseError;

/// Token kinds for expressions.
#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // === Keywords ===
    #[token("true")]
    #[token("True")]
    True,
    #[token("false")]
    #[token("False")]
    False,
    #[token("none")]
    #[token("None")]
    None,

    // === Literals ===
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),
    #[regex(r"[0-9][0-9_]*", |lex| lex.slice().replace('_', "").parse::<i64>().ok())]
    Int(i64),
    #[regex(r"[0-9][0-9_]*\.[0-9]+", |lex| lex.slice().replace('_', "").parse::<f64>().ok())]
    Float(f64),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r"'([^'\\]|\\.)*'", |lex| unescape(lex.slice()))]
    Str(String),

    // === Punctuation ===
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("|")]
    Pipe,
    #[token("-")]
    Minus,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    /// End of input; always the last token of a [`lex`] result.
    Eof,
}

impl TokenKind {
    /// Short description used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::True => "`true`".to_owned(),
            TokenKind::False => "`false`".to_owned(),
            TokenKind::None => "`none`".to_owned(),
            TokenKind::Ident(name) => format!("`{name}`"),
            TokenKind::Int(i) => format!("`{i}`"),
            TokenKind::Float(x) => format!("`{x}`"),
            TokenKind::Str(s) => format!("{s:?}"),
            TokenKind::Dot => "`.`".to_owned(),
            TokenKind::Comma => "`,`".to_owned(),
            TokenKind::Pipe => "`|`".to_owned(),
            TokenKind::Minus => "`-`".to_owned(),
            TokenKind::LParen => "`(`".to_owned(),
            TokenKind::RParen => "`)`".to_owned(),
            TokenKind::LBracket => "`[`".to_owned(),
            TokenKind::RBracket => "`]`".to_owned(),
            TokenKind::Eof => "end of expression".to_owned(),
        }
    }
}

/// A token with its span in the expression text.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lex an expression into tokens, terminated by [`TokenKind::Eof`].
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                return Err(ParseError::invalid_expression(
                    format!("unexpected `{}`", lexer.slice()),
                    span,
                ));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::point(source.len()),
    });
    Ok(tokens)
}

/// Strip the quotes from a string literal and resolve escapes.
fn unescape(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
