//! Loop directives inside a single path segment.
//!
//! ```text
//! prefix{% yield <ident> from <expr> %}body{% endyield %}suffix
//! ```
//!
//! A segment holds at most one directive. Nesting across directory levels is
//! written as one directive per level, never as a directive enclosing child
//! path components; a filesystem name cannot contain `/` anyway.
//!
//! Whitespace-control dashes (`{%-`, `-%}`) are accepted and ignored.

use tracing::trace;
use weave_ir::{Name, Span};

use crate::ast::Expr;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::parser::parse_expression;
use crate::template::parse_template;

/// Opening marker shared by every `{% %}` tag.
pub const DIRECTIVE_OPEN: &str = "{%";
const DIRECTIVE_CLOSE: &str = "%}";
const YIELD: &str = "yield";
const END_YIELD: &str = "endyield";
const FROM: &str = "from";

/// Words that cannot be bound as loop variables.
const RESERVED: &[&str] = &[
    YIELD, END_YIELD, FROM, "true", "True", "false", "False", "none", "None",
];

/// A parsed `{% yield var from expr %}body{% endyield %}` directive.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    /// Name bound to each element of the source sequence.
    pub variable: Name,
    /// Parsed source expression, evaluated against the enclosing scope.
    pub source: Expr,
    /// Source expression as written, for diagnostics.
    pub source_text: String,
    /// Template rendered once per element, with `variable` bound.
    pub body: String,
    /// Literal/template text before the opening tag.
    pub prefix: String,
    /// Literal/template text after `{% endyield %}`.
    pub suffix: String,
    /// Span of the directive from `{%` to the closing `%}` of `endyield`.
    pub span: Span,
}

impl Directive {
    /// Names read by the source expression (resolved in the parent scope).
    pub fn source_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        self.source.free_names(&mut names);
        names
    }

    /// Names read by the prefix, body and suffix templates (resolved with
    /// the loop variable bound).
    pub fn segment_names(&self) -> Vec<Name> {
        [&self.prefix, &self.body, &self.suffix]
            .into_iter()
            .filter_map(|text| parse_template(text).ok())
            .flat_map(|template| template.free_names())
            .collect()
    }
}

/// A `{% word ...` tag located in the text.
struct Tag<'a> {
    /// Offset of `{%`.
    start: usize,
    /// The first word inside the tag.
    word: &'a str,
    /// Offset just past the word.
    after_word: usize,
}

/// Find the next `{% word` tag at or after the cursor, leaving the cursor
/// just past `{%`.
fn next_tag<'a>(cursor: &mut Cursor<'a>) -> Option<Tag<'a>> {
    let start = cursor.find(DIRECTIVE_OPEN)?;
    cursor.seek(start + DIRECTIVE_OPEN.len());
    let mut probe = *cursor;
    probe.eat("-");
    probe.eat_whitespace();
    let word = probe.eat_word(DIRECTIVE_CLOSE);
    Some(Tag {
        start,
        word,
        after_word: probe.pos(),
    })
}

/// Find the next `{% yield` tag, skipping other tags.
fn next_yield<'a>(cursor: &mut Cursor<'a>) -> Option<Tag<'a>> {
    while let Some(tag) = next_tag(cursor) {
        if tag.word == YIELD {
            return Some(tag);
        }
    }
    None
}

/// Parse one path segment.
///
/// Returns `Ok(None)` for segments without a `{% yield %}` tag; those are
/// ordinary templated names.
pub fn parse_segment(text: &str) -> Result<Option<Directive>, ParseError> {
    let mut cursor = Cursor::new(text);
    let Some(open) = next_yield(&mut cursor) else {
        return Ok(None);
    };

    // Header: `{% yield <ident> from <expr> %}`
    cursor.seek(open.after_word);
    let Some(header_close) = cursor.find_unquoted(DIRECTIVE_CLOSE) else {
        return Err(ParseError::new(
            ParseErrorKind::UnterminatedDirective {
                expected: "`%}` to close the `yield` tag",
            },
            Span::from_range(open.start..text.len()),
        ));
    };
    let mut header = Cursor::new(&text[..header_close]);
    header.seek(open.after_word);

    header.eat_whitespace();
    let var_start = header.pos();
    let variable = header.eat_word(DIRECTIVE_CLOSE);
    if !Name::is_identifier(variable) || RESERVED.contains(&variable) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidVariableName {
                found: variable.to_owned(),
            },
            Span::from_range(var_start..header.pos()),
        ));
    }

    header.eat_whitespace();
    let from_start = header.pos();
    let keyword = header.eat_word(DIRECTIVE_CLOSE);
    if keyword != FROM {
        let found = if keyword.is_empty() { DIRECTIVE_CLOSE } else { keyword };
        return Err(ParseError::new(
            ParseErrorKind::ExpectedFrom {
                found: found.to_owned(),
            },
            Span::from_range(from_start..header.pos()),
        ));
    }

    let source_start = header.pos();
    let raw_source = header.rest().trim_end();
    let raw_source = raw_source.strip_suffix('-').unwrap_or(raw_source);
    let source = parse_expression(raw_source).map_err(|err| err.shifted(source_start))?;
    let source_text = raw_source.trim().to_owned();

    // Body: everything up to `{% endyield %}`.
    let body_start = header_close + DIRECTIVE_CLOSE.len();
    cursor.seek(body_start);
    let (body_end, end) = loop {
        let Some(tag) = next_tag(&mut cursor) else {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedDirective {
                    expected: "`{% endyield %}`",
                },
                Span::from_range(open.start..text.len()),
            ));
        };
        match tag.word {
            YIELD => {
                return Err(ParseError::new(
                    ParseErrorKind::MultipleDirectives,
                    Span::from_range(tag.start..tag.after_word),
                ));
            }
            END_YIELD => {
                let mut close = cursor;
                close.seek(tag.after_word);
                close.eat_whitespace();
                close.eat("-");
                if !close.eat(DIRECTIVE_CLOSE) {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedDirective {
                            expected: "`%}` after `endyield`",
                        },
                        Span::from_range(tag.start..text.len()),
                    ));
                }
                break (tag.start, close.pos());
            }
            _ => {}
        }
    };

    // Anything after the directive must be plain template text.
    cursor.seek(end);
    if let Some(extra) = next_yield(&mut cursor) {
        return Err(ParseError::new(
            ParseErrorKind::MultipleDirectives,
            Span::from_range(extra.start..extra.after_word),
        ));
    }

    let prefix = &text[..open.start];
    let body = &text[body_start..body_end];
    let suffix = &text[end..];
    for (piece, offset) in [(prefix, 0), (body, body_start), (suffix, end)] {
        parse_template(piece).map_err(|err| err.shifted(offset))?;
    }

    trace!(variable, source = %source_text, "parsed yield directive");

    Ok(Some(Directive {
        variable: Name::new(variable),
        source,
        source_text,
        body: body.to_owned(),
        prefix: prefix.to_owned(),
        suffix: suffix.to_owned(),
        span: Span::from_range(open.start..end),
    }))
}
