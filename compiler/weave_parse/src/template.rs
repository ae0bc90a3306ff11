//! `{{ expr }}` interpolation templates.

use weave_ir::{Name, Span};

use crate::ast::Expr;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::parser::parse_expression;

/// One piece of an interpolation template.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    /// Literal text copied to the output.
    Text(String),
    /// `{{ expr }}`; `span` covers the whole hole including braces.
    Interp { expr: Expr, span: Span },
}

/// A parsed interpolation template.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    /// Returns `true` if the template has no `{{ }}` holes.
    pub fn is_literal(&self) -> bool {
        self.parts
            .iter()
            .all(|part| matches!(part, TemplatePart::Text(_)))
    }

    /// Every variable name read by the template's holes, in source order.
    pub fn free_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        for part in &self.parts {
            if let TemplatePart::Interp { expr, .. } = part {
                expr.free_names(&mut names);
            }
        }
        names
    }
}

/// Parse interpolation holes out of `text`.
///
/// Text outside `{{ }}` is kept verbatim, including any `{% %}` tags other
/// than the loop directive (those are handled by
/// [`parse_segment`](crate::parse_segment) before this runs).
pub fn parse_template(text: &str) -> Result<Template, ParseError> {
    let mut cursor = Cursor::new(text);
    let mut parts = Vec::new();

    while let Some(open) = cursor.find("{{") {
        if open > cursor.pos() {
            parts.push(TemplatePart::Text(cursor.slice(cursor.pos(), open).to_owned()));
        }
        cursor.seek(open + 2);

        let Some(close) = cursor.find("}}") else {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedInterpolation,
                Span::from_range(open..text.len()),
            ));
        };

        let inner_start = cursor.pos();
        let expr = parse_expression(cursor.slice(inner_start, close))
            .map_err(|err| err.shifted(inner_start))?;
        parts.push(TemplatePart::Interp {
            expr,
            span: Span::from_range(open..close + 2),
        });
        cursor.seek(close + 2);
    }

    if !cursor.is_eof() {
        parts.push(TemplatePart::Text(cursor.rest().to_owned()));
    }

    Ok(Template { parts })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
