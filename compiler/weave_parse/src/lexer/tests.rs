use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_lex_path_expression() {
    assert_eq!(
        kinds("data.items[0]"),
        vec![
            TokenKind::Ident("data".into()),
            TokenKind::Dot,
            TokenKind::Ident("items".into()),
            TokenKind::LBracket,
            TokenKind::Int(0),
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_keywords_both_cases() {
    assert_eq!(
        kinds("true False none None"),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::None,
            TokenKind::None,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("nonempty"),
        vec![TokenKind::Ident("nonempty".into()), TokenKind::Eof]
    );
}

#[test]
fn test_lex_string_escapes() {
    assert_eq!(
        kinds(r#""a\"b" 'c\'d' "tab\t""#),
        vec![
            TokenKind::Str("a\"b".into()),
            TokenKind::Str("c'd".into()),
            TokenKind::Str("tab\t".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_numbers() {
    assert_eq!(
        kinds("1_000 2.5 -3"),
        vec![
            TokenKind::Int(1000),
            TokenKind::Float(2.5),
            TokenKind::Minus,
            TokenKind::Int(3),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_filter_pipe() {
    assert_eq!(
        kinds("x | default('y')"),
        vec![
            TokenKind::Ident("x".into()),
            TokenKind::Pipe,
            TokenKind::Ident("default".into()),
            TokenKind::LParen,
            TokenKind::Str("y".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_eof_span_points_at_end() {
    let tokens = lex("ab ").unwrap();
    assert_eq!(tokens.last().unwrap().span, Span::point(3));
}

#[test]
fn test_unexpected_character_is_error() {
    let err = lex("a + b").unwrap_err();
    assert_eq!(err.code(), weave_ir::ErrorCode::W0004);
    assert_eq!(err.span, Span::new(2, 3));
}
