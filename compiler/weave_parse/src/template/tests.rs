use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_plain_text_is_literal() {
    let template = parse_template("README.md").unwrap();
    assert!(template.is_literal());
    assert_eq!(template.parts, vec![TemplatePart::Text("README.md".into())]);
}

#[test]
fn test_empty_text_has_no_parts() {
    assert_eq!(parse_template("").unwrap(), Template::default());
}

#[test]
fn test_interpolation_between_text() {
    let template = parse_template("dir-{{ item }}.txt").unwrap();
    assert_eq!(
        template.parts,
        vec![
            TemplatePart::Text("dir-".into()),
            TemplatePart::Interp {
                expr: Expr::Var(Name::new("item")),
                span: Span::new(4, 14),
            },
            TemplatePart::Text(".txt".into()),
        ]
    );
}

#[test]
fn test_adjacent_interpolations() {
    let template = parse_template("{{single_var}}{{hello}}.txt").unwrap();
    assert_eq!(
        template.free_names(),
        vec![Name::new("single_var"), Name::new("hello")]
    );
    assert_eq!(template.parts.len(), 3);
}

#[test]
fn test_other_tags_pass_through() {
    let template = parse_template("{% raw %}x").unwrap();
    assert!(template.is_literal());
}

#[test]
fn test_unterminated_interpolation() {
    let err = parse_template("a{{ b").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedInterpolation);
    assert_eq!(err.span, Span::new(1, 5));
}

#[test]
fn test_expression_error_span_is_absolute() {
    let err = parse_template("ab{{ x y }}").unwrap_err();
    // `y` sits at offset 7 of the full text.
    assert_eq!(err.span, Span::new(7, 8));
}
