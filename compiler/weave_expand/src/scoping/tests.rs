use super::*;
use crate::node::ExpansionNode;
use pretty_assertions::assert_eq;
use weave_ir::Value;

fn dir(name: &str, children: Vec<ExpansionNode>) -> ExpansionNode {
    ExpansionNode::directory(name, children).unwrap()
}

fn file(name: &str) -> ExpansionNode {
    ExpansionNode::file(name).unwrap()
}

fn foreign(err: TreeError) -> (String, String) {
    match err {
        TreeError::ForeignBinding { path, name } => (path, name.to_string()),
        other => panic!("expected ForeignBinding, got {other:?}"),
    }
}

#[test]
fn test_nested_loops_see_ancestors() {
    let tree = ExpansionNode::root(vec![dir(
        "{% yield s from strings %}{{ s }}{% endyield %}",
        vec![dir(
            "{% yield i from integers %}{{ i }}{% endyield %}",
            vec![file("{{ s }}_{{ i }}.txt.jinja")],
        )],
    )]);
    check_scoping(&tree, &ScopeFrame::empty()).unwrap();
}

#[test]
fn test_inner_source_may_read_outer_variable() {
    let tree = ExpansionNode::root(vec![dir(
        "{% yield user from users %}{{ user.name }}{% endyield %}",
        vec![file(
            "{% yield repo from user.repos %}{{ repo }}{% endyield %}.md",
        )],
    )]);
    check_scoping(&tree, &ScopeFrame::empty()).unwrap();
}

#[test]
fn test_sibling_binding_is_foreign() {
    let tree = ExpansionNode::root(vec![
        dir("{% yield a from xs %}{{ a }}{% endyield %}", vec![]),
        file("{{ a }}.txt"),
    ]);
    let (path, name) = foreign(check_scoping(&tree, &ScopeFrame::empty()).unwrap_err());
    assert_eq!(path, "{{ a }}.txt");
    assert_eq!(name, "a");
}

#[test]
fn test_source_cannot_read_own_variable() {
    let tree = ExpansionNode::root(vec![file(
        "{% yield x from x.children %}{{ x }}{% endyield %}",
    )]);
    let (_, name) = foreign(check_scoping(&tree, &ScopeFrame::empty()).unwrap_err());
    assert_eq!(name, "x");
}

#[test]
fn test_binding_ends_with_subtree() {
    let tree = ExpansionNode::root(vec![
        dir(
            "{% yield a from xs %}{{ a }}{% endyield %}",
            vec![file("{{ a }}.txt")],
        ),
        dir("after", vec![file("{{ a }}.txt")]),
    ]);
    let err = check_scoping(&tree, &ScopeFrame::empty()).unwrap_err();
    assert_eq!(err.code(), weave_ir::ErrorCode::W2003);
}

#[test]
fn test_data_names_are_not_checked() {
    let tree = ExpansionNode::root(vec![
        dir("{% yield a from xs %}{{ a }}{% endyield %}", vec![]),
        file("{{ project }}.txt"),
    ]);
    check_scoping(&tree, &ScopeFrame::empty()).unwrap();
}

#[test]
fn test_data_may_answer_a_name_bound_elsewhere() {
    let tree = ExpansionNode::root(vec![
        file("{{ item }}.txt"),
        dir(
            "{% yield item from items %}{{ item }}{% endyield %}",
            vec![file("x.txt")],
        ),
    ]);
    let data = ScopeFrame::root([(Name::new("item"), Value::string("top"))]);
    check_scoping(&tree, &data).unwrap();

    let (path, name) = foreign(check_scoping(&tree, &ScopeFrame::empty()).unwrap_err());
    assert_eq!(path, "{{ item }}.txt");
    assert_eq!(name, "item");
}

#[test]
fn test_off_path_reads_lists_each_name_once_per_node() {
    let tree = ExpansionNode::root(vec![
        dir("{% yield a from xs %}{{ a }}{% endyield %}", vec![]),
        dir("{% yield b from ys %}{{ b }}{% endyield %}", vec![]),
        file("{{ a }}-{{ a }}-{{ b }}.txt"),
        file("{{ b }}.md"),
    ]);
    let reads: Vec<(String, String)> = off_path_reads(&tree)
        .into_iter()
        .map(|read| (read.path, read.name.to_string()))
        .collect();
    assert_eq!(
        reads,
        vec![
            ("{{ a }}-{{ a }}-{{ b }}.txt".to_owned(), "a".to_owned()),
            ("{{ a }}-{{ a }}-{{ b }}.txt".to_owned(), "b".to_owned()),
            ("{{ b }}.md".to_owned(), "b".to_owned()),
        ]
    );
}
