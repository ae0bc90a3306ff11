use super::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn names(nodes: &[ExpansionNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

#[test]
fn test_children_sorted_bytewise() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.txt", "B.txt", "a.txt", "_x.txt"] {
        touch(dir.path(), name);
    }
    let tree = TreeWalker::build(dir.path(), |_: &Path| true).unwrap();
    assert_eq!(names(&tree.children), vec!["B.txt", "_x.txt", "a.txt", "b.txt"]);
}

#[test]
fn test_directives_parsed_and_nested() {
    let dir = tempfile::tempdir().unwrap();
    touch(
        dir.path(),
        "{% yield s from strings %}{{ s }}{% endyield %}/{{ s }}.txt.jinja",
    );

    let tree = TreeWalker::build(dir.path(), |_: &Path| true).unwrap();
    assert_eq!(tree.children.len(), 1);

    let looped = &tree.children[0];
    assert_eq!(looped.kind, NodeKind::Directory);
    let directive = looped.directive.as_ref().unwrap();
    assert_eq!(directive.variable.as_str(), "s");
    assert_eq!(directive.source_text, "strings");

    let file = &looped.children[0];
    assert_eq!(file.kind, NodeKind::File);
    assert!(file.directive.is_none());
    assert_eq!(
        file.source,
        PathBuf::from("{% yield s from strings %}{{ s }}{% endyield %}").join("{{ s }}.txt.jinja")
    );
}

#[test]
fn test_excluded_directory_skips_subtree() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), ".git/HEAD");
    touch(dir.path(), "keep/file.txt");

    let tree = TreeWalker::build(dir.path(), |path: &Path| !path.starts_with(".git")).unwrap();
    assert_eq!(names(&tree.children), vec!["keep"]);
    assert_eq!(names(&tree.children[0].children), vec!["file.txt"]);
}

#[test]
fn test_malformed_name_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "{% yield x from xs %}{{ x }}.txt");

    let err = TreeWalker::build(dir.path(), |_: &Path| true).unwrap_err();
    assert!(matches!(err, TreeError::Parse { .. }));
    assert_eq!(err.code(), weave_ir::ErrorCode::W0001);
}

#[test]
fn test_missing_root_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TreeWalker::build(&dir.path().join("nope"), |_: &Path| true).unwrap_err();
    assert!(matches!(err, TreeError::Io { .. }));
}
