use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_scalars() {
    assert_eq!(Value::string("world").to_string(), "world");
    assert_eq!(Value::Int(42).to_string(), "42");
    assert_eq!(Value::Float(1.0).to_string(), "1.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Bool(true).to_string(), "True");
    assert_eq!(Value::None.to_string(), "None");
}

#[test]
fn test_display_collections_quote_strings() {
    let list = Value::list([Value::string("a"), Value::Int(1)]);
    assert_eq!(list.to_string(), "['a', 1]");

    let map = Value::map([("k", Value::string("v")), ("n", Value::None)]);
    assert_eq!(map.to_string(), "{'k': 'v', 'n': None}");
}

#[test]
fn test_index_lists_and_maps() {
    let list = Value::list([Value::Int(10), Value::Int(20), Value::Int(30)]);
    assert_eq!(list.index(&Value::Int(0)), Some(&Value::Int(10)));
    assert_eq!(list.index(&Value::Int(-1)), Some(&Value::Int(30)));
    assert_eq!(list.index(&Value::Int(3)), None);
    assert_eq!(list.index(&Value::Int(-4)), None);
    assert_eq!(list.index(&Value::string("0")), None);

    let map = Value::map([("name", Value::string("x"))]);
    assert_eq!(map.index(&Value::string("name")), Some(&Value::string("x")));
    assert_eq!(map.attr("name"), Some(&Value::string("x")));
    assert_eq!(map.attr("missing"), None);
}

#[test]
fn test_only_lists_are_iterable() {
    assert!(Value::list([]).as_list().is_some());
    assert!(Value::string("abc").as_list().is_none());
    assert!(Value::map([("a", Value::Int(1))]).as_list().is_none());
    assert!(Value::None.as_list().is_none());
}

#[test]
fn test_truthiness() {
    assert!(!Value::None.is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(!Value::list([]).is_truthy());
    assert!(Value::Int(3).is_truthy());
    assert!(Value::string("x").is_truthy());
}

#[test]
fn test_deserialize_json() {
    let value: Value =
        serde_json::from_str(r#"{"strings": ["one", "two"], "n": 3, "f": 0.5, "ok": true, "z": null}"#)
            .unwrap();

    assert_eq!(
        value.attr("strings"),
        Some(&Value::list([Value::string("one"), Value::string("two")]))
    );
    assert_eq!(value.attr("n"), Some(&Value::Int(3)));
    assert_eq!(value.attr("f"), Some(&Value::Float(0.5)));
    assert_eq!(value.attr("ok"), Some(&Value::Bool(true)));
    assert_eq!(value.attr("z"), Some(&Value::None));
}

#[test]
fn test_deserialize_yaml_stringifies_scalar_keys() {
    let value: Value = serde_yaml::from_str("1: one\ntrue: yes\nname: weave\n").unwrap();
    assert_eq!(value.attr("1"), Some(&Value::string("one")));
    assert_eq!(value.attr("True"), Some(&Value::string("yes")));
    assert_eq!(value.attr("name"), Some(&Value::string("weave")));
}
