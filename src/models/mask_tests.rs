use super::*;
use serde_json::json;

#[test]
fn test_field_mask_ignores_order_and_duplicates() {
    let first = FieldMask::new(["b.x", "a", "a"]);
    let second = FieldMask::new(["a", "b.x"]);

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(first.contains("b.x"));
    assert!(!first.contains("b"));
}

#[test]
fn test_field_mask_deserializes_from_list() {
    let mask: FieldMask = serde_json::from_value(json!(["c.d", "a", "c.d"])).unwrap();

    assert_eq!(mask.iter().collect::<Vec<_>>(), vec!["a", "c.d"]);
}

#[test]
fn test_empty_mask() {
    let mask = FieldMask::default();

    assert!(mask.is_empty());
    assert!(!mask.tree().has_children());
}

#[test]
fn test_tree_splits_paths_per_level() {
    let tree = FieldMask::new(["a", "b.x", "b.y.z"]).tree();

    assert!(tree.selects("a"));
    assert!(!tree.selects("b"));

    let b = tree.child("b").unwrap();
    assert!(!b.is_terminal());
    assert!(b.selects("x"));
    assert!(!b.selects("y"));
    assert!(b.child("y").unwrap().selects("z"));
    assert_eq!(
        b.children().map(|(name, _)| name).collect::<Vec<_>>(),
        vec!["x", "y"]
    );
}

#[test]
fn test_tree_node_can_be_terminal_and_have_children() {
    let tree = FieldMask::new(["b", "b.x"]).tree();
    let b = tree.child("b").unwrap();

    assert!(b.is_terminal());
    assert!(b.has_children());
}

#[test]
fn test_join_path() {
    assert_eq!(join_path("", "a"), "a");
    assert_eq!(join_path("c", "d"), "c.d");
    assert_eq!(join_path("c.d", "*"), "c.d.*");
}
