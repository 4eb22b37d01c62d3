mod common;

use common::{arb_node, arb_node_with_void, init_tracing, json};
use object_resolver::{
    clone_object, clone_structure, clone_structure_with, is_equal, set_nested_property, CloneError,
    CloneOptions, NativeFunction, Node, Path,
};
use proptest::prelude::*;

fn function(name: &str) -> Node {
    Node::from(NativeFunction::new(name, |_| Node::Null))
}

#[test]
fn clone_object_copies_plain_documents() {
    for input in ["{}", "null", r#"{"a":1}"#, r#"{"a":{"b":2},"c":3}"#, "[1,[2,3]]", r#""text""#] {
        let data = json(input);
        assert_eq!(clone_object(&data), data, "{input}");
    }
    assert_eq!(clone_object(&Node::Void), Node::Void);
}

#[test]
fn clone_object_is_independent_of_its_source() {
    let data = json(r#"{"a":{"b":2},"c":3}"#);
    let mut copy = clone_object(&data);
    set_nested_property(&mut copy, "a.b", Node::from(20)).unwrap();
    assert_eq!(data, json(r#"{"a":{"b":2},"c":3}"#));
    assert_eq!(copy, json(r#"{"a":{"b":20},"c":3}"#));
}

#[test]
fn clone_object_drops_what_json_cannot_hold() {
    let data = Node::object([
        ("a", json(r#"{"b":2}"#)),
        ("c", Node::from(3)),
        ("d", Node::Null),
        ("e", Node::Void),
        ("f", function("f")),
        ("list", Node::array([Node::Void, function("g"), Node::from(1)])),
        ("raw", Node::Bytes(vec![1, 2])),
    ]);
    let expected = json(r#"{"a":{"b":2},"c":3,"d":null,"list":[null,null,1],"raw":[1,2]}"#);
    assert_eq!(clone_object(&data), expected);
    assert!(is_equal(&clone_object(&data), &data));
}

#[test]
fn clone_structure_preserves_everything_but_functions() {
    assert_eq!(clone_structure(&Node::Void).unwrap(), Node::Void);
    assert_eq!(clone_structure(&Node::Null).unwrap(), Node::Null);

    let data = Node::object([
        ("a", Node::from(1)),
        ("e", Node::Void),
        ("raw", Node::Bytes(vec![9, 8, 7])),
        ("list", Node::array([Node::Void, Node::from("x")])),
    ]);
    assert_eq!(clone_structure(&data).unwrap(), data);
}

#[test]
fn clone_structure_names_the_offending_function() {
    let data = Node::object([("handlers", Node::object([("on_save", function("save"))]))]);
    let err = clone_structure(&data).unwrap_err();
    assert_eq!(err, CloneError::NotCloneable { path: Path::parse("handlers.on_save"), kind: "function" });

    let err = clone_structure(&function("root")).unwrap_err();
    assert_eq!(err, CloneError::NotCloneable { path: Path::new(), kind: "function" });
}

#[test]
fn transfer_moves_buffers_into_the_copy() {
    init_tracing();
    let mut source = json(r#"{"meta":{"name":"frame"}}"#);
    set_nested_property(&mut source, "meta.pixels", Node::Bytes(vec![255; 16])).unwrap();
    set_nested_property(&mut source, "meta.thumb", Node::Bytes(vec![1, 2])).unwrap();

    let opts = CloneOptions::default().with_transfer(["meta.pixels"]).unwrap();
    let copy = clone_structure_with(&mut source, &opts).unwrap();

    assert_eq!(copy.lookup(&Path::parse("meta.pixels")), Some(&Node::Bytes(vec![255; 16])));
    assert_eq!(source.lookup(&Path::parse("meta.pixels")), Some(&Node::Bytes(Vec::new())));
    assert_eq!(source.lookup(&Path::parse("meta.thumb")), Some(&Node::Bytes(vec![1, 2])));
    assert_eq!(copy.lookup(&Path::parse("meta.thumb")), Some(&Node::Bytes(vec![1, 2])));
}

#[test]
fn transfer_targets_must_exist_and_be_buffers() {
    let mut source = json(r#"{"a":[1,2],"b":"text"}"#);
    let before = source.clone();

    let opts = CloneOptions::default().with_transfer(["missing"]).unwrap();
    let err = clone_structure_with(&mut source, &opts).unwrap_err();
    assert_eq!(err, CloneError::TransferNotFound { path: Path::parse("missing") });

    let opts = CloneOptions::default().with_transfer(["a"]).unwrap();
    let err = clone_structure_with(&mut source, &opts).unwrap_err();
    assert_eq!(err, CloneError::NotTransferable { path: Path::parse("a"), kind: "array" });

    assert_eq!(source, before);
}

#[test]
fn functions_block_transfer_before_anything_moves() {
    let mut source = Node::object([("raw", Node::Bytes(vec![1])), ("f", function("f"))]);
    let opts = CloneOptions::default().with_transfer(["raw"]).unwrap();
    let err = clone_structure_with(&mut source, &opts).unwrap_err();
    assert!(matches!(err, CloneError::NotCloneable { .. }));
    assert_eq!(source.lookup(&Path::parse("raw")), Some(&Node::Bytes(vec![1])));
}

#[test]
fn one_buffer_cannot_be_transferred_twice() {
    let mut source = Node::object([("list", Node::array([Node::Bytes(vec![1, 2, 3])]))]);
    let before = source.clone();

    let opts = CloneOptions::default().with_transfer(["list.0", "list.[0]"]).unwrap();
    let err = clone_structure_with(&mut source, &opts).unwrap_err();
    assert!(matches!(err, CloneError::DuplicateTransfer { .. }), "{err}");
    assert_eq!(source, before);

    let loaded = serde_json::from_str::<CloneOptions>(r#"{"transfer":["list.0","list.0"]}"#);
    assert!(loaded.is_err());

    let opts = CloneOptions::default().with_transfer(["list.0"]).unwrap();
    let copy = clone_structure_with(&mut source, &opts).unwrap();
    assert_eq!(copy.lookup(&Path::parse("list.0")), Some(&Node::Bytes(vec![1, 2, 3])));
}

#[test]
fn transfer_options_load_from_yaml() {
    let opts: CloneOptions = serde_yaml::from_str("transfer:\n  - a.raw\n  - [b, raw]\n").unwrap();
    assert_eq!(opts.transfer(), [Path::parse("a.raw"), Path::parse("b.raw")]);
}

proptest! {
    #[test]
    fn clone_object_matches_json_projection(node in arb_node_with_void()) {
        let copy = clone_object(&node);
        prop_assert_eq!(copy.to_json_value(), node.to_json_value());
        prop_assert!(is_equal(&copy, &node));
    }

    #[test]
    fn clone_object_is_identity_on_json_documents(node in arb_node()) {
        prop_assert_eq!(clone_object(&node), node);
    }

    #[test]
    fn clone_structure_is_lossless_without_functions(node in arb_node_with_void()) {
        prop_assert_eq!(clone_structure(&node).unwrap(), node);
    }
}
