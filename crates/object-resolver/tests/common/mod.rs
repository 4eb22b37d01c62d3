#![allow(dead_code)]

use std::sync::Once;

use object_resolver::{Node, Path};
use proptest::{
    collection::{btree_map, vec},
    prelude::*,
    string::string_regex,
};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-writer subscriber once per test binary, filtered by
/// `RUST_LOG` (defaults to `warn`).
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt().with_test_writer().with_env_filter(filter).with_target(false).init();
    });
}

pub fn json(input: &str) -> Node {
    Node::from_json_str(input).expect("test JSON parses")
}

pub fn arb_json_value() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        proptest::num::f64::ANY.prop_filter_map("finite", |f| {
            if f.is_finite() {
                serde_json::Number::from_f64(f).map(serde_json::Value::Number)
            } else {
                None
            }
        }),
        string_regex("[a-zA-Z0-9]{0,6}").unwrap().prop_map(serde_json::Value::String),
    ];

    leaf.prop_recursive(3, 6, 4, move |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            btree_map(string_regex("[a-c0-2]{1,2}").unwrap(), inner, 0..4).prop_map(|map| {
                let mut object = serde_json::Map::new();
                for (k, v) in map {
                    object.insert(k, v);
                }
                serde_json::Value::Object(object)
            }),
        ]
    })
}

/// JSON-representable trees.
pub fn arb_node() -> impl Strategy<Value = Node> {
    arb_json_value().prop_map(|value| Node::from_json_value(value).expect("finite numbers only"))
}

/// Trees that may also hold `Void` and byte buffers anywhere.
pub fn arb_node_with_void() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Node::Void),
        Just(Node::Null),
        any::<bool>().prop_map(Node::Bool),
        any::<i32>().prop_map(Node::from),
        string_regex("[a-z]{0,4}").unwrap().prop_map(Node::String),
        vec(any::<u8>(), 0..4).prop_map(Node::Bytes),
    ];

    leaf.prop_recursive(3, 6, 4, move |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Node::Array),
            btree_map(string_regex("[a-c0-2]{1,2}").unwrap(), inner, 0..4).prop_map(Node::Object),
        ]
    })
}

/// Short paths over the same key alphabet as the generated trees, so that
/// lookups hit existing entries reasonably often.
pub fn arb_path() -> impl Strategy<Value = Path> {
    vec(string_regex("[a-c0-2]{1,2}").unwrap(), 1..4).prop_map(Path::from)
}
