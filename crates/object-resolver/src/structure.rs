//! Equality, filtering and pruning over whole trees.

use std::collections::BTreeMap;

use crate::{FilterError, Node};

/// Structural equality under the JSON projection of both sides.
///
/// Two nodes are equal when [`Node::to_json_value`] would render them
/// identically, but no intermediate values are built: `Void` and `Function`
/// entries are ignored in mappings and equal `Null` in sequences, and byte
/// buffers equal sequences of the same byte numbers. Mapping keys are kept
/// sorted, so insertion order never matters.
///
/// ```
/// # use object_resolver::{is_equal, Node};
/// let a = Node::from_json_str("{\"a\":1,\"b\":{\"c\":2}}")?;
/// let b = Node::from_json_str("{\"b\":{\"c\":2},\"a\":1}")?;
/// assert!(is_equal(&a, &b));
/// assert!(!is_equal(&Node::from_json_str("{}")?, &Node::from_json_str("[]")?));
/// # Ok::<(), object_resolver::CanonicalizeError>(())
/// ```
#[must_use]
pub fn is_equal(lhs: &Node, rhs: &Node) -> bool {
    match (lhs, rhs) {
        (a, b) if !is_json_visible(a) || !is_json_visible(b) => {
            !is_json_visible(a) && !is_json_visible(b)
        }
        (Node::Null, Node::Null) => true,
        (Node::Bool(a), Node::Bool(b)) => a == b,
        (Node::Number(a), Node::Number(b)) => a == b,
        (Node::String(a), Node::String(b)) => a == b,
        (Node::Bytes(a), Node::Bytes(b)) => a == b,
        (Node::Bytes(bytes), Node::Array(items)) | (Node::Array(items), Node::Bytes(bytes)) => {
            bytes.len() == items.len()
                && bytes.iter().zip(items).all(|(byte, item)| {
                    matches!(item, Node::Number(n) if n.get() == f64::from(*byte))
                })
        }
        (Node::Array(a), Node::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| slot_equal(x, y))
        }
        (Node::Object(a), Node::Object(b)) => {
            let mut lhs_entries = a.iter().filter(|(_, value)| is_json_visible(value));
            let mut rhs_entries = b.iter().filter(|(_, value)| is_json_visible(value));
            loop {
                match (lhs_entries.next(), rhs_entries.next()) {
                    (None, None) => return true,
                    (Some((ka, va)), Some((kb, vb))) if ka == kb && is_equal(va, vb) => {}
                    _ => return false,
                }
            }
        }
        _ => false,
    }
}

fn is_json_visible(node: &Node) -> bool {
    !matches!(node, Node::Void | Node::Function(_))
}

// Sequence slots render invisible values as `null`.
fn slot_equal(lhs: &Node, rhs: &Node) -> bool {
    match (is_json_visible(lhs), is_json_visible(rhs)) {
        (true, true) => is_equal(lhs, rhs),
        (false, false) => true,
        (false, true) => matches!(rhs, Node::Null),
        (true, false) => matches!(lhs, Node::Null),
    }
}

/// Returns a new mapping holding the entries of `node` whose value satisfies
/// `predicate`. Non-mapping input yields an empty mapping.
///
/// ```
/// # use object_resolver::{filter_object, Node};
/// let node = Node::from_json_str("{\"a\":1,\"b\":2,\"c\":3}")?;
/// let even = filter_object(&node, |value| {
///     matches!(value, Node::Number(n) if n.get() % 2.0 == 0.0)
/// });
/// assert_eq!(even, Node::from_json_str("{\"b\":2}")?);
/// # Ok::<(), object_resolver::CanonicalizeError>(())
/// ```
#[must_use]
pub fn filter_object<F>(node: &Node, mut predicate: F) -> Node
where
    F: FnMut(&Node) -> bool,
{
    let Node::Object(map) = node else {
        return Node::Object(BTreeMap::new());
    };
    Node::Object(
        map.iter()
            .filter(|(_, value)| predicate(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

/// [`filter_object`] driven by a dynamically supplied predicate.
///
/// Entries are kept when the function's result is truthy.
///
/// # Errors
///
/// [`FilterError::NotCallable`] when `predicate` is not a
/// [`Node::Function`], regardless of `node`.
pub fn filter_object_by(node: &Node, predicate: &Node) -> Result<Node, FilterError> {
    let Node::Function(function) = predicate else {
        return Err(FilterError::NotCallable { found: predicate.type_name() });
    };
    Ok(filter_object(node, |value| function.call(value).is_truthy()))
}

/// Rebuilds `node` without mapping entries holding [`Node::Void`], at any
/// depth. Sequence slots are kept as they are; the input is not modified.
///
/// ```
/// # use object_resolver::{remove_undefined_properties, Node};
/// let node = Node::object([
///     ("a", Node::from(1)),
///     ("b", Node::object([("d", Node::Void), ("e", Node::from(2))])),
///     ("c", Node::Void),
/// ]);
/// let expected = Node::object([("a", Node::from(1)), ("b", Node::object([("e", Node::from(2))]))]);
/// assert_eq!(remove_undefined_properties(&node), expected);
/// ```
#[must_use]
pub fn remove_undefined_properties(node: &Node) -> Node {
    match node {
        Node::Object(map) => Node::Object(
            map.iter()
                .filter(|(_, value)| !value.is_void())
                .map(|(key, value)| (key.clone(), remove_undefined_properties(value)))
                .collect(),
        ),
        Node::Array(items) => Node::Array(items.iter().map(remove_undefined_properties).collect()),
        other => other.clone(),
    }
}
