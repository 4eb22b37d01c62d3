//! Deep copies.
//!
//! [`clone_object`] reproduces a JSON round trip as an explicit tree walk and
//! is lossy. [`clone_structure`] keeps everything a tree can
//! hold except live functions, which it refuses.

use std::collections::HashMap;

use crate::{CloneError, CloneOptions, Node, Number, Path, PathSegment};

/// Copies the JSON-representable part of `node`.
///
/// * `Void` and `Function` entries are dropped from mappings and become
///   `Null` inside sequences; at the root they yield `Void`.
/// * Byte buffers become sequences of numbers.
///
/// ```
/// # use object_resolver::{clone_object, Node};
/// let original = Node::object([("c", Node::from(3)), ("e", Node::Void)]);
/// assert_eq!(clone_object(&original), Node::object([("c", Node::from(3))]));
/// ```
#[must_use]
pub fn clone_object(node: &Node) -> Node {
    json_copy(node).unwrap_or(Node::Void)
}

fn json_copy(node: &Node) -> Option<Node> {
    match node {
        Node::Void | Node::Function(_) => None,
        Node::Bytes(bytes) => {
            Some(Node::Array(bytes.iter().map(|byte| Node::Number(Number::from(*byte))).collect()))
        }
        Node::Array(items) => {
            Some(Node::Array(items.iter().map(|item| json_copy(item).unwrap_or(Node::Null)).collect()))
        }
        Node::Object(map) => Some(Node::Object(
            map.iter().filter_map(|(key, value)| Some((key.clone(), json_copy(value)?))).collect(),
        )),
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => Some(node.clone()),
    }
}

/// Produces a full-fidelity copy of `node`.
///
/// `Void` entries, byte buffers and key presence survive unchanged.
///
/// # Errors
///
/// [`CloneError::NotCloneable`] naming the first function found, depth first.
///
/// ```
/// # use object_resolver::{clone_structure, CloneError, NativeFunction, Node};
/// let data = Node::object([("raw", Node::Bytes(vec![1, 2])), ("gap", Node::Void)]);
/// assert_eq!(clone_structure(&data)?, data);
///
/// let live = Node::object([("f", Node::from(NativeFunction::new("f", Node::clone)))]);
/// assert!(matches!(clone_structure(&live), Err(CloneError::NotCloneable { .. })));
/// # Ok::<(), CloneError>(())
/// ```
pub fn clone_structure(node: &Node) -> Result<Node, CloneError> {
    ensure_cloneable(node, &mut Path::new())?;
    Ok(node.clone())
}

/// [`clone_structure`] with a transfer list.
///
/// Every transfer path must resolve to a [`Node::Bytes`]. Those buffers are
/// moved into the copy and the source keeps an empty, detached buffer in
/// their place. Nothing moves unless the whole call succeeds.
///
/// # Errors
///
/// [`CloneError::NotCloneable`], [`CloneError::TransferNotFound`],
/// [`CloneError::NotTransferable`] or [`CloneError::DuplicateTransfer`] when
/// two entries reach the same buffer.
///
/// ```
/// # use object_resolver::{clone_structure_with, CloneOptions, Node};
/// let mut source = Node::object([("raw", Node::Bytes(vec![7; 4]))]);
/// let opts = CloneOptions::default().with_transfer(["raw"])?;
/// let copy = clone_structure_with(&mut source, &opts)?;
/// assert_eq!(copy, Node::object([("raw", Node::Bytes(vec![7; 4]))]));
/// assert_eq!(source, Node::object([("raw", Node::Bytes(Vec::new()))]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn clone_structure_with(node: &mut Node, options: &CloneOptions) -> Result<Node, CloneError> {
    ensure_cloneable(node, &mut Path::new())?;
    // Distinct paths such as `list.0` and `list.[0]` can reach the same
    // buffer, so entries are told apart by the node they resolve to.
    let mut claimed: HashMap<*const Node, &Path> = HashMap::with_capacity(options.transfer().len());
    for path in options.transfer() {
        let buffer = match node.lookup(path) {
            Some(found @ Node::Bytes(_)) => found,
            Some(other) => {
                return Err(CloneError::NotTransferable { path: path.clone(), kind: other.type_name() });
            }
            None => return Err(CloneError::TransferNotFound { path: path.clone() }),
        };
        if let Some(first) = claimed.insert(std::ptr::from_ref(buffer), path) {
            return Err(CloneError::DuplicateTransfer { path: path.clone(), first: first.clone() });
        }
    }

    let mut detached = Vec::with_capacity(options.transfer().len());
    for path in options.transfer() {
        if let Some(Node::Bytes(buffer)) = node.lookup_mut(path) {
            detached.push((path, std::mem::take(buffer)));
        }
    }

    let mut copy = node.clone();
    for (path, buffer) in detached {
        if let Some(slot) = copy.lookup_mut(path) {
            tracing::debug!(%path, bytes = buffer.len(), "transferred buffer");
            *slot = Node::Bytes(buffer);
        }
    }
    Ok(copy)
}

fn ensure_cloneable(node: &Node, at: &mut Path) -> Result<(), CloneError> {
    match node {
        Node::Function(_) => Err(CloneError::NotCloneable { path: at.clone(), kind: node.type_name() }),
        Node::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                at.push(PathSegment::new(index.to_string()));
                ensure_cloneable(item, at)?;
                at.pop();
            }
            Ok(())
        }
        Node::Object(map) => {
            for (key, value) in map {
                at.push(PathSegment::new(key.as_str()));
                ensure_cloneable(value, at)?;
                at.pop();
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
