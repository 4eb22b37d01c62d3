//! Reading, testing, assigning and removing values by path.
//!
//! All four operations share the own-entry walk of [`Node::lookup`]: a
//! mapping resolves a segment by its full text, a sequence by
//! [`PathSegment::sequence_index`]. Only assignment reports errors; the other
//! operations treat unresolvable paths as ordinary outcomes.

use std::collections::BTreeMap;

use crate::{Node, Path, PathError, PathSegment};

/// Returns the value at `path`, or `default` when it is missing or
/// [`Node::Void`].
///
/// An empty path always yields `default`.
///
/// ```
/// # use object_resolver::{get_nested_property, Node};
/// let root = Node::from_json_str("{\"a\":1,\"b\":{\"bb\":2,\"bbb\":{\"ccc\":3}}}")?;
/// assert_eq!(get_nested_property(&root, "b.bbb.ccc", &Node::Void), &Node::from(3));
/// assert_eq!(get_nested_property(&root, "b.zzz", &Node::from(2)), &Node::from(2));
/// # Ok::<(), object_resolver::CanonicalizeError>(())
/// ```
pub fn get_nested_property<'a, P>(root: &'a Node, path: P, default: &'a Node) -> &'a Node
where
    P: Into<Path>,
{
    let path = path.into();
    if path.is_empty() {
        return default;
    }
    match root.lookup(&path) {
        Some(found) if !found.is_void() => found,
        _ => default,
    }
}

/// Reports whether every segment of `path` resolves to an own entry.
///
/// The terminal value does not matter: a key holding [`Node::Void`] exists.
///
/// ```
/// # use object_resolver::{has_nested_property, Node};
/// let root = Node::object([("a", Node::Void)]);
/// assert!(has_nested_property(&root, "a"));
/// assert!(!has_nested_property(&root, "b"));
/// assert!(!has_nested_property(&root, ""));
/// ```
pub fn has_nested_property<P>(root: &Node, path: P) -> bool
where
    P: Into<Path>,
{
    let path = path.into();
    !path.is_empty() && root.lookup(&path).is_some()
}

/// Assigns `value` at `path`, creating intermediate mappings as needed.
///
/// Inside a mapping the full segment text is used as key, so
/// `"profile[0]"` creates a literal `profile[0]` entry. Inside a sequence the
/// segment must be an index; shorter sequences are padded with
/// [`Node::Null`]. Slots on the way that are not containers are replaced by
/// empty mappings.
///
/// # Errors
///
/// * [`PathError::InvalidKey`] when any segment is reserved. Checked before
///   the tree is touched.
/// * [`PathError::InvalidPath`] when the path is empty, a segment meets a
///   sequence it cannot index, or padding up to an index cannot be
///   allocated. The tree is left unchanged in all cases.
///
/// ```
/// # use object_resolver::{set_nested_property, Node, PathError};
/// let mut root = Node::from_json_str("{}")?;
/// set_nested_property(&mut root, "user.profile.name", Node::from("Jane Doe"))?;
/// assert_eq!(root, Node::from_json_str("{\"user\":{\"profile\":{\"name\":\"Jane Doe\"}}}")?);
///
/// let err = set_nested_property(&mut root, "__proto__.polluted", Node::from("yes")).unwrap_err();
/// assert!(matches!(err, PathError::InvalidKey { .. }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn set_nested_property<P>(root: &mut Node, path: P, value: Node) -> Result<(), PathError>
where
    P: Into<Path>,
{
    let path = path.into();
    if let Some(segment) = path.segments().iter().find(|segment| segment.is_reserved()) {
        tracing::debug!(%path, %segment, "rejected reserved path segment");
        return Err(PathError::InvalidKey { key: segment.as_str().to_owned() });
    }
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(PathError::InvalidPath { reason: "path has no segments".to_owned() });
    };
    check_sequence_steps(root, path.segments())?;

    let mut current = root;
    for segment in parents {
        current = slot_for(current, segment)?;
    }
    *slot_for(current, last)? = value;
    Ok(())
}

/// Removes the value at `path`.
///
/// Elements removed from a sequence shift the following elements left.
/// Missing targets, non-container parents and empty paths are no-ops.
///
/// ```
/// # use object_resolver::{delete_nested_property, Node};
/// let mut root = Node::from_json_str("{\"user\":{\"profile\":{\"name\":\"John Doe\"}}}")?;
/// delete_nested_property(&mut root, "user.profile.name");
/// assert_eq!(root, Node::from_json_str("{\"user\":{\"profile\":{}}}")?);
/// # Ok::<(), object_resolver::CanonicalizeError>(())
/// ```
pub fn delete_nested_property<P>(root: &mut Node, path: P)
where
    P: Into<Path>,
{
    let path = path.into();
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let parent = parents.iter().try_fold(root, |current, segment| current.child_mut(segment));
    let removed = match parent {
        Some(Node::Object(map)) => map.remove(last.as_str()).is_some(),
        Some(Node::Array(items)) => match last.sequence_index() {
            Some(index) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        },
        _ => false,
    };
    if !removed {
        tracing::trace!(%path, "nothing to delete");
    }
}

/// Follows `key` through nested mappings and returns the first value that is
/// not itself a mapping.
///
/// Returns `None` when `root` is not a mapping or any mapping on the way
/// lacks `key`.
///
/// ```
/// # use object_resolver::{fetch_last_nested_property, Node};
/// let root = Node::from_json_str("{\"role\":{\"role\":{\"role\":\"student\"}}}")?;
/// assert_eq!(fetch_last_nested_property(&root, "role"), Some(&Node::from("student")));
///
/// let broken = Node::from_json_str("{\"role\":{\"name\":{\"role\":\"student\"}}}")?;
/// assert_eq!(fetch_last_nested_property(&broken, "role"), None);
/// # Ok::<(), object_resolver::CanonicalizeError>(())
/// ```
pub fn fetch_last_nested_property<'a>(root: &'a Node, key: &str) -> Option<&'a Node> {
    let mut current = root.as_object()?.get(key)?;
    while let Node::Object(map) = current {
        current = map.get(key)?;
    }
    Some(current)
}

// Walks the existing part of the path and rejects segments that would have
// to index an existing sequence but cannot, so a failing assignment never
// leaves partial writes behind. Only sequences that already exist get
// padded, so a failed reservation in `slot_for` happens before any write.
fn check_sequence_steps(root: &Node, segments: &[PathSegment]) -> Result<(), PathError> {
    let mut current = Some(root);
    for segment in segments {
        let Some(node) = current else {
            return Ok(());
        };
        if let Node::Array(items) = node {
            let index = sequence_index(segment)?;
            if index >= items.len() {
                padded_len(index, segment)?;
            }
        }
        current = node.child(segment);
    }
    Ok(())
}

fn sequence_index(segment: &PathSegment) -> Result<usize, PathError> {
    segment.sequence_index().ok_or_else(|| PathError::InvalidPath {
        reason: format!("segment `{segment}` cannot address a sequence element"),
    })
}

fn padded_len(index: usize, segment: &PathSegment) -> Result<usize, PathError> {
    index.checked_add(1).ok_or_else(|| PathError::InvalidPath {
        reason: format!("segment `{segment}` is too large to index a sequence"),
    })
}

fn slot_for<'a>(container: &'a mut Node, segment: &PathSegment) -> Result<&'a mut Node, PathError> {
    match container {
        Node::Array(items) => {
            let index = sequence_index(segment)?;
            if index >= items.len() {
                let len = padded_len(index, segment)?;
                items.try_reserve_exact(len - items.len()).map_err(|err| PathError::InvalidPath {
                    reason: format!("segment `{segment}` cannot pad the sequence: {err}"),
                })?;
                tracing::trace!(%segment, from = items.len(), to = len, "padding sequence");
                items.resize(len, Node::Null);
            }
            items.get_mut(index).ok_or_else(|| PathError::InvalidPath {
                reason: format!("segment `{segment}` is out of range"),
            })
        }
        Node::Object(map) => Ok(map.entry(segment.as_str().to_owned()).or_insert(Node::Void)),
        other => {
            tracing::trace!(%segment, replaced = other.type_name(), "replacing non-container with mapping");
            *other = Node::Object(BTreeMap::new());
            slot_for(other, segment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(input: &str) -> Node {
        Node::from_json_str(input).unwrap()
    }

    #[test]
    fn sequence_step_check_stops_at_missing_entries() {
        let root = json("{\"a\":[{}]}");
        assert!(check_sequence_steps(&root, Path::parse("a.0.b.c").segments()).is_ok());
        assert!(check_sequence_steps(&root, Path::parse("a.x").segments()).is_err());
    }

    #[test]
    fn slot_for_pads_with_null() {
        let mut node = json("[1]");
        *slot_for(&mut node, &PathSegment::new("3")).unwrap() = Node::from(4);
        assert_eq!(node, json("[1,null,null,4]"));
    }

    #[test]
    fn slot_for_reports_unallocatable_padding() {
        let mut node = json("[1]");
        let err = slot_for(&mut node, &PathSegment::new((usize::MAX / 2).to_string())).unwrap_err();
        assert!(matches!(err, PathError::InvalidPath { .. }));
        assert_eq!(node, json("[1]"));
    }

    #[test]
    fn slot_for_replaces_scalars() {
        let mut node = Node::from(7);
        *slot_for(&mut node, &PathSegment::new("k")).unwrap() = Node::Null;
        assert_eq!(node, json("{\"k\":null}"));
    }
}
