//! Fuzzing harnesses for `object-resolver`.
//!
//! Each public function accepts raw bytes, builds trees and paths from them
//! with [`arbitrary`], and asserts the properties the library promises.
//! Recoverable errors are expected and ignored; a panic is a finding.
//!
//! ```
//! object_resolver_fuzz::fuzz_path_parsing(b"user.profile[0].name");
//! object_resolver_fuzz::fuzz_access(&[1, 2, 3, 4]);
//! object_resolver_fuzz::fuzz_clone(b"clone");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use object_resolver::path::RESERVED_KEYS;
use object_resolver::{
    clone_object, clone_structure, clone_structure_with, delete_nested_property,
    get_nested_property, has_nested_property, is_equal, remove_undefined_properties,
    set_nested_property, CloneOptions, Node, Path, PathError, PathSegment,
};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 5;
const MAX_OBJECT_LEN: u8 = 5;
const MAX_BYTES_LEN: u8 = 8;
const MAX_PATH_LEN: u8 = 4;

// Small alphabet so generated paths frequently meet generated keys. Indices
// stay below 34, which bounds sequence padding.
const KEY_CHARS: &[u8] = b"ab0123[]";
const MAX_KEY_LEN: u8 = 2;

/// Parses raw text as a dotted path and checks the segment decomposition.
///
/// ```
/// object_resolver_fuzz::fuzz_path_parsing(b"a..b[12]");
/// ```
pub fn fuzz_path_parsing(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let path = Path::parse(text);
    if text.is_empty() {
        assert!(path.is_empty());
        return;
    }
    assert_eq!(path.len(), text.split('.').count());
    assert_eq!(path.to_string(), text);
    for segment in &path {
        if let Some(index) = segment.sequence_index() {
            let bare = segment.subscript().is_some() && segment.base().is_empty();
            assert!(bare || segment.as_str() == index.to_string());
        }
    }
}

/// Runs get/has/set/delete against a random tree and random paths.
///
/// ```
/// object_resolver_fuzz::fuzz_access(b"access");
/// ```
pub fn fuzz_access(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(mut root) = random_node(&mut unstructured, 0) else {
        return;
    };
    let Ok(path) = random_path(&mut unstructured) else {
        return;
    };
    let default = Node::from("default");

    if !has_nested_property(&root, &path) {
        assert_eq!(get_nested_property(&root, &path, &default), &default);
        let before = root.clone();
        delete_nested_property(&mut root, &path);
        assert_eq!(root, before);
    }

    let before = root.clone();
    match set_nested_property(&mut root, &path, Node::from(7)) {
        Ok(()) => assert_eq!(get_nested_property(&root, &path, &default), &Node::from(7)),
        Err(PathError::InvalidKey { key }) => {
            assert!(PathSegment::new(key).is_reserved());
            assert_eq!(root, before);
        }
        Err(PathError::InvalidPath { .. }) => assert_eq!(root, before),
    }

    delete_nested_property(&mut root, &path);
}

/// Clones a random tree every way the library offers.
///
/// ```
/// object_resolver_fuzz::fuzz_clone(&[9, 9, 9]);
/// ```
pub fn fuzz_clone(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(mut node) = random_node(&mut unstructured, 0) else {
        return;
    };

    assert!(is_equal(&clone_object(&node), &node));
    assert!(is_equal(&remove_undefined_properties(&node), &node));
    if let Ok(copy) = clone_structure(&node) {
        assert_eq!(copy, node);
    }

    let Ok(transfer) = random_path(&mut unstructured) else {
        return;
    };
    let Ok(opts) = CloneOptions::default().with_transfer([transfer.clone()]) else {
        return;
    };
    let before = node.clone();
    match clone_structure_with(&mut node, &opts) {
        Ok(copy) => {
            assert_eq!(copy.lookup(&transfer), before.lookup(&transfer));
            assert_eq!(node.lookup(&transfer), Some(&Node::Bytes(Vec::new())));
        }
        Err(_) => assert_eq!(node, before),
    }
}

fn random_node(unstructured: &mut Unstructured<'_>, depth: usize) -> Result<Node, arbitrary::Error> {
    let upper = if depth >= MAX_DEPTH { 5 } else { 7 };
    match unstructured.int_in_range::<u8>(0..=upper)? {
        0 => Ok(Node::Void),
        1 => Ok(Node::Null),
        2 => Ok(Node::Bool(unstructured.arbitrary()?)),
        3 => Ok(Node::from(unstructured.arbitrary::<i32>()?)),
        4 => Ok(Node::String(random_key(unstructured)?)),
        5 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_BYTES_LEN)?);
            Ok(Node::Bytes(unstructured.bytes(len)?.to_vec()))
        }
        6 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(random_node(unstructured, depth + 1)?);
            }
            Ok(Node::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut entries = Vec::with_capacity(len);
            for _ in 0..len {
                entries.push((random_key(unstructured)?, random_node(unstructured, depth + 1)?));
            }
            Ok(Node::object(entries))
        }
    }
}

fn random_path(unstructured: &mut Unstructured<'_>) -> Result<Path, arbitrary::Error> {
    let len = unstructured.int_in_range::<u8>(1..=MAX_PATH_LEN)?;
    let mut path = Path::new();
    for _ in 0..len {
        let text = if unstructured.ratio(1, 16)? {
            (*unstructured.choose(&RESERVED_KEYS)?).to_owned()
        } else {
            random_key(unstructured)?
        };
        path.push(PathSegment::new(text));
    }
    Ok(path)
}

fn random_key(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_KEY_LEN)?);
    let mut key = String::with_capacity(len);
    for _ in 0..len {
        key.push(char::from(*unstructured.choose(KEY_CHARS)?));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parsing_handles_brackets() {
        fuzz_path_parsing(b"a.[3].b[0]");
        fuzz_path_parsing(b"");
    }

    #[test]
    fn access_harness_runs() {
        fuzz_access(b"access");
        fuzz_access(&[7; 64]);
    }

    #[test]
    fn clone_harness_runs() {
        fuzz_clone(b"clone");
        fuzz_clone(&[6, 0, 5, 3, 1, 2, 3]);
    }
}
