//! Benchmark corpora for `object-resolver`.
//!
//! Documents are generated rather than loaded so that every run measures the
//! same shapes. Each [`Corpus`] yields a [`Dataset`]: the document plus the
//! paths of all its leaves, which the benchmarks resolve, rewrite and delete.
//!
//! ```
//! let corpus = &object_resolver_benches::available_corpora()[0];
//! let dataset = corpus.load();
//! assert!(!dataset.leaf_paths().is_empty());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use object_resolver::{Node, Path, PathSegment};

/// A named document generator.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    build: fn() -> Node,
}

impl Corpus {
    /// Identifier used as the benchmark parameter.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Generates the document and collects its leaf paths.
    #[must_use]
    pub fn load(&self) -> Dataset {
        let document = (self.build)();
        let mut leaf_paths = Vec::new();
        collect_leaves(&document, &mut Path::new(), &mut leaf_paths);
        Dataset { document, leaf_paths }
    }
}

/// A generated document together with every path that reaches a leaf.
#[derive(Clone, Debug)]
pub struct Dataset {
    document: Node,
    leaf_paths: Vec<Path>,
}

impl Dataset {
    /// The generated tree.
    #[must_use]
    pub fn document(&self) -> &Node {
        &self.document
    }

    /// Paths of all scalar leaves, depth first.
    #[must_use]
    pub fn leaf_paths(&self) -> &[Path] {
        &self.leaf_paths
    }
}

const CORPORA: &[Corpus] = &[
    Corpus { name: "wide-config", build: wide_config },
    Corpus { name: "deep-chain", build: deep_chain },
    Corpus { name: "record-list", build: record_list },
];

/// All registered corpora.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    CORPORA
}

// 64 sections of 16 settings each.
fn wide_config() -> Node {
    Node::object((0..64).map(|section| {
        let settings = (0..16).map(|key| (format!("key{key}"), Node::from(section * 16 + key)));
        (format!("section{section}"), Node::object(settings))
    }))
}

// A single 48-level chain of mappings ending in a string.
fn deep_chain() -> Node {
    (0..48).rev().fold(Node::from("bottom"), |inner, level| {
        Node::object([(format!("level{level}"), inner)])
    })
}

// 256 user records inside a sequence, with a byte payload each.
fn record_list() -> Node {
    let records = (0..256u32).map(|id| {
        Node::object([
            ("id", Node::from(id)),
            ("name", Node::from(format!("user-{id}"))),
            ("active", Node::Bool(id % 3 != 0)),
            ("avatar", Node::Bytes(vec![0; 32])),
            ("tags", Node::array([Node::from("a"), Node::from("b")])),
        ])
    });
    Node::object([("users", Node::array(records))])
}

fn collect_leaves(node: &Node, at: &mut Path, out: &mut Vec<Path>) {
    match node {
        Node::Object(map) => {
            for (key, value) in map {
                at.push(PathSegment::new(key.as_str()));
                collect_leaves(value, at, out);
                at.pop();
            }
        }
        Node::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                at.push(PathSegment::new(index.to_string()));
                collect_leaves(item, at, out);
                at.pop();
            }
        }
        _ => out.push(at.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_resolver::has_nested_property;

    #[test]
    fn every_leaf_path_resolves() {
        for corpus in available_corpora() {
            let dataset = corpus.load();
            assert!(!dataset.leaf_paths().is_empty(), "{}", corpus.name());
            for path in dataset.leaf_paths() {
                assert!(has_nested_property(dataset.document(), path), "{} {path}", corpus.name());
            }
        }
    }

    #[test]
    fn deep_chain_has_one_leaf() {
        let dataset = available_corpora()[1].load();
        assert_eq!(dataset.leaf_paths().len(), 1);
        assert_eq!(dataset.leaf_paths()[0].len(), 48);
    }
}
