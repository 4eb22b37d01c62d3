use thiserror::Error;

use crate::Path;

/// Errors that can occur while canonicalizing external data into [`Node`].
///
/// [`Node`]: crate::Node
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Encountered a number that cannot be represented as an IEEE-754 f64.
    #[error("number {value} cannot be represented as f64")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// YAML maps may only contain string keys.
    #[error("unsupported YAML key type: {found}")]
    NonStringYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// YAML tags have no counterpart in the tree model.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
}

/// Errors raised while resolving or assigning through a [`Path`].
///
/// Only assignment fails loudly. Reads, existence checks and deletions treat
/// unresolvable paths as ordinary outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path argument is unusable: not a string or sequence of strings,
    /// empty, or containing a segment that cannot address the container it
    /// meets.
    #[error("invalid path: {reason}")]
    InvalidPath {
        /// Human readable explanation.
        reason: String,
    },
    /// A segment names a reserved key (`__proto__`, `constructor`, `prototype`).
    #[error("invalid key: `{key}` is reserved")]
    InvalidKey {
        /// The offending segment, verbatim.
        key: String,
    },
}

/// Errors raised by predicate-driven filtering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The predicate node is not a [`Node::Function`](crate::Node::Function).
    #[error("predicate is not callable: found {found}")]
    NotCallable {
        /// Type name of the node supplied as predicate.
        found: &'static str,
    },
}

/// Errors raised by [`clone_structure`](crate::clone_structure) and
/// [`clone_structure_with`](crate::clone_structure_with).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CloneError {
    /// The tree holds a value that has no structured copy.
    #[error("{kind} at `{path}` could not be cloned")]
    NotCloneable {
        /// Location of the offending value.
        path: Path,
        /// Type name of the offending value.
        kind: &'static str,
    },
    /// A transfer entry does not resolve inside the source tree.
    #[error("transfer entry `{path}` does not resolve to a value")]
    TransferNotFound {
        /// The unresolved transfer path.
        path: Path,
    },
    /// Two transfer entries resolve to the same buffer.
    #[error("transfer entry `{path}` names the buffer already listed as `{first}`")]
    DuplicateTransfer {
        /// The later entry.
        path: Path,
        /// The entry that claimed the buffer first.
        first: Path,
    },
    /// A transfer entry resolves to something other than a byte buffer.
    #[error("{kind} at `{path}` is not transferable")]
    NotTransferable {
        /// The transfer path.
        path: Path,
        /// Type name of the value found there.
        kind: &'static str,
    },
}

/// Errors emitted when constructing [`CloneOptions`](crate::CloneOptions).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The same buffer was listed for transfer more than once.
    #[error("transfer list contains `{path}` more than once")]
    DuplicateTransfer {
        /// The repeated path.
        path: Path,
    },
}
