//! Path-based access and structural helpers for JSON-shaped trees.
//!
//! `object-resolver` works on [`Node`], an owned tree of mappings, sequences
//! and primitives with an explicit absent value ([`Node::Void`]). Dotted
//! paths such as `"user.profile.name"` address nested values for reading,
//! existence checks, assignment and removal; the remaining helpers compare,
//! copy, filter and prune whole trees.
//!
//! ```
//! use object_resolver::{
//!     delete_nested_property, get_nested_property, has_nested_property, set_nested_property,
//!     Node,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut root = Node::from_json_str("{}")?;
//!     set_nested_property(&mut root, "user.profile.name", Node::from("Jane Doe"))?;
//!     assert_eq!(get_nested_property(&root, "user.profile.name", &Node::Void), &Node::from("Jane Doe"));
//!
//!     delete_nested_property(&mut root, "user.profile.name");
//!     assert!(!has_nested_property(&root, "user.profile.name"));
//!     assert!(has_nested_property(&root, "user.profile"));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod clone;
mod error;
mod function;
mod node;
mod number;
mod options;
pub mod path;
mod structure;

pub use access::{
    delete_nested_property, fetch_last_nested_property, get_nested_property, has_nested_property,
    set_nested_property,
};
pub use clone::{clone_object, clone_structure, clone_structure_with};
pub use error::{CanonicalizeError, CloneError, FilterError, OptionsError, PathError};
pub use function::NativeFunction;
pub use node::Node;
pub use number::Number;
pub use options::CloneOptions;
pub use path::{Path, PathSegment};
pub use structure::{filter_object, filter_object_by, is_equal, remove_undefined_properties};

/// Returns the semantic version of the `object-resolver` crate.
///
/// ```
/// assert!(!object_resolver::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
