use std::fmt;
use std::sync::Arc;

use crate::Node;

type Callable = dyn Fn(&Node) -> Node + Send + Sync;

/// A live callable stored inside a tree.
///
/// Functions survive neither cloning flavour: the JSON clone drops them and
/// the structured clone refuses them. They serve as dynamic predicates for
/// [`filter_object_by`](crate::filter_object_by).
///
/// ```
/// # use object_resolver::{NativeFunction, Node};
/// let is_even = NativeFunction::new("is_even", |value| {
///     Node::from(matches!(value, Node::Number(n) if n.get() % 2.0 == 0.0))
/// });
/// assert_eq!(is_even.call(&Node::from(4)), Node::from(true));
/// assert_eq!(is_even.name(), "is_even");
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    call: Arc<Callable>,
}

impl NativeFunction {
    /// Wraps a closure under a diagnostic name.
    pub fn new<S, F>(name: S, call: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Node) -> Node + Send + Sync + 'static,
    {
        Self { name: Arc::from(name.into()), call: Arc::new(call) }
    }

    /// Name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with a single argument.
    #[must_use]
    pub fn call(&self, argument: &Node) -> Node {
        (self.call)(argument)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFunction").field(&self.name).finish()
    }
}
