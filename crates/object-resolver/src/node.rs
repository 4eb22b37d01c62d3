use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{CanonicalizeError, NativeFunction, Number, Path, PathSegment};

/// An untyped, owned tree value.
///
/// Mappings keep their keys sorted, so two mappings with the same entries are
/// indistinguishable regardless of insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Node {
    /// Sentinel representing the absence of a value.
    Void,
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number represented as IEEE-754 double precision.
    Number(Number),
    /// JSON string.
    String(String),
    /// Binary buffer. Not representable in JSON; the only transferable value.
    Bytes(Vec<u8>),
    /// Ordered sequence.
    Array(Vec<Node>),
    /// Mapping with deterministic key ordering.
    Object(BTreeMap<String, Node>),
    /// Live callable. Never serialized.
    #[serde(skip)]
    Function(NativeFunction),
}

impl Node {
    /// Parses a JSON string into a node.
    ///
    /// ```
    /// # use object_resolver::Node;
    /// let node = Node::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// assert_eq!(Node::from_json_str("  ")?, Node::Void);
    /// # Ok::<(), object_resolver::CanonicalizeError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Ok(Self::Void);
        }
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into a node.
    ///
    /// ```
    /// # use object_resolver::Node;
    /// let node = Node::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), object_resolver::CanonicalizeError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Ok(Self::Void);
        }
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts a serde JSON value into a [`Node`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let text = num.to_string();
                let Some(as_f64) = num.as_f64() else {
                    return Err(CanonicalizeError::NumberOutOfRange { value: text });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    fn from_yaml_value(value: YamlValue) -> Result<Self, CanonicalizeError> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                if let Some(f) = num.as_f64() {
                    return Ok(Self::Number(Number::new(f)?));
                }
                if let Some(i) = num.as_i64() {
                    return Ok(Self::Number(Number::new(i as f64)?));
                }
                if let Some(u) = num.as_u64() {
                    return Ok(Self::Number(Number::new(u as f64)?));
                }
                Err(CanonicalizeError::NumberOutOfRange { value: num.to_string() })
            }
            YamlValue::String(s) => Ok(Self::String(s)),
            YamlValue::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for value in seq {
                    items.push(Self::from_yaml_value(value)?);
                }
                Ok(Self::Array(items))
            }
            YamlValue::Mapping(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    let key = match key {
                        YamlValue::String(s) => s,
                        other => {
                            return Err(CanonicalizeError::NonStringYamlKey {
                                found: format!("{other:?}"),
                            });
                        }
                    };
                    object.insert(key, Self::from_yaml_value(value)?);
                }
                Ok(Self::Object(object))
            }
            YamlValue::Tagged(tagged) => {
                Err(CanonicalizeError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Projects the node onto JSON.
    ///
    /// `Void` and `Function` have no JSON form: at the root they yield `None`,
    /// inside mappings the entry disappears, inside sequences they become
    /// `null`. Byte buffers become arrays of numbers.
    ///
    /// ```
    /// # use object_resolver::Node;
    /// let node = Node::object([("kept", Node::from(1)), ("dropped", Node::Void)]);
    /// assert_eq!(node.to_json_value(), Some(serde_json::json!({"kept": 1})));
    /// assert_eq!(Node::array([Node::Void]).to_json_value(), Some(serde_json::json!([null])));
    /// assert_eq!(Node::Void.to_json_value(), None);
    /// ```
    #[must_use]
    pub fn to_json_value(&self) -> Option<JsonValue> {
        match self {
            Self::Void | Self::Function(_) => None,
            Self::Null => Some(JsonValue::Null),
            Self::Bool(v) => Some(JsonValue::Bool(*v)),
            Self::Number(n) => Some(JsonValue::Number(n.to_json_number())),
            Self::String(s) => Some(JsonValue::String(s.clone())),
            Self::Bytes(bytes) => {
                Some(JsonValue::Array(bytes.iter().map(|byte| JsonValue::from(*byte)).collect()))
            }
            Self::Array(values) => Some(JsonValue::Array(
                values.iter().map(|value| value.to_json_value().unwrap_or(JsonValue::Null)).collect(),
            )),
            Self::Object(map) => {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    if let Some(value) = value.to_json_value() {
                        object.insert(key.clone(), value);
                    }
                }
                Some(JsonValue::Object(object))
            }
        }
    }

    /// Builds a mapping from key/value pairs.
    #[must_use]
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        Self::Object(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }

    /// Builds a sequence from items.
    #[must_use]
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        Self::Array(items.into_iter().collect())
    }

    /// Whether this is the absent-marker.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Whether this is a mapping or a sequence.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Returns the entries when this is a mapping.
    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items when this is a sequence.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Void => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Loose truthiness: `Void`, `Null`, `false`, zero and `""` are falsy.
    ///
    /// ```
    /// # use object_resolver::Node;
    /// assert!(!Node::from(0).is_truthy());
    /// assert!(!Node::from("").is_truthy());
    /// assert!(Node::array([]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Void | Self::Null => false,
            Self::Bool(v) => *v,
            Self::Number(n) => !n.is_zero(),
            Self::String(s) => !s.is_empty(),
            Self::Bytes(_) | Self::Array(_) | Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Resolves a path through own entries only.
    ///
    /// Returns `Some` for every key that exists, including keys holding
    /// [`Node::Void`]. An empty path resolves to `self`.
    ///
    /// ```
    /// # use object_resolver::{Node, Path};
    /// let node = Node::from_json_str("{\"b\":[{\"bb\":21},{\"bbb\":222}]}")?;
    /// assert_eq!(node.lookup(&Path::parse("b.1.bbb")), Some(&Node::from(222)));
    /// assert_eq!(node.lookup(&Path::parse("b.01.bbb")), None);
    /// # Ok::<(), object_resolver::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn lookup(&self, path: &Path) -> Option<&Node> {
        path.segments().iter().try_fold(self, |current, segment| current.child(segment))
    }

    /// Mutable counterpart of [`Node::lookup`].
    pub fn lookup_mut(&mut self, path: &Path) -> Option<&mut Node> {
        path.segments().iter().try_fold(self, |current, segment| current.child_mut(segment))
    }

    pub(crate) fn child(&self, segment: &PathSegment) -> Option<&Node> {
        match self {
            Self::Object(map) => map.get(segment.as_str()),
            Self::Array(items) => segment.sequence_index().and_then(|index| items.get(index)),
            _ => None,
        }
    }

    pub(crate) fn child_mut(&mut self, segment: &PathSegment) -> Option<&mut Node> {
        match self {
            Self::Object(map) => map.get_mut(segment.as_str()),
            Self::Array(items) => segment.sequence_index().and_then(|index| items.get_mut(index)),
            _ => None,
        }
    }
}

impl TryFrom<JsonValue> for Node {
    type Error = CanonicalizeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<Number> for Node {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Self::Array(value)
    }
}

impl From<BTreeMap<String, Node>> for Node {
    fn from(value: BTreeMap<String, Node>) -> Self {
        Self::Object(value)
    }
}

impl From<NativeFunction> for Node {
    fn from(value: NativeFunction) -> Self {
        Self::Function(value)
    }
}
