//! Dotted path parsing.
//!
//! A [`Path`] is an ordered list of [`PathSegment`]s. Strings are split on
//! `.`; every segment keeps its verbatim text and additionally exposes an
//! optional trailing `[<digits>]` subscript. The parser never looks at the
//! tree: whether a segment acts as a mapping key or as a sequence index is
//! decided by the container it meets during traversal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Node, PathError};

/// Keys that are refused by assignment because they name prototype slots in
/// dynamic object models.
pub const RESERVED_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Subscript {
    base_len: usize,
    index: usize,
}

/// A single component of a [`Path`].
///
/// ```
/// # use object_resolver::PathSegment;
/// let plain = PathSegment::new("name");
/// assert_eq!(plain.subscript(), None);
///
/// let indexed = PathSegment::new("profile[0]");
/// assert_eq!(indexed.base(), "profile");
/// assert_eq!(indexed.subscript(), Some(0));
/// assert_eq!(indexed.as_str(), "profile[0]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathSegment {
    text: String,
    subscript: Option<Subscript>,
}

impl PathSegment {
    /// Creates a segment, decomposing a trailing `[<digits>]` subscript.
    #[must_use]
    pub fn new<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        let text = text.into();
        let subscript = parse_subscript(&text);
        Self { text, subscript }
    }

    /// The segment text exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Text preceding the subscript, or the whole text when there is none.
    #[must_use]
    pub fn base(&self) -> &str {
        match self.subscript {
            Some(subscript) => &self.text[..subscript.base_len],
            None => &self.text,
        }
    }

    /// Index written inside a trailing `[...]`, if any.
    #[must_use]
    pub fn subscript(&self) -> Option<usize> {
        self.subscript.map(|subscript| subscript.index)
    }

    /// The element this segment addresses when it meets a sequence.
    ///
    /// Canonical decimal text (`"0"`, `"12"`) and bare subscripts (`"[3]"`)
    /// address elements. Anything else, including `"01"` and `"items[2]"`,
    /// addresses nothing.
    ///
    /// ```
    /// # use object_resolver::PathSegment;
    /// assert_eq!(PathSegment::new("2").sequence_index(), Some(2));
    /// assert_eq!(PathSegment::new("[2]").sequence_index(), Some(2));
    /// assert_eq!(PathSegment::new("02").sequence_index(), None);
    /// assert_eq!(PathSegment::new("items[2]").sequence_index(), None);
    /// ```
    #[must_use]
    pub fn sequence_index(&self) -> Option<usize> {
        match self.subscript {
            Some(subscript) if subscript.base_len == 0 => Some(subscript.index),
            Some(_) => None,
            None => canonical_index(&self.text),
        }
    }

    /// Whether the segment, or its base, is one of [`RESERVED_KEYS`].
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        RESERVED_KEYS.contains(&self.text.as_str()) || RESERVED_KEYS.contains(&self.base())
    }
}

fn canonical_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

fn parse_subscript(text: &str) -> Option<Subscript> {
    let inner = text.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let digits = &inner[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some(Subscript { base_len: open, index })
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for PathSegment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(PathSegment::new)
    }
}

/// An ordered sequence of segments addressing a location inside a [`Node`].
///
/// ```
/// # use object_resolver::Path;
/// let path = Path::parse("user.profile[0].name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "user.profile[0].name");
/// assert!(Path::parse("").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a dotted string into segments.
    ///
    /// The empty string yields the empty path; otherwise empty segments are
    /// kept (`"a..b"` has three segments).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            return Self::new();
        }
        input.split('.').map(PathSegment::new).collect()
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: PathSegment) -> Self {
        self.0.push(segment);
        self
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pushes a new segment in-place.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Pops the last segment off the path.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Consumes the path and returns the owned segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<PathSegment> {
        self.0
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(input))
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&String> for Path {
    fn from(value: &String) -> Self {
        Self::parse(value)
    }
}

impl From<Vec<String>> for Path {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().map(PathSegment::new).collect()
    }
}

impl From<Vec<&str>> for Path {
    fn from(value: Vec<&str>) -> Self {
        value.into_iter().map(PathSegment::new).collect()
    }
}

impl From<&[&str]> for Path {
    fn from(value: &[&str]) -> Self {
        value.iter().copied().map(PathSegment::new).collect()
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(value: [&str; N]) -> Self {
        value.into_iter().map(PathSegment::new).collect()
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl From<PathSegment> for Path {
    fn from(value: PathSegment) -> Self {
        Self(vec![value])
    }
}

impl From<&Path> for Path {
    fn from(value: &Path) -> Self {
        value.clone()
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = PathSegment>,
    {
        Self(iter.into_iter().collect())
    }
}

/// Interprets a dynamically typed path argument.
///
/// Strings are parsed as dotted paths and arrays of strings become segments
/// verbatim. Anything else is rejected with [`PathError::InvalidPath`].
///
/// ```
/// # use object_resolver::{Node, Path, PathError};
/// let dotted = Path::try_from(&Node::from("a.b"))?;
/// assert_eq!(dotted.len(), 2);
///
/// let listed = Path::try_from(&Node::array([Node::from("a.b")]))?;
/// assert_eq!(listed.len(), 1);
///
/// assert!(matches!(Path::try_from(&Node::from(1)), Err(PathError::InvalidPath { .. })));
/// # Ok::<(), PathError>(())
/// ```
impl TryFrom<&Node> for Path {
    type Error = PathError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        match value {
            Node::String(text) => Ok(Self::parse(text)),
            Node::Array(items) => items
                .iter()
                .map(|item| match item {
                    Node::String(text) => Ok(PathSegment::new(text.as_str())),
                    other => Err(PathError::InvalidPath {
                        reason: format!("path segments must be strings, found {}", other.type_name()),
                    }),
                })
                .collect(),
            other => Err(PathError::InvalidPath {
                reason: format!("expected a string or a sequence of strings, found {}", other.type_name()),
            }),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Path;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a dotted path string or a sequence of segment strings")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Path::parse(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut segments = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(segment) = seq.next_element::<PathSegment>()? {
                    segments.push(segment);
                }
                Ok(Path(segments))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
