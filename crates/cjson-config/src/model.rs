//! Tree types shared by directive resolution and public extraction.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Directive key that pulls other config files into the enclosing object.
pub const INCLUDE_KEY: &str = "#include";
/// Directive key holding a public block, and the suffix marking a single key public.
pub const PUBLIC_KEY: &str = "#public";

/// One step in a path through a config tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

/// Location of a value inside a config tree, rendered as `table.legs[2].height`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// Path of the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of an object member below this path.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// Path of an array element below this path.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Find the value at this path, if every step exists.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                PathSegment::Key(key) => current.as_object()?.get(key),
                PathSegment::Index(index) => current.as_array()?.get(*index),
            })
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if idx == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Split a `<name>#public` key into `<name>`.
///
/// The suffix is matched case-insensitively and needs a non-empty name in
/// front of it, so a bare `#PUBLIC` key stays an ordinary key.
pub(crate) fn strip_public_suffix(key: &str) -> Option<&str> {
    let split = key.len().checked_sub(PUBLIC_KEY.len())?;
    if split == 0 {
        return None;
    }
    let suffix = key.get(split..)?;
    if suffix.eq_ignore_ascii_case(PUBLIC_KEY) {
        key.get(..split)
    } else {
        None
    }
}

/// Resolved config tree where every object member carries its public flag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TaggedNode {
    Object(IndexMap<String, TaggedEntry>),
    Array(Vec<TaggedNode>),
    Scalar(Value),
}

impl TaggedNode {
    pub(crate) fn empty_object() -> Self {
        TaggedNode::Object(IndexMap::new())
    }

    /// Wrap a plain tree with every member unmarked.
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => TaggedNode::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let entry = TaggedEntry {
                            public: false,
                            node: TaggedNode::from_value(value),
                        };
                        (key, entry)
                    })
                    .collect(),
            ),
            Value::Array(items) => {
                TaggedNode::Array(items.into_iter().map(TaggedNode::from_value).collect())
            }
            scalar => TaggedNode::Scalar(scalar),
        }
    }
}

/// Object member value plus whether it belongs to the public subset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TaggedEntry {
    pub(crate) public: bool,
    pub(crate) node: TaggedNode,
}
