//! Public subset extraction from a resolved, tagged tree.

use crate::model::{PathSegment, TaggedNode, ValuePath};
use serde_json::{Map, Value};

/// Plain config tree plus the paths of every member marked public.
#[derive(Debug)]
pub(super) struct Extracted {
    pub(super) config: Value,
    pub(super) public_paths: Vec<ValuePath>,
}

/// Drop public tags from the tree, recording where they were.
///
/// Members nested under an already public member are not recorded again,
/// since copying the ancestor copies them too.
pub(super) fn extract(tree: TaggedNode) -> Extracted {
    let mut public_paths = Vec::new();
    let config = strip_tags(tree, &ValuePath::root(), false, &mut public_paths);
    Extracted {
        config,
        public_paths,
    }
}

fn strip_tags(
    node: TaggedNode,
    at: &ValuePath,
    covered: bool,
    public_paths: &mut Vec<ValuePath>,
) -> Value {
    match node {
        TaggedNode::Object(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                let path = at.key(&key);
                let record = entry.public && !covered;
                if record {
                    public_paths.push(path.clone());
                }
                let value = strip_tags(entry.node, &path, covered || record, public_paths);
                map.insert(key, value);
            }
            Value::Object(map)
        }
        TaggedNode::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| strip_tags(item, &at.index(idx), covered, public_paths))
                .collect(),
        ),
        TaggedNode::Scalar(value) => value,
    }
}

/// Copy each public path from `config` into a fresh tree of the same shape.
///
/// Intermediate objects and arrays are created as needed. Array slots that
/// hold no public content are filled with `null` so indices line up with the
/// full tree.
pub(super) fn build_public_object(config: &Value, public_paths: &[ValuePath]) -> Value {
    let mut public = Value::Object(Map::new());
    for path in public_paths {
        if let Some(value) = path.lookup(config) {
            insert_at(&mut public, path.segments(), value.clone());
        }
    }
    public
}

fn insert_at(slot: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    match segment {
        PathSegment::Key(key) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let child = map.entry(key.clone()).or_insert(Value::Null);
                insert_at(child, rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if items.len() <= *index {
                    items.resize(index + 1, Value::Null);
                }
                insert_at(&mut items[*index], rest, value);
            }
        }
    }
}
