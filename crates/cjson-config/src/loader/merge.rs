//! Deep merge helpers for combining included, public, and local config.

use super::extract::extract;
use crate::model::TaggedNode;
use serde_json::Value;

/// Merge overlay values into the base, recursively merging objects.
///
/// Scalars, arrays, and mismatched types in `overlay` replace the base value
/// wholesale; arrays are never combined element-wise.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    let mut merged = TaggedNode::from_value(std::mem::take(base));
    merge_tagged(&mut merged, TaggedNode::from_value(overlay.clone()));
    *base = extract(merged).config;
}

/// Merge a tagged overlay into a tagged base with the same rules as
/// [`deep_merge`]. A member is public when either side marks it public.
pub(super) fn merge_tagged(base: &mut TaggedNode, overlay: TaggedNode) {
    match (base, overlay) {
        (TaggedNode::Object(base_map), TaggedNode::Object(overlay_map)) => {
            for (key, entry) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => {
                        existing.public |= entry.public;
                        merge_tagged(&mut existing.node, entry.node);
                    }
                    None => {
                        base_map.insert(key, entry);
                    }
                }
            }
        }
        (base_slot, overlay_node) => {
            *base_slot = overlay_node;
        }
    }
}
