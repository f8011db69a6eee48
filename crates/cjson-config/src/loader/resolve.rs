//! Directive expansion for `#include` and `#public`.
//!
//! Walks a parsed file, loads and resolves included files depth-first, and
//! tags every object member with whether it belongs to the public subset. The
//! stack of files currently under resolution is threaded through the calls so
//! an include chain that revisits one of them fails instead of recursing.

use super::merge::merge_tagged;
use super::source::{ConfigSource, FileCache};
use super::utils;
use crate::ConfigError;
use crate::model::{
    INCLUDE_KEY, PUBLIC_KEY, TaggedEntry, TaggedNode, ValuePath, strip_public_suffix,
};
use indexmap::IndexMap;
use log::{debug, trace};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Where the node being resolved came from and whether it sits in a public block.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    file: &'a Path,
    public: bool,
}

/// Resolve the root file at an absolute, normalized path.
pub(super) fn resolve_root<S: ConfigSource>(
    cache: &mut FileCache<S>,
    root: &Path,
) -> Result<TaggedNode, ConfigError> {
    let mut stack = vec![root.to_path_buf()];
    let value = cache.read_config(utils::parent_dir(root), root)?;
    let map = expect_root_object(value, root)?;
    let scope = Scope {
        file: root,
        public: false,
    };
    resolve_object(map, scope, &ValuePath::root(), cache, &mut stack)
}

fn resolve<S: ConfigSource>(
    node: Value,
    scope: Scope<'_>,
    at: &ValuePath,
    cache: &mut FileCache<S>,
    stack: &mut Vec<PathBuf>,
) -> Result<TaggedNode, ConfigError> {
    match node {
        Value::Object(map) => resolve_object(map, scope, at, cache, stack),
        Value::Array(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                resolved.push(resolve(item, scope, &at.index(idx), cache, stack)?);
            }
            Ok(TaggedNode::Array(resolved))
        }
        scalar => Ok(TaggedNode::Scalar(scalar)),
    }
}

/// Expand directives in one object.
///
/// Precedence on shared keys, lowest first: included files, the `#public`
/// block, then the object's own members.
/// `<key>#public` and `<key>` clash only as siblings in this object; across
/// the three sources a shared key merges and stays public if any source marks it.
fn resolve_object<S: ConfigSource>(
    mut map: Map<String, Value>,
    scope: Scope<'_>,
    at: &ValuePath,
    cache: &mut FileCache<S>,
    stack: &mut Vec<PathBuf>,
) -> Result<TaggedNode, ConfigError> {
    let included = match map.shift_remove(INCLUDE_KEY) {
        Some(directive) => Some(resolve_includes(
            include_paths(directive, scope.file, at),
            scope,
            cache,
            stack,
        )?),
        None => None,
    };

    let public = match map.shift_remove(PUBLIC_KEY) {
        Some(Value::Object(block)) => {
            let block_scope = Scope {
                public: true,
                ..scope
            };
            Some(resolve_object(block, block_scope, at, cache, stack)?)
        }
        Some(_) => {
            return Err(ConfigError::InvalidPublicDirective {
                file: scope.file.to_path_buf(),
                key_path: at.key(PUBLIC_KEY).to_string(),
            });
        }
        None => None,
    };

    let mut local = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let (name, marked) = match strip_public_suffix(&key) {
            Some(name) => (name.to_string(), true),
            None => (key, false),
        };
        if local.contains_key(&name) {
            return Err(ConfigError::KeyCollision {
                file: scope.file.to_path_buf(),
                key_path: at.key(&name).to_string(),
                key: name,
            });
        }
        let node = resolve(value, scope, &at.key(&name), cache, stack)?;
        local.insert(
            name,
            TaggedEntry {
                public: marked || scope.public,
                node,
            },
        );
    }

    let mut combined = included.unwrap_or_else(TaggedNode::empty_object);
    if let Some(public) = public {
        merge_tagged(&mut combined, public);
    }
    merge_tagged(&mut combined, TaggedNode::Object(local));
    Ok(combined)
}

/// Load, resolve, and merge included files in declaration order.
fn resolve_includes<S: ConfigSource>(
    paths: Vec<String>,
    scope: Scope<'_>,
    cache: &mut FileCache<S>,
    stack: &mut Vec<PathBuf>,
) -> Result<TaggedNode, ConfigError> {
    let base_dir = utils::parent_dir(scope.file);
    let mut merged = TaggedNode::empty_object();
    for raw in paths {
        let path = utils::resolve_path(base_dir, Path::new(&raw));
        if stack.contains(&path) {
            return Err(ConfigError::Cycle {
                path,
                chain: stack.clone(),
            });
        }
        debug!(
            "including config (from={}, path={})",
            scope.file.display(),
            path.display()
        );
        stack.push(path.clone());
        let value = cache.read_config(base_dir, &path)?;
        let map = expect_root_object(value, &path)?;
        let included_scope = Scope {
            file: &path,
            public: scope.public,
        };
        let resolved = resolve_object(map, included_scope, &ValuePath::root(), cache, stack)?;
        stack.pop();
        merge_tagged(&mut merged, resolved);
    }
    Ok(merged)
}

/// Normalize an `#include` value to a list of paths.
///
/// Strings and arrays of strings are accepted; anything else, including
/// empty strings and non-string array items, is ignored.
fn include_paths(directive: Value, file: &Path, at: &ValuePath) -> Vec<String> {
    let paths = match directive {
        Value::String(path) => vec![path],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(path) => Some(path),
                other => {
                    debug!(
                        "ignoring non-string include entry (file={}, at={}, value={})",
                        file.display(),
                        at,
                        other
                    );
                    None
                }
            })
            .collect(),
        other => {
            debug!(
                "ignoring #include with unsupported value (file={}, at={}, value={})",
                file.display(),
                at,
                other
            );
            Vec::new()
        }
    };
    let paths: Vec<String> = paths.into_iter().filter(|path| !path.is_empty()).collect();
    trace!("include paths resolved (file={}, count={})", file.display(), paths.len());
    paths
}

fn expect_root_object(value: Value, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::InvalidRoot {
            path: path.to_path_buf(),
        }),
    }
}
