//! Helper utilities for config loader path handling.

use crate::ConfigError;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base_dir` unless it is already absolute.
///
/// The result is lexically normalized so it can serve as a file identity.
pub(crate) fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base_dir.join(path))
    }
}

/// Remove `.` and `..` components without touching the filesystem.
///
/// A leading `..` on a relative path is kept; `..` at a root stays at the root.
pub(super) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir.as_os_str()),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Make `path` absolute against the process working directory.
pub(super) fn absolute_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path)
        .map(|absolute| normalize_path(&absolute))
        .map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Directory that relative includes inside `file` are resolved against.
pub(super) fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(file)
}
