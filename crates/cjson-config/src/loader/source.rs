//! IO helpers for reading config files, parsed at most once per load.

use super::utils;
use crate::ConfigError;
use log::{debug, trace};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Storage that config file contents are read from.
pub trait ConfigSource {
    /// Read the full UTF-8 contents of the file at an absolute path.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads config files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ConfigSource for FsSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Parsed file cache keyed by absolute path, scoped to a single load.
pub(super) struct FileCache<S> {
    source: S,
    parsed: HashMap<PathBuf, Value>,
    read_order: Vec<PathBuf>,
}

impl<S: ConfigSource> FileCache<S> {
    pub(super) fn new(source: S) -> Self {
        Self {
            source,
            parsed: HashMap::new(),
            read_order: Vec::new(),
        }
    }

    /// Resolve `path` against `base_dir`, then return its parsed contents.
    ///
    /// The file is read and parsed on first request only; later requests get a
    /// copy of the cached tree.
    pub(super) fn read_config(&mut self, base_dir: &Path, path: &Path) -> Result<Value, ConfigError> {
        let path = utils::resolve_path(base_dir, path);
        if let Some(value) = self.parsed.get(&path) {
            trace!("config cache hit (path={})", path.display());
            return Ok(value.clone());
        }

        debug!("reading config file (path={})", path.display());
        let contents = match self.source.read_to_string(&path) {
            Ok(contents) => contents,
            Err(source) => return Err(ConfigError::ReadFailed { path, source }),
        };
        let value: Value = match json5::from_str(&contents) {
            Ok(value) => value,
            Err(source) => return Err(ConfigError::ParseFailed { path, source }),
        };
        self.read_order.push(path.clone());
        self.parsed.insert(path, value.clone());
        Ok(value)
    }

    /// Absolute paths read from storage, in first-read order.
    pub(super) fn into_files(self) -> Vec<PathBuf> {
        self.read_order
    }
}
