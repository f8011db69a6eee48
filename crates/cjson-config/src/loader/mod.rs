//! Hierarchical config loader with file includes and public subsets.
//!
//! Reads a root JSON5 file, expands `#include` directives recursively with
//! cycle detection, merges the results, and splits out the members marked
//! public into a separate subtree.

mod extract;
mod merge;
mod resolve;
mod source;
mod utils;


pub use merge::deep_merge;
pub use source::{ConfigSource, FsSource};

use crate::ConfigError;
use crate::model::{PUBLIC_KEY, ValuePath};
use log::{debug, info};
use serde_json::Value;
use source::FileCache;
use std::path::{Path, PathBuf};

/// Options controlling where a load starts from.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Working directory used to resolve a relative root path. A relative
    /// value is itself resolved against the process working directory.
    pub cwd: PathBuf,
}

impl LoadOptions {
    /// Create options that resolve relative root paths against `cwd`.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Create options for the current process working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::ReadFailed {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::new(cwd))
    }
}

/// Resolved config plus metadata about the files it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The merged config with directives and public markers removed.
    pub config: Value,
    /// Subset of `config` marked public, at the same paths.
    pub public: Value,
    /// Outermost members marked public, in document order.
    pub public_paths: Vec<ValuePath>,
    /// Absolute paths read from storage, in first-read order.
    pub files: Vec<PathBuf>,
}

impl LoadedConfig {
    /// Full config with the public subset attached under a top-level `#public` key.
    pub fn into_value(self) -> Value {
        let mut config = self.config;
        if let Value::Object(map) = &mut config {
            map.insert(PUBLIC_KEY.to_string(), self.public);
        }
        config
    }
}

/// Loads config hierarchies from a [`ConfigSource`].
///
/// Each call to [`ConfigLoader::load`] gets its own file cache, so a loader can
/// be reused without seeing stale file contents.
#[derive(Debug, Clone)]
pub struct ConfigLoader<S = FsSource> {
    source: S,
    options: LoadOptions,
}

impl ConfigLoader {
    /// Loader reading from the local filesystem.
    pub fn new(options: LoadOptions) -> Self {
        Self::with_source(FsSource, options)
    }
}

impl<S: ConfigSource> ConfigLoader<S> {
    /// Loader reading through a custom source.
    pub fn with_source(source: S, options: LoadOptions) -> Self {
        Self { source, options }
    }

    /// Options this loader resolves root paths with.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load, resolve, and split the config hierarchy rooted at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedConfig, ConfigError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::MissingPath);
        }
        let cwd = utils::absolute_dir(&self.options.cwd)?;
        let root = utils::resolve_path(&cwd, path);
        info!("loading config from path: {}", root.display());

        let mut cache = FileCache::new(&self.source);
        let tree = resolve::resolve_root(&mut cache, &root)?;
        let extracted = extract::extract(tree);
        debug!(
            "extracted public members (count={})",
            extracted.public_paths.len()
        );
        let public = extract::build_public_object(&extracted.config, &extracted.public_paths);
        let files = cache.into_files();
        info!("config loaded (files={})", files.len());
        Ok(LoadedConfig {
            config: extracted.config,
            public,
            public_paths: extracted.public_paths,
            files,
        })
    }
}

/// Load the config rooted at `path`, resolving a relative path against the
/// process working directory.
///
/// Returns the full config with the public subset under `#public`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Value, ConfigError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingPath);
    }
    let loader = ConfigLoader::new(LoadOptions::from_env()?);
    Ok(loader.load(path)?.into_value())
}
