//! Hierarchical JSON5 config loading with includes and public subsets.
//!
//! A config file may pull in other files with `#include`, and mark members for
//! distribution to less-trusted consumers either with a `#public` block or a
//! `<key>#public` suffix. Loading yields the merged config together with the
//! public subset mirrored at the same paths.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading.
pub use error::ConfigError;
/// Loader entry points, options, and the file source seam.
pub use loader::{
    ConfigLoader, ConfigSource, FsSource, LoadOptions, LoadedConfig, deep_merge, load_config,
};
/// Directive keys and tree paths.
pub use model::{INCLUDE_KEY, PUBLIC_KEY, PathSegment, ValuePath};
