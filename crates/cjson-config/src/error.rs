//! Error types for config loading and directive resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading, resolving, or extracting config.
///
/// Every variant is fatal to the load that produced it; no partial tree is
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config path was supplied.
    #[error("missing config file path")]
    MissingPath,
    /// Reading a config file failed.
    #[error("failed to read config {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Parsing a config file failed.
    #[error("failed to parse config {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },
    /// A file's top-level value is not an object.
    #[error("config root must be an object: {}", path.display())]
    InvalidRoot { path: PathBuf },
    /// An include chain revisits a file that is still being resolved.
    #[error("include cycle detected at {}", path.display())]
    Cycle {
        path: PathBuf,
        /// Files under resolution when the cycle was found, outermost first.
        chain: Vec<PathBuf>,
    },
    /// A `#public` directive holds something other than an object.
    #[error("invalid #public directive at {key_path} in {}: value must be an object", file.display())]
    InvalidPublicDirective { file: PathBuf, key_path: String },
    /// A public-suffixed key and its plain counterpart are siblings.
    #[error("public key collision for \"{key}\" at {key_path} in {}", file.display())]
    KeyCollision {
        file: PathBuf,
        key_path: String,
        key: String,
    },
}
