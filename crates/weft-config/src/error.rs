//! Errors raised while loading configuration.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced when reading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Configuration text was not valid.
    #[error("invalid configuration: {source}")]
    Parse {
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },
    /// A configuration file was not valid.
    #[error("invalid configuration file '{path}': {source}")]
    ParseFile {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },
}
