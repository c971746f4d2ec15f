//! Configuration error types.

use std::path::PathBuf;

/// Errors that stop a run before any CSV is touched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Properties file could not be read
    #[error("could not read properties {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required key is absent or blank
    #[error("no {key} found in {}; it is required", path.display())]
    MissingKey { key: &'static str, path: PathBuf },

    /// The encoding label is not one encoding_rs knows
    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// A numeric setting is out of range
    #[error("invalid setting {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: &'static str,
    },
}
