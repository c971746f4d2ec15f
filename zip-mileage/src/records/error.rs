//! CSV read/write error types.

use std::path::PathBuf;

/// Errors reading the input CSV.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// File could not be opened or read
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes were not valid in the configured encoding
    #[error("{} is not valid {encoding}", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// CSV structure was malformed
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors writing the output CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// File could not be written
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed
    #[error("could not serialize CSV: {0}")]
    Csv(#[from] csv::Error),
}
