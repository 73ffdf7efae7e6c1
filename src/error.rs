//! Error type shared by loading, configuration and export.

use thiserror::Error;

/// Errors raised at the boundaries of the crate: reading structures and
/// configuration, and writing results. Interaction detection itself never fails.
#[derive(Debug, Error)]
pub enum PlinteractError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A structure file could not be read
    #[error("Failed to parse structure {path}: {message}")]
    Parse {
        /// File that failed
        path: String,
        /// Parser messages
        message: String,
    },

    /// The structure parsed but holds no atoms
    #[error("Structure {0} contains no atoms")]
    EmptyStructure(String),

    /// Malformed TOML thresholds
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON output failed
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    /// CSV or Parquet output failed
    #[error("Failed to write table: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    /// No residue carries the requested name
    #[error("No residue named '{0}' in the structure")]
    LigandNotFound(String),

    /// A residue selector that is not `CHAIN:NAME:NUMBER`
    #[error("Invalid residue selector '{0}', expected CHAIN:NAME:NUMBER")]
    InvalidSelector(String),
}

/// Result alias with [`PlinteractError`].
pub type Result<T> = std::result::Result<T, PlinteractError>;
