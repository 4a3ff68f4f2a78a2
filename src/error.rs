//! Error types for wordlist generation
//!
//! All configuration-shape problems surface before the first token is
//! produced; per-candidate rejections are not errors and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Error taxonomy for the generation pipeline
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Invalid configuration values (length bounds, numeric ranges)
    #[error("configuration error: {0}")]
    Config(String),

    /// Mode-level problems detected at the start of a run
    #[error("generation error: {0}")]
    Generation(String),

    /// Unknown transform name referenced in the chain
    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    /// Malformed regex in a configured filter
    #[error("invalid filter regex '{pattern}': {source}")]
    FilterRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Preset lookup or persistence failure
    #[error("preset error: {0}")]
    Preset(String),

    #[error("failed to read preset {path:?}")]
    PresetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preset {path:?}")]
    PresetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
