//! Error type for session and configuration handling.
//!
//! Higher-level crates define their own domain-specific error enums; this one
//! only covers what the leaf crate itself can fail at.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for configuration loading and persistence.
#[derive(Debug, Error)]
pub enum StratusError {
    /// Reading or writing the config file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file parsed but holds an unusable value.
    #[error("invalid configuration: {message}")]
    Config {
        /// What is wrong with it.
        message: String,
    },

    /// The config file is not valid JSON for the session model.
    #[error("malformed config file: {source}")]
    Serialization {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StratusError>;
