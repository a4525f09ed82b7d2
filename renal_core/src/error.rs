//! Error types for the renal_core library.
//!
//! Clinical inputs never produce an `Err`: missing or out-of-domain
//! measurements surface as undefined fields or classification tags on the
//! result record. `Error` covers the boundary instead — configuration
//! files, JSON input records, and CLI argument parsing.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for renal_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed boundary input (not a clinical value problem)
    #[error("Invalid input: {0}")]
    Input(String),
}
