//! Core error types for keepsake-core.
//!
//! Every failure a component can surface is modeled here. Gate and media
//! failures are expected and handled locally (inline messages, fallback
//! chains); storage failures are absorbed at the store boundary so the
//! experience keeps working with zero persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for keepsake-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Gate submission rejections
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Media (image/audio) load errors
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Why a gate submission was rejected.
///
/// All variants are handled locally: the engine records the failure,
/// the surface shows an inline message. None of these halt anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Input did not reduce to 6 or 8 digits.
    #[error("expected a 6-digit (DDMMYY) or 8-digit (DDMMYYYY) date")]
    Format,

    /// Well-formed digits that do not denote a real calendar date
    /// within the accepted year range.
    #[error("not a valid calendar date")]
    InvalidDate,

    /// A real calendar date, but not the configured one.
    #[error("wrong date")]
    Mismatch,

    /// Submission while the cooldown is still running.
    #[error("locked for another {remaining_ms}ms")]
    Locked { remaining_ms: i64 },
}

/// Storage-specific errors.
///
/// The KV store swallows these and degrades to in-memory defaults;
/// they only propagate from the low-level [`crate::storage::Database`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read failed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Media load errors.
///
/// Media failures cascade through a bounded fallback chain and end in a
/// degraded but non-breaking state (placeholder image, silence).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// A single source failed to load/play.
    #[error("media source failed: {src}")]
    SourceFailed { src: String },

    /// Every configured audio source was tried and none played.
    #[error("no playable audio source ({} tried)", attempted.len())]
    NoPlayableSource { attempted: Vec<String> },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::ReadFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
