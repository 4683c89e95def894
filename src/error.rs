//! Error types for contactdex
//!
//! Provides a unified error type for all operations.
//!
//! "Already exists" and "not found" are ordinary outcomes of index
//! operations and are reported through the outcome enums in
//! [`crate::index`], not through this type.

use thiserror::Error;

/// Result type alias using DirectoryError
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Unified error type for contactdex operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Input Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Command error: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    /// The index accepted the mutation but the mirror could not record it.
    /// The in-memory change is kept; the file is now behind the index.
    #[error("{operation} applied in memory but not persisted: {source}")]
    MirrorDiverged {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
