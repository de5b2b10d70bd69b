//! Error types for tscolumns
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for tscolumns operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Structural Errors
    // -------------------------------------------------------------------------
    #[error("Alignment error: {0}")]
    Alignment(String),

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column already exists: {0}")]
    DuplicateColumn(String),

    // -------------------------------------------------------------------------
    // Positional Errors
    // -------------------------------------------------------------------------
    #[error("Position {index} out of bounds for {len} rows")]
    IndexOutOfBounds { index: isize, len: usize },

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Snapshot corruption detected: {0}")]
    Corruption(String),
}

/// Coarse error categories callers can match on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad store setup: unknown index column, column collision, unknown mode
    Configuration,

    /// Row or column alignment violated
    Alignment,

    /// Unknown, duplicate, or otherwise invalid column name
    Key,

    /// Positional access outside the row range
    Index,

    /// A cell did not hold the kind of value an operation needs
    Type,

    /// File I/O failed
    Io,

    /// Snapshot bytes could not be produced or trusted
    Serialization,
}

impl StoreError {
    /// Map this error onto its category
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Config(_) => ErrorKind::Configuration,
            StoreError::Alignment(_) => ErrorKind::Alignment,
            StoreError::ColumnNotFound(_) | StoreError::DuplicateColumn(_) => ErrorKind::Key,
            StoreError::IndexOutOfBounds { .. } => ErrorKind::Index,
            StoreError::TypeMismatch { .. } => ErrorKind::Type,
            StoreError::Io(_) => ErrorKind::Io,
            StoreError::Serialization(_) | StoreError::Corruption(_) => ErrorKind::Serialization,
        }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(e: bincode::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
