//! Error types for the scour library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scour operations.
#[derive(Debug, Error)]
pub enum ScourError {
    /// Health metrics are undefined on a zero-row table.
    #[error("column '{column}' has no rows; health metrics are undefined")]
    EmptyColumn { column: String },

    /// An operation named a column the table does not contain.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// No recipe was supplied and the column is not inferred as a binary flag.
    #[error("cannot normalize column '{column}': no recipe supplied and it is not a binary flag")]
    UnsupportedNormalization { column: String },

    /// A value matched none of the size vocabulary keywords.
    #[error("value '{value}' in column '{column}' matches no size keyword")]
    NoSizeWordMatch { column: String, value: String },

    /// A column being inserted does not match the table's row count.
    #[error("column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row has a different field count than the header.
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
