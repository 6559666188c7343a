//! Error types for table operations

use thiserror::Error;

use crate::model::Type;

/// Result alias used by every fallible table operation
pub type Result<T> = std::result::Result<T, TableError>;

/// Failure raised by a column or table operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("table must have at least one column")]
    EmptyTable,

    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("duplicate column name: {0}")]
    DuplicateName(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("row has {found} values but table has {expected} columns")]
    ArityMismatch { expected: usize, found: usize },

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("cannot cast {value:?} to {dtype}")]
    CastFailure { value: String, dtype: Type },

    #[error("column {column} must be of type {expected}")]
    TypeMismatch { column: String, expected: Type },
}

impl TableError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        TableError::OutOfRange { index, len }
    }

    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        TableError::Argument(msg.into())
    }
}
