//! Errors reported by a tabular driver (cursor and statement handles).

use super::error_code::{self, QuarryErrorCode};
use crate::types::TypeTag;

/// Failures at the driver boundary.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("cursor is not positioned on a row")]
    NoCurrentRow,

    #[error("no column labelled '{label}'")]
    ColumnNotFound { label: String },

    #[error("column {ordinal} does not exist ({column_count} columns)")]
    InvalidColumn { ordinal: usize, column_count: usize },

    #[error("column {ordinal} holds {found}, which cannot be read as {expected}")]
    TypeMismatch {
        ordinal: usize,
        expected: TypeTag,
        found: String,
    },

    #[error("{handle} is closed")]
    Closed { handle: &'static str },
}

impl QuarryErrorCode for DriverError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed { .. } => error_code::CURSOR_CLOSED,
            Self::TypeMismatch { .. } => error_code::TYPE_MISMATCH,
            _ => error_code::DRIVER_ERROR,
        }
    }
}
