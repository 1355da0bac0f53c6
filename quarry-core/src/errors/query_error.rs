//! Errors raised by named-query field access and lifecycle operations.

use super::error_code::{self, QuarryErrorCode};
use super::DriverError;
use crate::constants::FIRST_COLUMN;

/// Errors returned by a named query.
///
/// `OutOfBounds` and `UnresolvedField` are distinct internally but share the
/// `FIELD_OUT_OF_BOUNDS` code: callers see one kind of bounds violation.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("field index {attempted} is outside the valid range [{min}, {max}]")]
    OutOfBounds { attempted: i64, min: i64, max: i64 },

    /// `max` is the column count at the time of the lookup; the valid range
    /// is `[1, max]`, empty when `max` is `-1`.
    #[error("field label '{label}' could not be resolved (valid range [1, {max}]): {reason}")]
    UnresolvedField {
        label: String,
        reason: String,
        max: i64,
    },

    #[error("query '{name}' has no SQL text (its resource failed to load)")]
    MissingText { name: String },

    #[error("driver failure during {operation} on query '{name}': {source}")]
    Driver {
        name: String,
        operation: &'static str,
        source: DriverError,
    },
}

impl QueryError {
    /// True for every unresolved or out-of-range field reference.
    pub fn is_bounds_violation(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::UnresolvedField { .. })
    }

    /// The inclusive ordinal range a bounds violation was checked against.
    pub fn valid_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::OutOfBounds { min, max, .. } => Some((*min, *max)),
            Self::UnresolvedField { max, .. } => Some((FIRST_COLUMN, *max)),
            _ => None,
        }
    }
}

impl QuarryErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } | Self::UnresolvedField { .. } => {
                error_code::FIELD_OUT_OF_BOUNDS
            }
            Self::MissingText { .. } => error_code::MISSING_QUERY_TEXT,
            Self::Driver { source, .. } => source.error_code(),
        }
    }
}
