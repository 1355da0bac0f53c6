//! Driver boundary: the handles a tabular driver hands back after execution.
//!
//! A named query owns at most one `Statement` and one `Cursor` at a time.
//! Ordinals are 1-based everywhere on this boundary.

pub mod pragmas;
pub mod sqlite;
pub mod sqlite_cursor;

use quarry_core::errors::DriverError;
use quarry_core::types::FieldValue;

pub use sqlite::{SqliteDriver, SqliteStatement};
pub use sqlite_cursor::SqliteCursor;

/// A row cursor over a tabular result.
///
/// The cursor starts before the first row; `advance` moves it forward.
pub trait Cursor: Send {
    /// Move to the next row. `Ok(false)` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool, DriverError>;

    /// Resolve a column label to its 1-based ordinal.
    fn find_column(&self, label: &str) -> Result<usize, DriverError>;

    /// Number of columns described by the result metadata.
    fn column_count(&self) -> Result<usize, DriverError>;

    /// `Ok(None)` for SQL NULL.
    fn get_string(&self, ordinal: usize) -> Result<Option<String>, DriverError>;

    /// `Ok(None)` for SQL NULL.
    fn get_array(&self, ordinal: usize) -> Result<Option<Vec<FieldValue>>, DriverError>;

    /// SQL NULL reads as `false`.
    fn get_boolean(&self, ordinal: usize) -> Result<bool, DriverError>;

    /// SQL NULL reads as `0`.
    fn get_integer(&self, ordinal: usize) -> Result<i64, DriverError>;

    fn get_object(&self, ordinal: usize) -> Result<FieldValue, DriverError>;

    /// Release the cursor. Closing twice is not an error.
    fn close(&mut self) -> Result<(), DriverError>;

    fn is_closed(&self) -> bool;
}

/// A prepared execution context.
pub trait Statement: Send {
    /// The SQL text the statement was prepared from.
    fn sql(&self) -> &str;

    /// Release the statement. Closing twice is not an error.
    fn close(&mut self) -> Result<(), DriverError>;

    fn is_closed(&self) -> bool;
}
