//! PRAGMA configuration applied to every driver connection.
//!
//! foreign_keys ON, busy_timeout, temp_store MEMORY. File-backed databases
//! additionally run in WAL mode with NORMAL sync.

use quarry_core::constants::DEFAULT_BUSY_TIMEOUT_MS;
use quarry_core::errors::DriverError;
use rusqlite::Connection;

/// Apply the baseline pragmas to a connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), DriverError> {
    conn.execute_batch(&format!(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = {DEFAULT_BUSY_TIMEOUT_MS};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| DriverError::Sqlite {
        message: format!("failed to apply pragmas: {e}"),
    })
}

/// Apply the pragmas that only make sense for an on-disk database.
pub fn apply_file_pragmas(conn: &Connection) -> Result<(), DriverError> {
    apply_pragmas(conn)?;
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        ",
    )
    .map_err(|e| DriverError::Sqlite {
        message: format!("failed to apply file pragmas: {e}"),
    })
}
