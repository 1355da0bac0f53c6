//! QuarryErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a stable code string that
/// callers can match on without parsing messages.
pub trait QuarryErrorCode {
    /// Returns the error code string (e.g., "QUERY_NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_LOAD_FAILED: &str = "CONFIG_LOAD_FAILED";
pub const QUERY_NOT_FOUND: &str = "QUERY_NOT_FOUND";
pub const RESOURCE_LOAD_FAILED: &str = "RESOURCE_LOAD_FAILED";
pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
pub const INVALID_RESOURCE_NAME: &str = "INVALID_RESOURCE_NAME";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
pub const ALREADY_INSTALLED: &str = "ALREADY_INSTALLED";
pub const FIELD_OUT_OF_BOUNDS: &str = "FIELD_OUT_OF_BOUNDS";
pub const MISSING_QUERY_TEXT: &str = "MISSING_QUERY_TEXT";
pub const DRIVER_ERROR: &str = "DRIVER_ERROR";
pub const CURSOR_CLOSED: &str = "CURSOR_CLOSED";
pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
