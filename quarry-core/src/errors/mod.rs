//! Error handling for Quarry.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod config_error;
pub mod driver_error;
pub mod error_code;
pub mod loader_error;
pub mod query_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use driver_error::DriverError;
pub use error_code::QuarryErrorCode;
pub use loader_error::LoaderError;
pub use query_error::QueryError;
