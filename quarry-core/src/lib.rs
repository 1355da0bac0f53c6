//! # quarry-core
//!
//! Foundation crate for the Quarry query catalog.
//! Defines the field types, errors, config, tracing setup, and constants
//! shared by the storage crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::QuarryConfig;
pub use errors::QuarryErrorCode;
pub use types::{FieldRef, FieldValue, Strictness, TypeTag, TypedValue};
