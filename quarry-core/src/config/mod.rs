//! Configuration system for Quarry.
//! TOML-based, 4-layer resolution: env > project > user > defaults.

pub mod catalog_config;
pub mod logging_config;
pub mod quarry_config;

pub use catalog_config::CatalogConfig;
pub use logging_config::LoggingConfig;
pub use quarry_config::QuarryConfig;
