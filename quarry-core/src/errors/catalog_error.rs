//! Query catalog errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised while building or querying a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The mapping resource itself could not be loaded or parsed. Fatal.
    #[error("could not load query mapping '{resource}': {message}")]
    ConfigLoad { resource: String, message: String },

    #[error("query not found: [{name}]. Check that the key is defined in {resource}.")]
    NotFound { name: String, resource: String },

    /// Only raised in strict mode; lenient builds log and keep the entry.
    #[error("could not load SQL for query '{name}' from '{path}': {message}")]
    ResourceLoad {
        name: String,
        path: String,
        message: String,
    },

    #[error("lock poisoned: {what}")]
    LockPoisoned { what: String },

    #[error("a global query catalog is already installed")]
    AlreadyInstalled,
}

impl QuarryErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigLoad { .. } => error_code::CONFIG_LOAD_FAILED,
            Self::NotFound { .. } => error_code::QUERY_NOT_FOUND,
            Self::ResourceLoad { .. } => error_code::RESOURCE_LOAD_FAILED,
            Self::LockPoisoned { .. } => error_code::LOCK_POISONED,
            Self::AlreadyInstalled => error_code::ALREADY_INSTALLED,
        }
    }
}
