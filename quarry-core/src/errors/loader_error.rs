//! Resource loader errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised while resolving and reading a named text resource.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("invalid resource name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("resource '{name}' not found (searched: {searched})")]
    NotFound { name: String, searched: String },

    #[error("IO error reading resource '{name}': {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },
}

impl QuarryErrorCode for LoaderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => error_code::INVALID_RESOURCE_NAME,
            Self::NotFound { .. } => error_code::RESOURCE_NOT_FOUND,
            Self::Io { .. } => error_code::RESOURCE_LOAD_FAILED,
        }
    }
}
