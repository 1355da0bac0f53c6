//! Configuration errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised while resolving the layered Quarry configuration.
///
/// `layer` names where the bad input came from: `user` (`~/.quarry/config.toml`),
/// `project` (`quarry.toml`), or `inline` for TOML handed to `from_toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {layer} config {path}: {source}")]
    Unreadable {
        layer: &'static str,
        path: String,
        source: std::io::Error,
    },

    #[error("{layer} config {path} is not valid Quarry TOML: {message}")]
    ParseError {
        layer: &'static str,
        path: String,
        message: String,
    },

    #[error("config key `{field}` {message}")]
    ValidationFailed { field: String, message: String },

    #[error("config key `{field}` does not accept '{value}' (expected {expected})")]
    InvalidValue {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("could not serialize config: {message}")]
    Serialize { message: String },
}

impl ConfigError {
    /// The layer the failure came from, when it came from one.
    pub fn layer(&self) -> Option<&'static str> {
        match self {
            Self::Unreadable { layer, .. } | Self::ParseError { layer, .. } => Some(*layer),
            _ => None,
        }
    }
}

impl QuarryErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
