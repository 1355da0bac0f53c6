//! Top-level Quarry configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CatalogConfig, LoggingConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;
use crate::types::Strictness;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`QUARRY_*`)
/// 2. Project config (`quarry.toml` in project root)
/// 3. User config (`~/.quarry/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QuarryConfig {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl QuarryConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path, "user") {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 2: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path, "project")?;
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            layer: "inline",
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuarryConfig) -> Result<(), ConfigError> {
        if let Some(ref mapping) = config.catalog.mapping {
            if mapping.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "catalog.mapping".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        if config.catalog.search_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "catalog.search_paths".to_string(),
                message: "entries must not be blank".to_string(),
            });
        }
        if let Some(ref filter) = config.logging.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "logging.filter".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.quarry/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(
        config: &mut QuarryConfig,
        path: &Path,
        layer: &'static str,
    ) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            layer,
            path: path.display().to_string(),
            source,
        })?;

        let file_config: QuarryConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                layer,
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; set values in `other` win.
    fn merge(base: &mut QuarryConfig, other: &QuarryConfig) {
        if other.catalog.mapping.is_some() {
            base.catalog.mapping = other.catalog.mapping.clone();
        }
        if !other.catalog.search_paths.is_empty() {
            base.catalog.search_paths = other.catalog.search_paths.clone();
        }
        if other.catalog.strictness.is_some() {
            base.catalog.strictness = other.catalog.strictness;
        }

        if other.logging.filter.is_some() {
            base.logging.filter = other.logging.filter.clone();
        }
        if other.logging.thread_ids.is_some() {
            base.logging.thread_ids = other.logging.thread_ids;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut QuarryConfig) {
        if let Ok(val) = std::env::var("QUARRY_CATALOG_MAPPING") {
            config.catalog.mapping = Some(val);
        }
        if let Some(val) = std::env::var_os("QUARRY_CATALOG_SEARCH_PATHS") {
            // Platform path-list syntax: `:` on Unix, `;` on Windows.
            config.catalog.search_paths = std::env::split_paths(&val)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
        }
        if let Ok(val) = std::env::var("QUARRY_STRICTNESS") {
            match val.parse::<Strictness>() {
                Ok(v) => config.catalog.strictness = Some(v),
                Err(e) => tracing::warn!(error = %e, "ignoring QUARRY_STRICTNESS"),
            }
        }
        if let Ok(val) = std::env::var("QUARRY_LOG_FILTER") {
            config.logging.filter = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
