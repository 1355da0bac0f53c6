//! Constants shared across the workspace.

/// Default name of the resource holding the `name -> path` query mapping.
pub const DEFAULT_MAPPING_RESOURCE: &str = "catalog.toml";

/// Column count reported while no cursor metadata is available.
pub const UNKNOWN_COLUMN_COUNT: i64 = -1;

/// First valid column ordinal. Ordinals are 1-based.
pub const FIRST_COLUMN: i64 = 1;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "quarry.toml";

/// User-level config directory name, relative to the home directory.
pub const USER_CONFIG_DIR: &str = ".quarry";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "QUARRY_LOG";

/// Filter used when neither `QUARRY_LOG` nor the config provide one.
pub const DEFAULT_LOG_FILTER: &str = "quarry_core=info,quarry_storage=info";

/// SQLite busy timeout applied to driver connections, in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;
