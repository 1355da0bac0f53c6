use serde::{Deserialize, Serialize};

/// Logging configuration. `QUARRY_LOG` still wins over `filter` when set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive string, e.g. `quarry_storage=debug`.
    pub filter: Option<String>,
    /// Include thread ids in log lines.
    pub thread_ids: Option<bool>,
}
