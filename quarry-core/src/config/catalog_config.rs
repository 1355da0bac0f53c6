//! Catalog configuration: where the query mapping lives and how failures degrade.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAPPING_RESOURCE;
use crate::types::Strictness;

/// Settings for building a query catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Resource name of the `name -> path` mapping. Default: `catalog.toml`.
    pub mapping: Option<String>,
    /// Ordered search roots for resources, relative to the project root
    /// unless absolute. Empty means the project root itself.
    pub search_paths: Vec<String>,
    /// Failure policy. Default: lenient.
    pub strictness: Option<Strictness>,
}

impl CatalogConfig {
    /// Returns the mapping resource name, defaulting to `catalog.toml`.
    pub fn mapping_resource(&self) -> &str {
        self.mapping.as_deref().unwrap_or(DEFAULT_MAPPING_RESOURCE)
    }

    pub fn effective_strictness(&self) -> Strictness {
        self.strictness.unwrap_or_default()
    }

    /// Resolve `search_paths` against `root`.
    pub fn resolved_search_paths(&self, root: &Path) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            return vec![root.to_path_buf()];
        }
        self.search_paths
            .iter()
            .map(|p| {
                let path = Path::new(p);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    root.join(path)
                }
            })
            .collect()
    }
}
