//! The `name -> resource path` mapping a catalog is built from.
//!
//! ```toml
//! [queries]
//! users_by_id = "sql/users_by_id.sql"
//! ```

use std::collections::BTreeMap;

use quarry_core::errors::CatalogError;
use serde::{Deserialize, Serialize};

use crate::loader::ResourceLoader;

/// Parsed query mapping. Entries iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryMapping {
    #[serde(default)]
    pub queries: BTreeMap<String, String>,
}

impl QueryMapping {
    /// Parse mapping text. `resource` only names the source in errors.
    pub fn parse(resource: &str, text: &str) -> Result<Self, CatalogError> {
        toml::from_str(text).map_err(|e| CatalogError::ConfigLoad {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }

    /// Load and parse the mapping resource through `loader`.
    pub fn load(loader: &dyn ResourceLoader, resource: &str) -> Result<Self, CatalogError> {
        let text = loader.load(resource).map_err(|e| CatalogError::ConfigLoad {
            resource: resource.to_string(),
            message: e.to_string(),
        })?;
        Self::parse(resource, &text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.queries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
