//! In-memory loader for embedded catalogs and tests.

use std::collections::HashMap;

use quarry_core::errors::LoaderError;

use super::{normalize_resource_name, ResourceLoader};

#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` under `name`. Invalid names are rejected.
    pub fn insert(&mut self, name: &str, text: impl Into<String>) -> Result<(), LoaderError> {
        let normalized = normalize_resource_name(name)?;
        self.resources.insert(normalized, text.into());
        Ok(())
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: &str, text: impl Into<String>) -> Result<Self, LoaderError> {
        self.insert(name, text)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<String, LoaderError> {
        let normalized = normalize_resource_name(name)?;
        self.resources
            .get(&normalized)
            .cloned()
            .ok_or_else(|| LoaderError::NotFound {
                name: normalized,
                searched: self.describe(),
            })
    }

    fn describe(&self) -> String {
        format!("<memory: {} resources>", self.resources.len())
    }
}
