//! QueryCatalog: every named query of the application, loaded once.

pub mod global;
pub mod lazy;
pub mod mapping;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use quarry_core::config::CatalogConfig;
use quarry_core::errors::CatalogError;
use quarry_core::types::Strictness;

use crate::loader::ResourceLoader;
use crate::query::NamedQuery;

pub use global::{global, install_global};
pub use lazy::LazyCatalog;
pub use mapping::QueryMapping;

/// A named query shared between the catalog and its consumers.
pub type SharedQuery = Arc<Mutex<NamedQuery>>;

/// Immutable registry of named queries.
///
/// The set of names is fixed at build time; lookups take `&self` and can run
/// from any thread. Each query carries its own lock for its execution state.
#[derive(Debug)]
pub struct QueryCatalog {
    resource: String,
    strictness: Strictness,
    queries: HashMap<String, SharedQuery>,
}

impl QueryCatalog {
    /// Load the mapping named by `config` and every query it references.
    ///
    /// An unreadable mapping is fatal. An unreadable query resource is logged
    /// and registered without text, unless the config is strict.
    pub fn build(
        config: &CatalogConfig,
        loader: &dyn ResourceLoader,
    ) -> Result<Self, CatalogError> {
        let resource = config.mapping_resource();
        let mapping = QueryMapping::load(loader, resource)?;
        Self::from_mapping(resource, &mapping, loader, config.effective_strictness())
    }

    /// Build from an already parsed mapping.
    pub fn from_mapping(
        resource: &str,
        mapping: &QueryMapping,
        loader: &dyn ResourceLoader,
        strictness: Strictness,
    ) -> Result<Self, CatalogError> {
        let mut queries = HashMap::with_capacity(mapping.len());
        let mut missing = 0usize;

        for (name, path) in mapping.iter() {
            let text = match loader.load(path) {
                Ok(text) => Some(text),
                Err(e) if strictness.is_strict() => {
                    return Err(CatalogError::ResourceLoad {
                        name: name.to_string(),
                        path: path.to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        query = name,
                        path,
                        error = %e,
                        "query resource unreadable, registering without text"
                    );
                    missing += 1;
                    None
                }
            };
            let query = NamedQuery::new(name, text).with_strictness(strictness);
            queries.insert(name.to_string(), Arc::new(Mutex::new(query)));
        }

        tracing::info!(
            resource,
            queries = queries.len(),
            missing,
            %strictness,
            "query catalog built"
        );

        Ok(Self {
            resource: resource.to_string(),
            strictness,
            queries,
        })
    }

    /// The query registered under `name`. Every call returns the same `Arc`.
    pub fn get(&self, name: &str) -> Result<SharedQuery, CatalogError> {
        self.queries
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
                resource: self.resource.clone(),
            })
    }

    /// Lock the query registered under `name` and run `f` on it.
    pub fn with_query<F, T>(&self, name: &str, f: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&mut NamedQuery) -> T,
    {
        let shared = self.get(name)?;
        let mut guard = shared.lock().map_err(|_| CatalogError::LockPoisoned {
            what: format!("named query '{name}'"),
        })?;
        Ok(f(&mut guard))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.queries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Name of the mapping resource this catalog was built from.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }
}
