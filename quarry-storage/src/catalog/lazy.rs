//! LazyCatalog: builds its catalog on first use, exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use quarry_core::config::CatalogConfig;
use quarry_core::errors::CatalogError;

use super::{QueryCatalog, SharedQuery};
use crate::loader::ResourceLoader;

/// A catalog that is built by whichever caller asks for it first.
///
/// Concurrent first calls are serialized on an init lock; only one build
/// runs and every caller sees the same catalog. A failed build is returned
/// to the caller that ran it and leaves the slot empty for the next one.
pub struct LazyCatalog {
    config: CatalogConfig,
    loader: Box<dyn ResourceLoader>,
    cell: OnceLock<QueryCatalog>,
    init_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl LazyCatalog {
    pub fn new(config: CatalogConfig, loader: impl ResourceLoader + 'static) -> Self {
        Self {
            config,
            loader: Box::new(loader),
            cell: OnceLock::new(),
            init_lock: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    /// The built catalog, building it now if this is the first call.
    pub fn catalog(&self) -> Result<&QueryCatalog, CatalogError> {
        if let Some(catalog) = self.cell.get() {
            return Ok(catalog);
        }

        // The lock guards no data, so a poisoned lock is still usable.
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = self.cell.get() {
            return Ok(catalog);
        }

        self.builds.fetch_add(1, Ordering::SeqCst);
        let catalog = QueryCatalog::build(&self.config, self.loader.as_ref())?;
        Ok(self.cell.get_or_init(|| catalog))
    }

    /// Look up `name`, building the catalog first if needed.
    pub fn get(&self, name: &str) -> Result<SharedQuery, CatalogError> {
        self.catalog()?.get(name)
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Number of build attempts so far, failed ones included.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl std::fmt::Debug for LazyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyCatalog")
            .field("mapping", &self.config.mapping_resource())
            .field("loader", &self.loader.describe())
            .field("built", &self.is_built())
            .finish()
    }
}
