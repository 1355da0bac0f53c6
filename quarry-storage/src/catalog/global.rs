//! Optional process-wide catalog slot.
//!
//! Prefer passing a `QueryCatalog` or `LazyCatalog` to consumers directly;
//! the slot exists for code that has no way to receive one.

use std::sync::OnceLock;

use quarry_core::errors::CatalogError;

use super::LazyCatalog;

static GLOBAL: OnceLock<LazyCatalog> = OnceLock::new();

/// Install the process-wide catalog. Fails if one is already installed.
pub fn install_global(catalog: LazyCatalog) -> Result<&'static LazyCatalog, CatalogError> {
    let mut installed = false;
    let slot = GLOBAL.get_or_init(|| {
        installed = true;
        catalog
    });
    if installed {
        tracing::debug!(?slot, "installed global query catalog");
        Ok(slot)
    } else {
        Err(CatalogError::AlreadyInstalled)
    }
}

/// The installed process-wide catalog, if any.
pub fn global() -> Option<&'static LazyCatalog> {
    GLOBAL.get()
}
