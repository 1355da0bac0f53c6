//! Filesystem loader with ordered search roots.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quarry_core::config::CatalogConfig;
use quarry_core::errors::LoaderError;

use super::{normalize_resource_name, ResourceLoader};

/// Looks a resource up under each root in order; the first hit wins.
#[derive(Debug, Clone)]
pub struct FsLoader {
    roots: Vec<PathBuf>,
}

impl FsLoader {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a loader from the catalog's search paths, resolved against `root`.
    pub fn from_config(config: &CatalogConfig, root: &Path) -> Self {
        Self::new(config.resolved_search_paths(root))
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceLoader for FsLoader {
    fn load(&self, name: &str) -> Result<String, LoaderError> {
        let normalized = normalize_resource_name(name)?;
        for root in &self.roots {
            let candidate = root.join(&normalized);
            match std::fs::read_to_string(&candidate) {
                Ok(text) => {
                    tracing::debug!(
                        resource = %normalized,
                        path = %candidate.display(),
                        "loaded resource"
                    );
                    return Ok(text);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(LoaderError::Io {
                        name: normalized,
                        source,
                    })
                }
            }
        }
        Err(LoaderError::NotFound {
            name: normalized,
            searched: self.describe(),
        })
    }

    fn describe(&self) -> String {
        let roots: Vec<String> = self
            .roots
            .iter()
            .map(|r| r.display().to_string())
            .collect();
        format!("[{}]", roots.join(", "))
    }
}
