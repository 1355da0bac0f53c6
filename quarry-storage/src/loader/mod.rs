//! Resource loaders: resolve a resource name to its full text.

pub mod fs;
pub mod memory;

use quarry_core::errors::LoaderError;

pub use fs::FsLoader;
pub use memory::MemoryLoader;

/// Resolves a resource name to its text content.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, name: &str) -> Result<String, LoaderError>;

    /// Human-readable description of where this loader looks.
    fn describe(&self) -> String;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for std::sync::Arc<T> {
    fn load(&self, name: &str) -> Result<String, LoaderError> {
        (**self).load(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for Box<T> {
    fn load(&self, name: &str) -> Result<String, LoaderError> {
        (**self).load(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Normalize a resource name: backslashes become `/`, one leading `/` is
/// dropped, empty and `..` segments are rejected. Names with leading or
/// trailing whitespace are rejected rather than trimmed.
///
/// `"/sql/users.sql"` and `"sql/users.sql"` name the same resource.
pub fn normalize_resource_name(name: &str) -> Result<String, LoaderError> {
    if name.trim() != name {
        return Err(LoaderError::InvalidName {
            name: name.to_string(),
            reason: "surrounding whitespace is not allowed".to_string(),
        });
    }
    let unified = name.replace('\\', "/");
    let stripped = unified.strip_prefix('/').unwrap_or(&unified);

    if stripped.is_empty() {
        return Err(LoaderError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    let mut segments = Vec::new();
    for segment in stripped.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(LoaderError::InvalidName {
                    name: name.to_string(),
                    reason: "'..' segments are not allowed".to_string(),
                })
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(LoaderError::InvalidName {
            name: name.to_string(),
            reason: "name has no path segments".to_string(),
        });
    }
    Ok(segments.join("/"))
}
