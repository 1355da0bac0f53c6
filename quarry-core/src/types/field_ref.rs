//! Column references: by label or by 1-based ordinal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a column of the current cursor.
///
/// Each variant resolves to an ordinal through its own path: a label is
/// looked up on the cursor, an index is taken as-is and bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRef {
    ByLabel(String),
    ByIndex(i64),
}

impl FieldRef {
    pub fn label(label: impl Into<String>) -> Self {
        Self::ByLabel(label.into())
    }

    pub fn index(ordinal: i64) -> Self {
        Self::ByIndex(ordinal)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByLabel(label) => write!(f, "label '{label}'"),
            Self::ByIndex(ordinal) => write!(f, "index {ordinal}"),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(label: &str) -> Self {
        Self::ByLabel(label.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(label: String) -> Self {
        Self::ByLabel(label)
    }
}

impl From<i64> for FieldRef {
    fn from(ordinal: i64) -> Self {
        Self::ByIndex(ordinal)
    }
}

impl From<i32> for FieldRef {
    fn from(ordinal: i32) -> Self {
        Self::ByIndex(i64::from(ordinal))
    }
}

impl From<usize> for FieldRef {
    fn from(ordinal: usize) -> Self {
        // Ordinals past i64::MAX can never be in range anyway.
        Self::ByIndex(i64::try_from(ordinal).unwrap_or(i64::MAX))
    }
}
