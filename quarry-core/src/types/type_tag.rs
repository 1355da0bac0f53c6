//! Caller-declared semantic type of a field read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects which per-cell accessor a field read goes through.
///
/// The tag is passed with every read; it is never stored on a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// The driver's native mapping of the cell.
    #[default]
    Object,
    String,
    Array,
    Boolean,
    Integer,
}

impl TypeTag {
    pub const ALL: [TypeTag; 5] = [
        TypeTag::Object,
        TypeTag::String,
        TypeTag::Array,
        TypeTag::Boolean,
        TypeTag::Integer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
