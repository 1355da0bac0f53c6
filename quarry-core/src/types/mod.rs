//! Field-access types shared by the catalog and the drivers.

pub mod field_ref;
pub mod field_value;
pub mod strictness;
pub mod type_tag;

pub use field_ref::FieldRef;
pub use field_value::{FieldValue, TypedValue};
pub use strictness::Strictness;
pub use type_tag::TypeTag;
