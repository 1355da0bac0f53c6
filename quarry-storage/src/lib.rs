//! # quarry-storage
//!
//! Named SQL queries loaded from external resources, handed out by name from
//! a catalog, executed through a tabular driver and read back field by field.
//!
//! ```text
//! catalog.toml ──▶ QueryCatalog ──get(name)──▶ NamedQuery
//!                                                 │ set_statement / set_cursor
//!                                                 ▼
//!                                      Cursor (SqliteDriver or any driver)
//! ```

pub mod catalog;
pub mod driver;
pub mod loader;
pub mod query;

pub use catalog::{global, install_global, LazyCatalog, QueryCatalog, QueryMapping, SharedQuery};
pub use driver::{Cursor, SqliteCursor, SqliteDriver, SqliteStatement, Statement};
pub use loader::{FsLoader, MemoryLoader, ResourceLoader};
pub use query::{ExecutionScope, NamedQuery};
