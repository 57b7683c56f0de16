//! Row sources for pdlog
//!
//! This crate provides:
//! - [`RowSource`] - streams named-column rows for a query
//! - MySQL and SQLite sources backed by sqlx
//! - An in-memory source

pub mod error;
pub mod memory;
pub mod mysql;
pub mod record;
pub mod source;
pub mod sqlite;

pub use error::{Result, StorageError};
pub use memory::MemorySource;
pub use mysql::MySqlSource;
pub use record::{NULL_TEXT, Record};
pub use source::{RecordVisitor, RowSource};
pub use sqlite::SqliteSource;
