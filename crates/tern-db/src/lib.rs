//! tern-db - Database abstraction layer for tern
//!
//! This crate provides the `Database` trait, the DuckDB implementation, the
//! `Connector` factory used to open connections, and the statement splitter
//! and executor that run migration scripts.

pub mod connector;
pub mod duckdb;
pub mod error;
pub mod executor;
pub mod splitter;
pub mod traits;

pub use connector::{Connector, DuckDbConnector};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use executor::ScriptExecutor;
pub use splitter::StatementSplitter;
pub use traits::{with_transaction, Database, Row};
