//! Connection factory
//!
//! The engine never opens connections itself. The binary builds a
//! [`Connector`] from configuration and hands the resulting connection to the
//! engine, which lets tests substitute their own databases.

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::traits::Database;

/// Opens a ready-to-use database connection
pub trait Connector {
    /// Open the connection
    fn connect(&self) -> DbResult<Box<dyn Database>>;

    /// Human-readable description of the target, safe to log
    fn describe(&self) -> String;
}

/// Connector for a DuckDB database file (or `:memory:`)
#[derive(Debug, Clone)]
pub struct DuckDbConnector {
    path: String,
}

impl DuckDbConnector {
    /// Create a connector for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Connector for DuckDbConnector {
    fn connect(&self) -> DbResult<Box<dyn Database>> {
        log::debug!("Connecting to {}", self.describe());
        Ok(Box::new(DuckDbBackend::new(&self.path)?))
    }

    fn describe(&self) -> String {
        format!("duckdb:{}", self.path)
    }
}
