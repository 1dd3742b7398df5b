//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Row};
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn transaction_control(&self, sql: &str) -> DbResult<()> {
        self.conn()?
            .execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {e}")))
    }
}

impl Database for DuckDbBackend {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        log::debug!("Executing: {sql}");
        Ok(self.conn()?.execute(sql, [])?)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        log::debug!("Executing: {sql}");
        Ok(self.conn()?.execute_batch(sql)?)
    }

    fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count: i64 = self.conn()?.query_row(
            &format!("SELECT COUNT(*) FROM ({})", sql),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn query_rows(&self, sql: &str, width: usize) -> DbResult<Vec<Row>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Option<String>>(i))
                .collect::<Result<Row, _>>()
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn relation_exists(&self, schema: &str, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn begin(&self) -> DbResult<()> {
        self.transaction_control("BEGIN TRANSACTION")
    }

    fn commit(&self) -> DbResult<()> {
        self.transaction_control("COMMIT")
    }

    fn rollback(&self) -> DbResult<()> {
        self.transaction_control("ROLLBACK")
    }

    fn supports_transactional_ddl(&self) -> bool {
        true
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
