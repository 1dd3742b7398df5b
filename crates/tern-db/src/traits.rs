//! Database trait definition

use crate::error::{DbError, DbResult};

/// A result row with every column rendered as text (`None` for SQL NULL)
pub type Row = Vec<Option<String>>;

/// Database abstraction trait for tern
///
/// All calls are blocking. Implementations hold a single connection, so
/// `begin`/`commit`/`rollback` bracket every statement issued in between.
pub trait Database: Send + Sync {
    /// Execute a single SQL statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute SQL text that may contain several statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Count the rows produced by a query
    fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Run a query and return its first `width` columns as text.
    ///
    /// Callers cast non-text columns to VARCHAR in the query itself.
    fn query_rows(&self, sql: &str, width: usize) -> DbResult<Vec<Row>>;

    /// Check if a table or view exists in `schema`
    fn relation_exists(&self, schema: &str, name: &str) -> DbResult<bool>;

    /// Start a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;

    /// Whether DDL statements take part in transactions.
    ///
    /// When false a script cannot be applied atomically.
    fn supports_transactional_ddl(&self) -> bool;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// A failed `COMMIT` is rolled back and reported as
/// [`DbError::TransactionError`]. A failed `ROLLBACK` after a failed body is
/// logged; the body's error is the one returned.
pub fn with_transaction<T, E, F>(db: &dyn Database, body: F) -> Result<T, E>
where
    E: From<DbError>,
    F: FnOnce(&dyn Database) -> Result<T, E>,
{
    db.begin()?;

    match body(db) {
        Ok(value) => {
            if let Err(commit_err) = db.commit() {
                if let Err(rollback_err) = db.rollback() {
                    log::warn!("ROLLBACK after failed COMMIT also failed: {rollback_err}");
                }
                return Err(E::from(DbError::TransactionError(format!(
                    "COMMIT failed: {commit_err}"
                ))));
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = db.rollback() {
                log::warn!("ROLLBACK failed: {rollback_err}");
            }
            Err(err)
        }
    }
}
