//! Script executor
//!
//! Runs the statements of one script in order. On a backend with
//! transactional DDL the whole script runs inside one transaction, so a
//! failing statement leaves no trace of the statements before it. Execution
//! stops at the first failing statement.

use crate::error::{DbError, DbResult};
use crate::splitter::StatementSplitter;
use crate::traits::{with_transaction, Database};

/// Executes migration scripts against a database
pub struct ScriptExecutor<'a> {
    db: &'a dyn Database,
    splitter: StatementSplitter,
}

impl<'a> ScriptExecutor<'a> {
    /// Create an executor over `db`
    pub fn new(db: &'a dyn Database, splitter: StatementSplitter) -> Self {
        Self { db, splitter }
    }

    /// Execute `script` atomically. Returns the number of statements run.
    pub fn execute(&self, script: &str) -> DbResult<usize> {
        self.execute_with(script, |_| Ok::<(), DbError>(()))
    }

    /// Execute `script`, then run `before_commit` in the same transaction.
    ///
    /// `before_commit` only runs when every statement succeeded; if it fails
    /// the script's statements are rolled back with it. Statement failures
    /// reach the caller as [`DbError::StatementFailed`] converted into `E`.
    pub fn execute_with<E, F>(&self, script: &str, before_commit: F) -> Result<usize, E>
    where
        E: From<DbError>,
        F: FnOnce(&dyn Database) -> Result<(), E>,
    {
        let statements = self.splitter.split(script);

        if !self.db.supports_transactional_ddl() {
            log::warn!(
                "{} does not support transactional DDL; script is not atomic",
                self.db.db_type()
            );
            run_statements(self.db, &statements)?;
            before_commit(self.db)?;
            return Ok(statements.len());
        }

        with_transaction(self.db, |tx| {
            run_statements(tx, &statements)?;
            before_commit(tx)?;
            Ok(statements.len())
        })
    }
}

fn run_statements(db: &dyn Database, statements: &[String]) -> DbResult<()> {
    let total = statements.len();
    for (i, statement) in statements.iter().enumerate() {
        db.execute_batch(statement)
            .map_err(|e| DbError::StatementFailed {
                index: i + 1,
                total,
                statement: statement.clone(),
                message: e.to_string(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
