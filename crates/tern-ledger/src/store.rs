//! Ledger store over a [`Database`] connection.
//!
//! [`LedgerStore`] holds no state besides the table location: every answer
//! comes from the database, which is the only source of truth for whether a
//! script has run.

use crate::ddl::LedgerTable;
use crate::entry::{Attempt, LedgerEntry};
use crate::error::{LedgerError, LedgerResult};
use tern_core::LedgerConfig;
use tern_db::Database;

/// Reads and appends ledger rows
pub struct LedgerStore<'a> {
    db: &'a dyn Database,
    table: LedgerTable,
}

impl<'a> LedgerStore<'a> {
    /// Create a store for the ledger described by `config`
    pub fn new(db: &'a dyn Database, config: &LedgerConfig) -> Self {
        Self {
            db,
            table: LedgerTable::new(config.schema.clone(), config.table.clone()),
        }
    }

    /// Table location
    pub fn table(&self) -> &LedgerTable {
        &self.table
    }

    /// Whether the ledger table exists. Never creates anything.
    pub fn exists(&self) -> LedgerResult<bool> {
        self.db
            .relation_exists(&self.table.schema, &self.table.table)
            .map_err(|e| LedgerError::SchemaError(format!("failed to probe ledger: {e}")))
    }

    /// Create the ledger table unless a probe read shows it is already there.
    pub fn ensure_schema(&self) -> LedgerResult<()> {
        match self.db.query_count(&self.table.probe_sql()) {
            Ok(_) => Ok(()),
            Err(probe_err) => {
                log::info!("Creating ledger table {}", self.table.qualified());
                log::debug!("Ledger probe failed: {probe_err}");
                self.db
                    .execute_batch(&self.table.create_sql())
                    .map_err(|e| {
                        LedgerError::SchemaError(format!(
                            "failed to create ledger table {}: {e}",
                            self.table.qualified()
                        ))
                    })
            }
        }
    }

    /// Drop the ledger table and its id sequence.
    pub fn reset(&self) -> LedgerResult<()> {
        log::info!("Erasing ledger table {}", self.table.qualified());
        self.db.execute_batch(&self.table.drop_sql()).map_err(|e| {
            LedgerError::SchemaError(format!(
                "failed to drop ledger table {}: {e}",
                self.table.qualified()
            ))
        })
    }

    /// True iff at least one successful entry exists for `script`
    pub fn has_succeeded(&self, script: &str) -> LedgerResult<bool> {
        let count = self
            .db
            .query_count(&self.table.succeeded_sql(script))
            .map_err(|e| {
                LedgerError::QueryError(format!("failed to look up script {script}: {e}"))
            })?;
        Ok(count > 0)
    }

    /// Append one entry on the store's own connection
    pub fn record(&self, script: &str, attempt: &Attempt) -> LedgerResult<()> {
        self.record_with(self.db, script, attempt)
    }

    /// Append one entry through `db`, typically an open transaction on the
    /// same connection.
    pub fn record_with(
        &self,
        db: &dyn Database,
        script: &str,
        attempt: &Attempt,
    ) -> LedgerResult<()> {
        let sql = match attempt {
            Attempt::Success => self.table.insert_sql(script, true, None),
            Attempt::Failure(error) => self.table.insert_sql(script, false, Some(error)),
        };
        db.execute(&sql).map_err(|e| {
            LedgerError::WriteError(format!("failed to record script {script}: {e}"))
        })?;
        Ok(())
    }

    /// All entries, oldest first
    pub fn entries(&self) -> LedgerResult<Vec<LedgerEntry>> {
        self.select_entries(None)
    }

    /// Entries for one script, oldest first
    pub fn entries_for(&self, script: &str) -> LedgerResult<Vec<LedgerEntry>> {
        self.select_entries(Some(script))
    }

    fn select_entries(&self, script: Option<&str>) -> LedgerResult<Vec<LedgerEntry>> {
        self.db
            .query_rows(&self.table.select_entries_sql(script), 5)
            .map_err(|e| LedgerError::QueryError(format!("failed to read ledger: {e}")))?
            .into_iter()
            .map(LedgerEntry::from_row)
            .collect()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
