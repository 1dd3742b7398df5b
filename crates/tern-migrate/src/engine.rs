//! The migration engine.
//!
//! Each script visited goes `Pending -> Skip` when the ledger already holds a
//! success for it, or `Pending -> Attempt -> {Applied | Failed}` otherwise.
//! A success row is written inside the script's own transaction, right
//! before commit. A failure row is written after the rollback, on its own,
//! and then the run aborts.

use crate::error::{MigrateError, MigrateResult};
use crate::mode::{RunConfig, RunMode};
use crate::outcome::{RunOutcome, RunReport};
use std::path::Path;
use std::time::Instant;
use tern_core::{Catalog, MigrationScript};
use tern_db::{Connector, Database, DbError, ScriptExecutor, StatementSplitter};
use tern_ledger::{Attempt, LedgerError, LedgerStore};

/// Open a connection through `connector`, mapping failures to
/// [`MigrateError::Connection`].
pub fn connect(connector: &dyn Connector) -> MigrateResult<Box<dyn Database>> {
    connector.connect().map_err(|e| MigrateError::Connection {
        target: connector.describe(),
        source: e,
    })
}

/// Failure inside a script's transaction
enum AttemptError {
    /// A statement failed
    Db(DbError),
    /// The success row could not be written
    Ledger(LedgerError),
}

impl From<DbError> for AttemptError {
    fn from(e: DbError) -> Self {
        AttemptError::Db(e)
    }
}

/// Runs a catalog against one database
pub struct Migrator<'a> {
    db: &'a dyn Database,
    config: RunConfig,
}

impl<'a> Migrator<'a> {
    pub fn new(db: &'a dyn Database, config: RunConfig) -> Self {
        Self { db, config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// List the scripts of `dir` this run considers
    pub fn discover(&self, dir: &Path) -> MigrateResult<Catalog> {
        self.config.discover(dir)
    }

    /// Discover the scripts of `dir` and run them.
    ///
    /// Discovery happens before anything touches the ledger, so an
    /// unreadable directory never resets it.
    pub fn run_dir(&self, dir: &Path) -> MigrateResult<RunReport> {
        let catalog = self.discover(dir)?;
        self.run(&catalog)
    }

    /// Run `catalog` and return the report
    pub fn run(&self, catalog: &Catalog) -> MigrateResult<RunReport> {
        let mut report = RunReport::new(self.config.mode);
        self.run_into(catalog, &mut report)?;
        Ok(report)
    }

    /// Run `catalog`, pushing outcomes into `report` as they happen.
    ///
    /// On error `report` still holds every outcome up to and including the
    /// failed script.
    pub fn run_into(&self, catalog: &Catalog, report: &mut RunReport) -> MigrateResult<()> {
        let started = Instant::now();
        report.mode = self.config.mode;

        let result = match self.config.mode {
            RunMode::Apply => self.apply(catalog, report),
            RunMode::DryRun => self.dry_run(catalog, report),
            RunMode::Fill => self.fill(catalog, report),
        };

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        result
    }

    fn ledger(&self) -> LedgerStore<'a> {
        LedgerStore::new(self.db, &self.config.ledger)
    }

    fn apply(&self, catalog: &Catalog, report: &mut RunReport) -> MigrateResult<()> {
        let ledger = self.ledger();
        if self.config.init {
            ledger.reset()?;
        }
        ledger.ensure_schema()?;

        let executor = ScriptExecutor::new(
            self.db,
            StatementSplitter::new(self.config.delimiter.clone()),
        );

        for script in catalog {
            if !self.config.init && ledger.has_succeeded(&script.name)? {
                log::info!("Skipping {} (already applied)", script.name);
                report.push(&script.name, RunOutcome::AlreadyApplied);
                continue;
            }

            log::info!("Applying {}", script.name);
            match self.attempt(&ledger, &executor, script) {
                Ok(()) => report.push(&script.name, RunOutcome::Applied),
                Err(e) => {
                    report.push(&script.name, RunOutcome::Failed);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn attempt(
        &self,
        ledger: &LedgerStore<'_>,
        executor: &ScriptExecutor<'_>,
        script: &MigrationScript,
    ) -> MigrateResult<()> {
        let name = script.name.as_str();
        let sql = script.source()?;

        let result = executor.execute_with(&sql, |tx| {
            ledger
                .record_with(tx, name, &Attempt::Success)
                .map_err(AttemptError::Ledger)
        });

        match result {
            Ok(count) => {
                log::debug!("{name}: {count} statement(s) committed");
                Ok(())
            }
            Err(AttemptError::Ledger(e)) => Err(MigrateError::LedgerWrite {
                script: name.to_string(),
                source: e,
            }),
            Err(AttemptError::Db(e)) => {
                log::error!("{name} failed and was rolled back: {e}");
                match ledger.record(name, &Attempt::Failure(e.to_string())) {
                    Ok(()) => Err(MigrateError::Statement {
                        script: name.to_string(),
                        source: e,
                    }),
                    Err(ledger_err) => Err(MigrateError::FailureNotRecorded {
                        script: name.to_string(),
                        statement: e,
                        ledger: ledger_err,
                    }),
                }
            }
        }
    }

    fn dry_run(&self, catalog: &Catalog, report: &mut RunReport) -> MigrateResult<()> {
        let ledger = self.ledger();
        let consult_ledger = !self.config.init && ledger.exists()?;
        if !consult_ledger && !self.config.init {
            log::info!(
                "Ledger {} does not exist yet; every script would apply",
                ledger.table().qualified()
            );
        }

        for script in catalog {
            if consult_ledger && ledger.has_succeeded(&script.name)? {
                log::info!("Skipping {} (already applied)", script.name);
                report.push(&script.name, RunOutcome::AlreadyApplied);
            } else {
                log::info!("Would apply {}", script.name);
                report.push(&script.name, RunOutcome::WouldApply);
            }
        }
        Ok(())
    }

    fn fill(&self, catalog: &Catalog, report: &mut RunReport) -> MigrateResult<()> {
        let ledger = self.ledger();
        ledger.reset()?;
        ledger.ensure_schema()?;

        for script in catalog {
            log::info!("Filling {}", script.name);
            ledger
                .record(&script.name, &Attempt::Success)
                .map_err(|e| MigrateError::LedgerWrite {
                    script: script.name.to_string(),
                    source: e,
                })?;
            report.push(&script.name, RunOutcome::Filled);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
