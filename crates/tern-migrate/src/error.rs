//! Error types for tern-migrate

use tern_core::CoreError;
use tern_db::DbError;
use tern_ledger::LedgerError;
use thiserror::Error;

/// Errors that abort a migration run
#[derive(Error, Debug)]
pub enum MigrateError {
    /// R001: Script directory or script file could not be read
    #[error("[R001] Script discovery failed: {0}")]
    Discovery(#[from] CoreError),

    /// R002: Database could not be opened
    #[error("[R002] Cannot connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: DbError,
    },

    /// R003: Ledger could not be probed, created, reset, or read
    #[error("[R003] {0}")]
    Ledger(#[from] LedgerError),

    /// R004: A script failed; its statements were rolled back and the
    /// failure was recorded
    #[error("[R004] Migration {script} failed: {source}")]
    Statement {
        script: String,
        #[source]
        source: DbError,
    },

    /// R005: The outcome of a script could not be recorded
    #[error("[R005] Could not record migration {script}: {source}")]
    LedgerWrite {
        script: String,
        #[source]
        source: LedgerError,
    },

    /// R006: A script failed and recording that failure failed too
    #[error(
        "[R006] Migration {script} failed ({statement}) and the failure could not be recorded: {ledger}"
    )]
    FailureNotRecorded {
        script: String,
        statement: DbError,
        ledger: LedgerError,
    },
}

impl MigrateError {
    /// Script the error is about, when there is one
    pub fn script(&self) -> Option<&str> {
        match self {
            MigrateError::Statement { script, .. }
            | MigrateError::LedgerWrite { script, .. }
            | MigrateError::FailureNotRecorded { script, .. } => Some(script),
            _ => None,
        }
    }
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
