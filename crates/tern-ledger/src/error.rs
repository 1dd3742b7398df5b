//! Error types for the ledger.

use thiserror::Error;

/// Ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The ledger table could not be probed, created, or dropped (L001).
    #[error("[L001] Ledger schema error: {0}")]
    SchemaError(String),

    /// Reading the ledger failed (L002).
    #[error("[L002] Ledger query failed: {0}")]
    QueryError(String),

    /// Appending an entry failed (L003).
    #[error("[L003] Ledger write failed: {0}")]
    WriteError(String),

    /// A row could not be decoded into a ledger entry (L004).
    #[error("[L004] Corrupt ledger entry: {0}")]
    CorruptEntry(String),
}

/// Result type alias for [`LedgerError`].
pub type LedgerResult<T> = Result<T, LedgerError>;
