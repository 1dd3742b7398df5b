//! Ledger rows and attempt outcomes.

use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDateTime;
use serde::Serialize;
use tern_core::ScriptName;
use tern_db::Row;

/// Outcome of one attempt to apply a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// Every statement ran and committed
    Success,
    /// The script failed with this error text
    Failure(String),
}

/// One row of the ledger table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub script: ScriptName,
    pub applied_at: NaiveDateTime,
    pub success: bool,
    /// Present exactly when `success` is false
    pub error: Option<String>,
}

impl LedgerEntry {
    /// Decode a row produced by [`crate::ddl::LedgerTable::select_entries_sql`]
    pub(crate) fn from_row(row: Row) -> LedgerResult<Self> {
        let [id, script, applied_at, success, error]: [Option<String>; 5] =
            row.try_into().map_err(|r: Row| {
                LedgerError::CorruptEntry(format!("expected 5 columns, got {}", r.len()))
            })?;

        let id = required(id, "id")?;
        let id = id
            .parse::<i64>()
            .map_err(|e| LedgerError::CorruptEntry(format!("id '{id}': {e}")))?;
        let script = required(script, "script")?;
        let applied_at = required(applied_at, "applied_at")?;
        let applied_at = NaiveDateTime::parse_from_str(&applied_at, "%Y-%m-%d %H:%M:%S%.f")
            .map_err(|e| LedgerError::CorruptEntry(format!("applied_at '{applied_at}': {e}")))?;
        let success = match required(success, "success")?.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(LedgerError::CorruptEntry(format!(
                    "success '{other}' is not a boolean"
                )))
            }
        };

        Ok(Self {
            id,
            script: ScriptName::new(script),
            applied_at,
            success,
            error,
        })
    }
}

fn required(value: Option<String>, column: &str) -> LedgerResult<String> {
    value.ok_or_else(|| LedgerError::CorruptEntry(format!("{column} is NULL")))
}
