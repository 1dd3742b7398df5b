//! SQL text for the ledger table.
//!
//! DuckDB has no `AUTO_INCREMENT`; the id column draws from a sequence named
//! `<table>_id_seq` in the same schema.

use tern_core::sql_utils::{quote_ident, quote_literal, quote_qualified};

/// Schema every DuckDB database starts with
pub const DEFAULT_SCHEMA: &str = "main";

/// Location of the ledger table and its id sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTable {
    pub schema: String,
    pub table: String,
}

impl LedgerTable {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Quoted `schema.table`
    pub fn qualified(&self) -> String {
        quote_qualified(&self.schema, &self.table)
    }

    fn sequence_name(&self) -> String {
        format!("{}_id_seq", self.table)
    }

    fn qualified_sequence(&self) -> String {
        quote_qualified(&self.schema, &self.sequence_name())
    }

    /// Cheap read that fails when the table is missing
    pub fn probe_sql(&self) -> String {
        format!("SELECT id FROM {} LIMIT 1", self.qualified())
    }

    /// Non-destructive creation of the table (and schema, when not `main`)
    pub fn create_sql(&self) -> String {
        let mut sql = String::new();
        if self.schema != DEFAULT_SCHEMA {
            sql.push_str(&format!(
                "CREATE SCHEMA IF NOT EXISTS {};\n",
                quote_ident(&self.schema)
            ));
        }
        sql.push_str(&format!(
            "CREATE SEQUENCE IF NOT EXISTS {seq};
CREATE TABLE IF NOT EXISTS {table} (
    id         BIGINT PRIMARY KEY DEFAULT nextval({seq_literal}),
    script     VARCHAR NOT NULL,
    applied_at TIMESTAMP NOT NULL DEFAULT now(),
    success    BOOLEAN NOT NULL,
    error      VARCHAR
);",
            seq = self.qualified_sequence(),
            table = self.qualified(),
            seq_literal = quote_literal(&format!("{}.{}", self.schema, self.sequence_name())),
        ));
        sql
    }

    /// Drop the table and its sequence
    pub fn drop_sql(&self) -> String {
        format!(
            "DROP TABLE IF EXISTS {};\nDROP SEQUENCE IF EXISTS {};",
            self.qualified(),
            self.qualified_sequence()
        )
    }

    /// Append one attempt
    pub fn insert_sql(&self, script: &str, success: bool, error: Option<&str>) -> String {
        format!(
            "INSERT INTO {} (script, success, error) VALUES ({}, {}, {})",
            self.qualified(),
            quote_literal(script),
            success,
            error.map(quote_literal).unwrap_or_else(|| "NULL".to_string())
        )
    }

    /// Successful attempts for one script
    pub fn succeeded_sql(&self, script: &str) -> String {
        format!(
            "SELECT id FROM {} WHERE script = {} AND success",
            self.qualified(),
            quote_literal(script)
        )
    }

    /// All rows as text, oldest first, optionally for one script
    pub fn select_entries_sql(&self, script: Option<&str>) -> String {
        let filter = script
            .map(|s| format!(" WHERE script = {}", quote_literal(s)))
            .unwrap_or_default();
        format!(
            "SELECT CAST(id AS VARCHAR), script, CAST(applied_at AS VARCHAR), \
             CAST(success AS VARCHAR), error FROM {}{} ORDER BY id",
            self.qualified(),
            filter
        )
    }
}
