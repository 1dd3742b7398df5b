//! Configuration types and parsing for tern.yml
//!
//! Every key is optional. Resolution order for the database path is:
//! `--database` flag, then `TERN_DATABASE`, then `database.path` in the
//! config file, then [`DEFAULT_DB_PATH`].

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the database path
pub const DATABASE_ENV: &str = "TERN_DATABASE";

/// Database path used when nothing else is configured
pub const DEFAULT_DB_PATH: &str = "tern.duckdb";

/// File names probed in the script directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["tern.yml", "tern.yaml"];

/// Main configuration from tern.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Where the ledger table lives
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// How script text is split into statements
    #[serde(default)]
    pub statements: StatementConfig,

    /// File extensions recognized as migration scripts (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Ledger table location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Schema holding the ledger table (created if missing)
    #[serde(default = "default_ledger_schema")]
    pub schema: String,

    /// Ledger table name
    #[serde(default = "default_ledger_table")]
    pub table: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            schema: default_ledger_schema(),
            table: default_ledger_table(),
        }
    }
}

/// Statement splitting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementConfig {
    /// Text that separates two statements in a script
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            ledger: LedgerConfig::default(),
            statements: StatementConfig::default(),
            extensions: default_extensions(),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_ledger_schema() -> String {
    "main".to_string()
}

fn default_ledger_table() -> String {
    "tern_migrations".to_string()
}

fn default_delimiter() -> String {
    ";\n".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["sql".to_string()]
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParse {
                path: path.display().to_string(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a script directory.
    ///
    /// Looks for tern.yml or tern.yaml and falls back to defaults when
    /// neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                log::debug!("Loading config {}", path.display());
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                self.database.path = path.trim().to_string();
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        if self.ledger.schema.trim().is_empty() || self.ledger.table.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "ledger.schema and ledger.table cannot be empty".to_string(),
            });
        }
        if self.statements.delimiter.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "statements.delimiter cannot be empty".to_string(),
            });
        }
        if self.extensions.is_empty()
            || self
                .extensions
                .iter()
                .any(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(CoreError::ConfigInvalid {
                message: "extensions must list at least one non-empty extension".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
