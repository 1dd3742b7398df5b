//! Run modes and the per-run configuration handed to the engine.

use crate::error::MigrateResult;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tern_core::{Catalog, Config, LedgerConfig};
use tern_db::splitter::DEFAULT_DELIMITER;

/// How the engine treats scripts that have not run yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Execute new scripts and record each attempt
    #[default]
    Apply,
    /// Report what would run; never executes or writes
    DryRun,
    /// Record every script as applied without executing it
    Fill,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Apply => write!(f, "apply"),
            RunMode::DryRun => write!(f, "dry-run"),
            RunMode::Fill => write!(f, "fill"),
        }
    }
}

/// Everything one run needs besides the connection and the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: RunMode,

    /// Erase the ledger before the run so every script is attempted
    pub init: bool,

    /// Only consider scripts whose ordinal is at most this value
    pub upto: Option<u64>,

    pub ledger: LedgerConfig,

    /// Statement delimiter for the splitter
    pub delimiter: String,

    /// Recognized script extensions
    pub extensions: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Apply,
            init: false,
            upto: None,
            ledger: LedgerConfig::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            extensions: vec!["sql".to_string()],
        }
    }
}

impl RunConfig {
    /// Take ledger, splitting, and discovery settings from `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            ledger: config.ledger.clone(),
            delimiter: config.statements.delimiter.clone(),
            extensions: config.extensions.clone(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_init(mut self, init: bool) -> Self {
        self.init = init;
        self
    }

    pub fn with_upto(mut self, upto: Option<u64>) -> Self {
        self.upto = upto;
        self
    }

    /// List the scripts of `dir` this run considers, honoring `upto`
    pub fn discover(&self, dir: &Path) -> MigrateResult<Catalog> {
        let catalog = Catalog::discover(dir, &self.extensions)?;
        let catalog = match self.upto {
            Some(limit) => catalog.up_to(limit),
            None => catalog,
        };
        log::debug!("Found {} script(s) in {}", catalog.len(), dir.display());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_apply() {
        let config = RunConfig::default();
        assert_eq!(config.mode, RunMode::Apply);
        assert!(!config.init);
        assert_eq!(config.upto, None);
        assert_eq!(config.delimiter, ";\n");
        assert_eq!(config.ledger.table, "tern_migrations");
    }

    #[test]
    fn test_from_config_copies_settings() {
        let mut config = Config::default();
        config.ledger.schema = "ops".to_string();
        config.statements.delimiter = "\n/\n".to_string();
        config.extensions = vec!["ddl".to_string()];

        let run = RunConfig::from_config(&config)
            .with_mode(RunMode::DryRun)
            .with_upto(Some(3));

        assert_eq!(run.ledger.schema, "ops");
        assert_eq!(run.delimiter, "\n/\n");
        assert_eq!(run.extensions, vec!["ddl".to_string()]);
        assert_eq!(run.mode, RunMode::DryRun);
        assert_eq!(run.upto, Some(3));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(RunMode::DryRun.to_string(), "dry-run");
        assert_eq!(RunMode::Fill.to_string(), "fill");
    }
}
