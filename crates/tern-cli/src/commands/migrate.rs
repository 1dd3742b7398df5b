//! The migration command: resolve configuration, connect, run, report.

use anyhow::{Context, Result};
use std::path::Path;
use tern_core::env_file::load_env_file;
use tern_core::Config;
use tern_db::{Connector, DuckDbConnector};
use tern_migrate::{connect, Migrator, RunConfig, RunReport};

use crate::cli::Cli;
use crate::commands::format_helpers::{format_outcome_line, format_summary};

/// Execute a migration run as described by the command line
pub(crate) fn execute(cli: &Cli) -> Result<()> {
    let dir = cli.directory();

    if let Some(env) = &cli.env {
        load_env_file(env).context("Failed to load environment file")?;
    }

    let config = resolve_config(cli, dir)?;
    let run_config = RunConfig::from_config(&config)
        .with_mode(cli.mode())
        .with_init(cli.init)
        .with_upto(cli.upto);

    // Discover before connecting so a bad directory never opens the database
    let catalog = run_config
        .discover(dir)
        .with_context(|| format!("Failed to list scripts in {}", dir.display()))?;

    let connector = DuckDbConnector::new(config.database.path.clone());
    log::debug!("Using {}", connector.describe());
    let db = connect(&connector)?;

    let migrator = Migrator::new(db.as_ref(), run_config);
    let mut report = RunReport::new(cli.mode());
    let result = migrator.run_into(&catalog, &mut report);

    print_report(&report, cli)?;
    result.context("Migration run aborted")?;
    Ok(())
}

/// Load tern.yml (or `--config`), then apply `TERN_DATABASE` and `--database`
fn resolve_config(cli: &Cli, dir: &Path) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_from_dir(dir),
    }
    .context("Failed to load configuration")?;

    config.apply_env_overrides();
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }
    Ok(config)
}

fn print_report(report: &RunReport, cli: &Cli) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let color = cli.color();
    for outcome in &report.outcomes {
        println!("{}", format_outcome_line(outcome, color));
    }
    println!("{}", format_summary(report, color));
    Ok(())
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
