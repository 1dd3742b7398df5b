//! CLI argument definitions using clap derive API

use clap::Parser;
use std::path::{Path, PathBuf};
use tern_migrate::RunMode;

/// tern - apply ordered SQL migration scripts exactly once
#[derive(Parser, Debug)]
#[command(name = "tern")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the migration scripts
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Environment file loaded before connecting (KEY=VALUE lines)
    #[arg(short, long, value_name = "FILE")]
    pub env: Option<PathBuf>,

    /// Erase the ledger first and apply every script
    #[arg(long)]
    pub init: bool,

    /// Show what would be applied without changing anything
    #[arg(short = 'n', long, conflicts_with = "fill")]
    pub dry_run: bool,

    /// Record every script as applied without running it
    #[arg(long)]
    pub fill: bool,

    /// Only consider scripts whose numeric prefix is at most N
    #[arg(long, value_name = "N")]
    pub upto: Option<u64>,

    /// Suppress log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug log output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Config file (default: tern.yml in the script directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database path, overriding TERN_DATABASE and the config file
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<String>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Script directory, defaulting to the current directory
    pub fn directory(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Run mode selected by the flags
    pub fn mode(&self) -> RunMode {
        if self.fill {
            RunMode::Fill
        } else if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Apply
        }
    }

    /// Whether console output may use ANSI colors
    pub fn color(&self) -> bool {
        !self.no_color && !self.json
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
