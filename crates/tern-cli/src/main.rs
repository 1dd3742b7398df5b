//! tern - apply ordered SQL migration scripts exactly once

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;

use cli::Cli;
use commands::format_helpers::format_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = cli.color();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, color) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match commands::migrate::execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&err, color));
            ExitCode::FAILURE
        }
    }
}
