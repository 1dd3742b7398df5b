//! Logger setup for the tern binary.
//!
//! Logs go to stderr so stdout carries only the run report.

use log::LevelFilter;

/// Level selected by `--quiet` / `--verbose`
pub(crate) fn level(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger
pub(crate) fn init(quiet: bool, verbose: bool, color: bool) -> Result<(), log::SetLoggerError> {
    let write_style = if color {
        env_logger::WriteStyle::Auto
    } else {
        env_logger::WriteStyle::Never
    };

    env_logger::Builder::new()
        .filter_level(level(quiet, verbose))
        .format_timestamp(None)
        .format_target(false)
        .write_style(write_style)
        .try_init()
}
