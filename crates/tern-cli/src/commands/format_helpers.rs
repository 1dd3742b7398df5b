//! Console formatting for run reports and errors.
//!
//! Colors are raw ANSI escapes; every helper takes a `color` switch so
//! `--no-color` output is plain text.

use tern_migrate::{RunOutcome, RunReport, ScriptOutcome};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Width of the outcome column
const LABEL_WIDTH: usize = 11;

/// Wrap `text` in `code` when color is on
pub(crate) fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

fn outcome_color(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Applied | RunOutcome::Filled => GREEN,
        RunOutcome::AlreadyApplied => GRAY,
        RunOutcome::WouldApply => YELLOW,
        RunOutcome::Failed => RED,
    }
}

/// Padded, colored outcome label
pub(crate) fn outcome_label(outcome: RunOutcome, color: bool) -> String {
    let label = format!("{:<width$}", outcome.to_string(), width = LABEL_WIDTH);
    paint(&label, outcome_color(outcome), color)
}

/// One report line per script
pub(crate) fn format_outcome_line(outcome: &ScriptOutcome, color: bool) -> String {
    format!(
        "  {} {}",
        outcome_label(outcome.outcome, color),
        outcome.script
    )
}

/// Closing summary, e.g. `OK apply: 2 applied, 1 skipped [12ms]`
pub(crate) fn format_summary(report: &RunReport, color: bool) -> String {
    let counts: Vec<String> = RunOutcome::ALL
        .iter()
        .map(|o| (report.count(*o), o))
        .filter(|(n, _)| *n > 0)
        .map(|(n, o)| format!("{n} {o}"))
        .collect();
    let counts = if counts.is_empty() {
        "no scripts".to_string()
    } else {
        counts.join(", ")
    };

    let status = if report.succeeded() {
        paint("OK", GREEN, color)
    } else {
        paint("FAILED", RED, color)
    };

    format!(
        "{status} {}: {counts} [{}ms]",
        report.mode, report.elapsed_ms
    )
}

/// Error line with the full cause chain
pub(crate) fn format_error(err: &anyhow::Error, color: bool) -> String {
    format!("{} {err:#}", paint("ERROR", RED, color))
}

#[cfg(test)]
#[path = "format_helpers_test.rs"]
mod tests;
