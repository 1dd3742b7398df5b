//! Per-script outcomes and the run report.

use crate::mode::RunMode;
use serde::Serialize;
use std::fmt;
use tern_core::ScriptName;

/// What happened to one script in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Executed and recorded as a success
    Applied,
    /// A success was already recorded; nothing ran
    AlreadyApplied,
    /// Dry run: the script would have been applied
    WouldApply,
    /// Fill: recorded as applied without executing
    Filled,
    /// Executed and rolled back; the run stopped here
    Failed,
}

impl RunOutcome {
    /// All outcomes, in summary order
    pub const ALL: [RunOutcome; 5] = [
        RunOutcome::Applied,
        RunOutcome::AlreadyApplied,
        RunOutcome::WouldApply,
        RunOutcome::Filled,
        RunOutcome::Failed,
    ];
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Applied => write!(f, "applied"),
            RunOutcome::AlreadyApplied => write!(f, "skipped"),
            RunOutcome::WouldApply => write!(f, "would apply"),
            RunOutcome::Filled => write!(f, "filled"),
            RunOutcome::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptOutcome {
    pub script: ScriptName,
    pub outcome: RunOutcome,
}

/// Result of a run, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub outcomes: Vec<ScriptOutcome>,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            outcomes: Vec::new(),
            elapsed_ms: 0,
        }
    }

    pub(crate) fn push(&mut self, script: &ScriptName, outcome: RunOutcome) {
        self.outcomes.push(ScriptOutcome {
            script: script.clone(),
            outcome,
        });
    }

    /// Number of scripts with `outcome`
    pub fn count(&self, outcome: RunOutcome) -> usize {
        self.outcomes.iter().filter(|o| o.outcome == outcome).count()
    }

    /// Scripts with `outcome`, in catalog order
    pub fn scripts_with(&self, outcome: RunOutcome) -> Vec<&ScriptName> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == outcome)
            .map(|o| &o.script)
            .collect()
    }

    /// True when no script failed
    pub fn succeeded(&self) -> bool {
        self.count(RunOutcome::Failed) == 0
    }
}
