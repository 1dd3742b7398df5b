//! tern-migrate - Migration engine for tern
//!
//! The [`Migrator`] walks a [`tern_core::Catalog`] in order, asks the ledger
//! whether each script already ran, applies new scripts atomically, and
//! records every attempt. A failed script aborts the run.

pub mod engine;
pub mod error;
pub mod mode;
pub mod outcome;

pub use engine::{connect, Migrator};
pub use error::{MigrateError, MigrateResult};
pub use mode::{RunConfig, RunMode};
pub use outcome::{RunOutcome, RunReport, ScriptOutcome};
