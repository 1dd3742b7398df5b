//! Migration ledger for tern.
//!
//! The ledger is a table inside the target database with one row per script
//! attempt. A script counts as applied once any of its rows is a success;
//! failed attempts are kept as history and never block a retry.

pub mod ddl;
pub mod entry;
pub mod error;
pub mod store;

pub use entry::{Attempt, LedgerEntry};
pub use error::{LedgerError, LedgerResult};
pub use store::LedgerStore;
