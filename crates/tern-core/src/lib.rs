//! tern-core - Core library for tern
//!
//! This crate provides the script catalog, the `MigrationScript` type,
//! configuration loading (`tern.yml` plus environment overrides), the
//! environment file loader, and SQL quoting helpers shared by the other
//! tern crates.

pub mod catalog;
pub mod config;
pub mod env_file;
pub mod error;
pub mod script;
pub mod script_name;
pub mod sql_utils;

pub use catalog::Catalog;
pub use config::{Config, DatabaseConfig, LedgerConfig, StatementConfig};
pub use error::{CoreError, CoreResult};
pub use script::MigrationScript;
pub use script_name::ScriptName;
