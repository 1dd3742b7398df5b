//! Environment file loading
//!
//! `KEY=VALUE` lines are exported into the process environment, replacing
//! any value already set. Blank lines and `#` comments are skipped.

use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Load `path` into the process environment.
pub fn load_env_file(path: &Path) -> CoreResult<()> {
    log::info!("Loading environment {}", path.display());
    dotenvy::from_filename_override(path).map_err(|e| CoreError::EnvFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
