//! Migration script discovered on disk

use crate::error::{CoreError, CoreResult};
use crate::script_name::ScriptName;
use std::path::{Path, PathBuf};

/// A migration script found in the script directory.
///
/// The SQL text is not held in memory; it is read from `path` only when the
/// script has to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    /// File name, used as the ledger identifier
    pub name: ScriptName,

    /// Integer value of the leading digits of the file name
    pub ordinal: u64,

    /// Full path to the script file
    pub path: PathBuf,
}

impl MigrationScript {
    /// Build a script from its file path.
    ///
    /// Returns `Ok(None)` when the file name has no numeric prefix.
    pub fn from_path(path: &Path) -> CoreResult<Option<Self>> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(digits) = numeric_prefix(file_name) else {
            return Ok(None);
        };
        let ordinal = digits
            .parse::<u64>()
            .map_err(|_| CoreError::PrefixOverflow {
                name: file_name.to_string(),
            })?;

        Ok(Some(Self {
            name: ScriptName::new(file_name),
            ordinal,
            path: path.to_path_buf(),
        }))
    }

    /// Read the script's SQL text from disk
    pub fn source(&self) -> CoreResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| CoreError::ScriptRead {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

/// Return the run of ASCII digits at the start of `name`, if any.
pub fn numeric_prefix(name: &str) -> Option<&str> {
    let end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(name.len());
    if end == 0 {
        None
    } else {
        Some(&name[..end])
    }
}
