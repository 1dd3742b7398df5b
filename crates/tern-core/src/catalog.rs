//! Script catalog: the ordered set of migration scripts in a directory
//!
//! A file is a migration script when its name starts with ASCII digits and
//! ends with one of the configured extensions (compared case-insensitively).
//! Subdirectories are not searched.
//!
//! Scripts are ordered by the integer value of their numeric prefix, so
//! `9_x.sql` runs before `10_y.sql` whether or not prefixes are zero-padded.
//! Scripts sharing the same value (`1_a.sql`, `01_b.sql`) are ordered by
//! file name.

use crate::error::{CoreError, CoreResult};
use crate::script::MigrationScript;
use std::path::Path;

/// Ordered list of migration scripts
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scripts: Vec<MigrationScript>,
}

impl Catalog {
    /// Discover migration scripts in `dir`.
    ///
    /// An empty directory yields an empty catalog. An unreadable directory is
    /// a [`CoreError::Discovery`].
    pub fn discover(dir: &Path, extensions: &[String]) -> CoreResult<Self> {
        let discovery_err = |e: std::io::Error| CoreError::Discovery {
            path: dir.display().to_string(),
            source: e,
        };

        let mut scripts = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(discovery_err)? {
            let path = entry.map_err(discovery_err)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                log::debug!("Ignoring non UTF-8 file name: {}", path.display());
                continue;
            };
            if !has_script_extension(file_name, extensions) {
                continue;
            }
            if let Some(script) = MigrationScript::from_path(&path)? {
                scripts.push(script);
            }
        }

        Ok(Self::from_scripts(scripts))
    }

    /// Build a catalog from already-discovered scripts, applying the
    /// catalog ordering and dropping duplicate names.
    pub fn from_scripts(mut scripts: Vec<MigrationScript>) -> Self {
        scripts.sort_by(|a, b| {
            a.ordinal
                .cmp(&b.ordinal)
                .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        });
        scripts.dedup_by(|a, b| a.name == b.name);
        Self { scripts }
    }

    /// Keep only scripts whose ordinal is at most `limit`
    pub fn up_to(self, limit: u64) -> Self {
        Self {
            scripts: self
                .scripts
                .into_iter()
                .filter(|s| s.ordinal <= limit)
                .collect(),
        }
    }

    /// Scripts in run order
    pub fn scripts(&self) -> &[MigrationScript] {
        &self.scripts
    }

    /// Iterate scripts in run order
    pub fn iter(&self) -> std::slice::Iter<'_, MigrationScript> {
        self.scripts.iter()
    }

    /// Number of scripts
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Whether the catalog has no scripts
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MigrationScript;
    type IntoIter = std::slice::Iter<'a, MigrationScript>;

    fn into_iter(self) -> Self::IntoIter {
        self.scripts.iter()
    }
}

fn has_script_extension(file_name: &str, extensions: &[String]) -> bool {
    let lower = file_name.to_ascii_lowercase();
    extensions.iter().any(|ext| {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        lower.len() > ext.len() + 1 && lower.ends_with(&format!(".{ext}"))
    })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
