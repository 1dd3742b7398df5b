//! Command implementations

pub(crate) mod format_helpers;
pub(crate) mod migrate;
