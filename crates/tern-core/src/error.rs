//! Error types for tern-core

use thiserror::Error;

/// Core error type for tern
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Script directory could not be read
    #[error("[C001] Cannot read script directory '{path}': {source}")]
    Discovery {
        path: String,
        source: std::io::Error,
    },

    /// C002: Script file could not be read
    #[error("[C002] Cannot read script '{path}': {source}")]
    ScriptRead {
        path: String,
        source: std::io::Error,
    },

    /// C003: Numeric prefix of a script name is out of range
    #[error("[C003] Script '{name}' has a numeric prefix that does not fit in 64 bits")]
    PrefixOverflow { name: String },

    /// C004: Configuration file not found
    #[error("[C004] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C005: Failed to read configuration file
    #[error("[C005] Failed to read '{path}': {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// C006: Failed to parse configuration file
    #[error("[C006] Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        source: serde_yaml::Error,
    },

    /// C007: Invalid configuration value
    #[error("[C007] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C008: Environment file could not be loaded
    #[error("[C008] Failed to load environment file '{path}': {source}")]
    EnvFile {
        path: String,
        source: dotenvy::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
