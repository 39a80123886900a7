//! Error hierarchy for Ward.

use thiserror::Error;

/// Top-level error type for all Ward operations.
#[derive(Debug, Error)]
pub enum WardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Permission denied: {0}")]
    Permission(#[from] PermissionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from reading or writing actor/role directory snapshots.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unexpected snapshot shape at {path}: {message}")]
    Shape { path: String, message: String },
}

/// A gated action was refused for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("You do not have permission to {action} {category}")]
    Denied { category: String, action: String },
}

/// A category or action name that is blank once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} name is empty")]
pub struct EmptyName {
    pub kind: &'static str,
}
