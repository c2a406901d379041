//! Core error types for operator-core.
//!
//! The evaluators themselves are total and never fail. Errors only arise at
//! the edges: parsing caller input, reading the external store, and loading
//! or saving configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for operator-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// External store read failed
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Store failure without an underlying cause.
    pub fn store(message: impl Into<String>) -> Self {
        CoreError::Store {
            message: message.into(),
            source: None,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_store_error_keeps_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "kv timeout");
        let err = CoreError::Store {
            message: "streak unavailable".into(),
            source: Some(Box::new(cause)),
        };
        assert_eq!(err.to_string(), "Store error: streak unavailable");
        assert_eq!(err.source().unwrap().to_string(), "kv timeout");
        assert!(CoreError::store("down").source().is_none());
    }

    #[test]
    fn test_config_error_converts() {
        let err: CoreError = ConfigError::InvalidValue {
            key: "reflection.life_score".into(),
            message: "not a number".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(err.to_string().contains("reflection.life_score"));
    }
}
