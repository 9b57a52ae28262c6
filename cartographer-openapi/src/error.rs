//! Error types for document generation

use crate::registry::SchemaDialect;
use thiserror::Error;

/// Errors that abort a document build or a configuration load.
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// An endpoint record failed validation.
    #[error("Invalid endpoint metadata: {0}")]
    Metadata(#[from] cartographer_core::Error),

    #[error(
        "Schema dialect mismatch: registry emits {registry}, document version {version} requires {requested}"
    )]
    DialectMismatch {
        registry: SchemaDialect,
        requested: SchemaDialect,
        version: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for OpenApiError {
    fn from(err: serde_json::Error) -> Self {
        OpenApiError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for OpenApiError {
    fn from(err: serde_yaml::Error) -> Self {
        OpenApiError::Serialization(err.to_string())
    }
}

/// Result type for document generation
pub type Result<T> = std::result::Result<T, OpenApiError>;
