// Error types for endpoint metadata and type catalogs

use thiserror::Error;

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading endpoint metadata or building a type catalog.
///
/// Every variant here means the input cannot be documented safely, so a
/// document build that hits one of them is aborted rather than degraded.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Endpoint #{index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Endpoint #{index}: unsupported HTTP method `{method}`")]
    InvalidMethod { index: usize, method: String },

    #[error("Endpoint #{index}: invalid route template `{route}`: {reason}")]
    InvalidRoute {
        index: usize,
        route: String,
        reason: String,
    },

    #[error("Endpoint #{index}: parameter at position {position} has no name")]
    UnnamedParameter { index: usize, position: usize },

    #[error("Type `{0}` is already defined")]
    TypeAlreadyDefined(String),

    #[error("Type handle does not belong to this catalog")]
    UnknownType,

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Index of the offending endpoint record, if the error concerns one.
    pub fn endpoint_index(&self) -> Option<usize> {
        match self {
            Error::MissingField { index, .. }
            | Error::InvalidMethod { index, .. }
            | Error::InvalidRoute { index, .. }
            | Error::UnnamedParameter { index, .. } => Some(*index),
            _ => None,
        }
    }
}
