//! Error types for the Posti client.

use thiserror::Error;

use crate::schema::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller passed a value the carrier does not know, e.g. an unknown service code.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport failure or a non-2xx status from the remote service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote service answered with a body we cannot interpret.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
