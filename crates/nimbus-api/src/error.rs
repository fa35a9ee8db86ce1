//! Nimbus API error types

use thiserror::Error;

/// Errors shared by every Nimbus API sub-client.
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing API key/secret")]
    MissingApiCredentials,

    #[error("resource not found")]
    ResourceNotFound,

    #[error("resource already deleted")]
    AlreadyDeleted,

    #[error("API error: {0}")]
    Api(String),

    #[error("API error response (code {code}): {message}")]
    ErrorResponse { code: i32, message: String },

    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Normalize a command-bus error.
///
/// A structured [`Error::ErrorResponse`] is unwrapped to its embedded
/// human-readable message; any other error passes through unchanged.
pub fn normalize(err: Error) -> Error {
    match err {
        Error::ErrorResponse { message, .. } => Error::Api(message),
        other => other,
    }
}
