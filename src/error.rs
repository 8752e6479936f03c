//! Error types
//!
//! Every fallible operation in the crate returns [`Result<T>`].

use crate::transport::graphql::GraphQlErrors;
use thiserror::Error;

/// Errors returned by the New Relic client.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API request failed (status {status}): {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Error title from the response body, or the sanitized body itself.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// NerdGraph returned an `errors` array.
    #[error("{0}")]
    GraphQl(GraphQlErrors),

    /// A mutation reported per-item errors in its payload.
    #[error("mutation failed:\n{0}")]
    Mutation(String),

    /// Response JSON did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Response was well-formed JSON but missing required parts.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A base or pagination URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Caller-supplied input cannot be sent as-is.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Client configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for the not-found kind, whichever layer produced it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
