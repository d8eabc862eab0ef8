//! Error types surfaced by the client.

use crate::api::transport::TransportError;
use crate::query::QueryError;
use thiserror::Error;

/// Errors returned by [`IndixClient`](crate::IndixClient) operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API rejected the request (bad parameters, credentials, quota).
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API failed on its side (5xx).
    #[error("Internal server error {status}: {message}")]
    InternalServer { status: u16, message: String },

    /// The response body could not be mapped onto the expected result type.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("app_id and app_key must both be non-empty")]
    MissingCredentials,

    /// The client was closed and can no longer issue requests.
    #[error("Client is closed")]
    Closed,
}

impl Error {
    /// Returns the HTTP status for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::InternalServer { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure was caused by the server.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::InternalServer { .. })
    }

    /// Returns true if the API blamed the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
