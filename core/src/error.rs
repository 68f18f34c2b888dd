//! Error types for the to-do request client.
//!
//! # Design
//! Every failure a request can meet is surfaced to the caller as one of these
//! variants. `NotFound` gets a dedicated variant because callers distinguish
//! "the item does not exist" from "the server returned an unexpected status";
//! every other non-2xx response lands in `HttpError` with the raw status and
//! body.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The HTTP client could not be set up; no request was attempted.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// The request never produced a response (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
