//! Error types for the signing layer.

use thiserror::Error;

/// Errors that can occur while signing or dispatching a signed request.
#[derive(Error, Debug)]
pub enum SigningError {
    /// Credential resolution through the provider chain failed.
    #[error("Credential resolution error: {0}")]
    CredentialResolution(String),

    /// The SigV4 signing computation failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// The request could not be constructed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP transport failed before a response was produced.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Response error: status {status}: {reason}")]
    Response {
        /// HTTP status code of the response.
        status: u16,
        /// Status text of the response.
        reason: String,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
}

impl SigningError {
    /// Create a credential resolution error.
    pub fn credential_resolution(msg: impl Into<String>) -> Self {
        Self::CredentialResolution(msg.into())
    }

    /// Create a signing error.
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
