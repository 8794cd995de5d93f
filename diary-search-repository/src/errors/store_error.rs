//! Search store error types.
//!
//! This module defines the error types that can occur while talking to the
//! search store. These cover transport-level failures; a store response
//! that reports failure is not an error but an unsuccessful
//! [`OperationOutcome`](crate::types::OperationOutcome).

use thiserror::Error;

/// Errors that can occur during search store operations.
#[derive(Error, Debug)]
pub enum SearchStoreError {
    /// Failed to build the transport or establish a connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The transport could not be configured for signed requests.
    #[error("Auth error: {0}")]
    AuthError(String),

    /// A request failed before the store produced a response.
    #[error("Request error: {0}")]
    RequestError(String),

    /// Failed to parse a response from the store.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a document for the store.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an auth error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthError(msg.into())
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
