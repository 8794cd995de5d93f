//! # Diary Search
//!
//! Demo binary showing two ways to call an AWS-managed Elasticsearch
//! domain with SigV4-signed requests: a low-level signed statistics fetch
//! and a high-level index lifecycle driven through a signing transport.

pub mod cli;
pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during demo initialization or execution.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Signing layer error.
    #[error("Signing error: {0}")]
    SigningError(#[from] diary_search_signing::SigningError),

    /// Search store error.
    #[error("Store error: {0}")]
    StoreError(#[from] diary_search_repository::SearchStoreError),

    /// Workflow error.
    #[error("Workflow error: {0}")]
    WorkflowError(#[from] diary_search_workflow::WorkflowError),
}

impl DemoError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// The process exit code this error maps to.
    ///
    /// A failed store operation exits with the store-reported status code;
    /// everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::WorkflowError(e) => e.exit_code(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_exit_code() {
        assert_eq!(DemoError::config("missing region").exit_code(), 1);
    }
}
