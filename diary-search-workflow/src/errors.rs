//! Workflow error types.

use thiserror::Error;

use diary_search_repository::{OperationOutcome, SearchStoreError};

/// Errors that can occur while running the demo workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The store transport failed before producing an outcome.
    #[error("Store error: {0}")]
    StoreError(#[from] SearchStoreError),

    /// An operation completed but the store reported failure.
    #[error("Operation '{operation}' failed with status {}", .outcome.status)]
    OperationFailed {
        /// Which operation in the sequence failed.
        operation: &'static str,
        /// The failing outcome, kept for diagnostics and the exit code.
        outcome: OperationOutcome,
    },
}

impl WorkflowError {
    /// The process exit code this error maps to.
    ///
    /// Operation failures exit with the store-reported status code; any
    /// other failure exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OperationFailed { outcome, .. } => i32::from(outcome.status),
            Self::StoreError(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_operation_failure_exit_code_is_store_status() {
        let error = WorkflowError::OperationFailed {
            operation: "delete_index",
            outcome: OperationOutcome::failed(404, "no such index", json!({})),
        };

        assert_eq!(error.exit_code(), 404);
    }

    #[test]
    fn test_store_error_exit_code_is_one() {
        let error = WorkflowError::StoreError(SearchStoreError::request("connection refused"));

        assert_eq!(error.exit_code(), 1);
    }
}
