//! # Diary Search Workflow
//!
//! The sequential demo workflow for the diary search demo: create the
//! index, insert notes synchronously, asynchronously, and in bulk, search
//! for them, and delete the index. Every store outcome is validated before
//! the next step runs; the first invalid outcome stops the sequence.

pub mod demo;
pub mod errors;

pub use demo::{DemoWorkflow, WorkflowConfig, WorkflowReport};
pub use errors::WorkflowError;
