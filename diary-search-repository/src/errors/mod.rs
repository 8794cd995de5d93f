//! Error types for the search store.

mod store_error;

pub use store_error::SearchStoreError;
