//! # Diary Search Signing
//!
//! SigV4 signing layer for the diary search demo. Provides credential
//! resolution through the AWS default provider chain, a request signer
//! that attaches the SigV4 authentication headers, and a signed HTTP
//! client used by the low-level statistics workflow.

pub mod client;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod signer;

pub use client::SignedHttpClient;
pub use config::SigningConfig;
pub use credentials::resolve_credentials;
pub use errors::SigningError;
pub use signer::RequestSigner;
