//! # Diary Search Shared
//!
//! Shared types for the diary search demo. The only domain entity is the
//! [`Note`] document exchanged with the search store.

pub mod note;

pub use note::Note;
