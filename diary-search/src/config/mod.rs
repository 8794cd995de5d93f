//! Configuration and dependency wiring for the demo binary.

mod dependencies;

pub use dependencies::Dependencies;
