//! Structured logging setup.

pub mod tracing_setup;

pub use tracing_setup::*;
