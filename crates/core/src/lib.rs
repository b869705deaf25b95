//! Core types, event shapes, and errors for deterministic partition keys.

pub mod error;
pub mod events;
pub mod limits;

pub use error::{Error, Result};
pub use events::*;
pub use limits::*;
