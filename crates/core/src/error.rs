//! Unified error types for partition key derivation.
//!
//! Error codes:
//! - DPK_001: Input could not be encoded as JSON text
//! - DPK_002: Hash algorithm is not supported

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for partition key derivation.
///
/// Every variant is surfaced directly to the caller and is never retryable.
#[derive(Debug, Error)]
pub enum Error {
    /// The event (or explicit key) has no JSON text representation.
    #[error("[DPK_001] serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested digest algorithm is not one we can compute.
    #[error("[DPK_002] unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl Error {
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(name.into())
    }

    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "DPK_001",
            Self::UnsupportedAlgorithm(_) => "DPK_002",
        }
    }
}
