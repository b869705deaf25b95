//! Fixed values shared by every partition key derivation.
//!
//! Changing any of these reshuffles partition assignments for existing
//! traffic.

/// Key returned for absent or empty events.
pub const TRIVIAL_PARTITION_KEY: &str = "0";

/// Explicit keys longer than this (in UTF-16 code units) are replaced by
/// their digest. A key of exactly this length is kept.
pub const MAX_PARTITION_KEY_LENGTH: usize = 256;

/// Digest algorithm used when none is configured.
pub const DEFAULT_HASH_ALGORITHM: &str = "sha3-512";

/// Name of the mapping field carrying a caller-supplied key.
pub const PARTITION_KEY_FIELD: &str = "partitionKey";
