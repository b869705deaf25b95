//! Partitioner configuration.

use dpk_core::{DEFAULT_HASH_ALGORITHM, MAX_PARTITION_KEY_LENGTH};
use serde::{Deserialize, Serialize};

/// Key derivation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionerConfig {
    /// Digest algorithm (sha224, sha256, sha384, sha512, sha3-224, sha3-256,
    /// sha3-384, sha3-512)
    #[serde(default = "default_hash_algorithm")]
    pub hash_algorithm: String,
    /// Longest explicit key kept verbatim, in UTF-16 code units
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
}

fn default_hash_algorithm() -> String {
    DEFAULT_HASH_ALGORITHM.to_string()
}

fn default_max_key_length() -> usize {
    MAX_PARTITION_KEY_LENGTH
}

impl Default for PartitionerConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: default_hash_algorithm(),
            max_key_length: default_max_key_length(),
        }
    }
}

impl PartitionerConfig {
    pub fn with_hash_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.hash_algorithm = algorithm.into();
        self
    }

    pub fn with_max_key_length(mut self, max_key_length: usize) -> Self {
        self.max_key_length = max_key_length;
        self
    }
}
