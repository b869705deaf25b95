//! Partition key derivation for events.

use dpk_core::{Event, Result, MAX_PARTITION_KEY_LENGTH, TRIVIAL_PARTITION_KEY};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::PartitionerConfig;
use crate::digest::HashAlgorithm;
use crate::json::{to_json_text, value_to_json_text};

/// Derives partition keys with a fixed algorithm and length ceiling.
///
/// The deriver holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDeriver {
    algorithm: HashAlgorithm,
    max_key_length: usize,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            max_key_length: MAX_PARTITION_KEY_LENGTH,
        }
    }
}

impl KeyDeriver {
    /// Creates a deriver from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`dpk_core::Error::UnsupportedAlgorithm`] if the configured
    /// algorithm is unknown.
    pub fn new(config: &PartitionerConfig) -> Result<Self> {
        let algorithm = config.hash_algorithm.parse()?;
        Ok(Self {
            algorithm,
            max_key_length: config.max_key_length,
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    /// Derives the partition key for any serializable event.
    ///
    /// `None` and JSON `null` both count as an absent event.
    ///
    /// Keys follow the event's serialization order. `HashMap` and `HashSet`
    /// iterate in a per-instance random order, so equal events built from
    /// them can get different keys; use structs, `BTreeMap`, `IndexMap`, or
    /// a `serde_json::Value` instead.
    ///
    /// # Errors
    ///
    /// Returns [`dpk_core::Error::Serialization`] if the event has no JSON
    /// representation.
    pub fn derive<T: Serialize + ?Sized>(&self, event: &T) -> Result<String> {
        let value = serde_json::to_value(event)?;
        self.derive_value(&value)
    }

    /// Derives the partition key for a JSON event.
    ///
    /// 1. Absent events (`null`, `false`, `0`, `""`) get [`TRIVIAL_PARTITION_KEY`].
    /// 2. String events get the digest of their JSON text (quotes included).
    /// 3. Mappings with a truthy `partitionKey` use that key, digested if it
    ///    is longer than the ceiling.
    /// 4. Everything else gets the digest of the whole event.
    pub fn derive_value(&self, event: &Value) -> Result<String> {
        let shape = Event::classify(event);

        let key = match shape {
            Event::Absent => TRIVIAL_PARTITION_KEY.to_string(),
            // Quoted before digesting, unlike the fallback path. Existing
            // assignments for string events depend on this.
            Event::Text(text) => self.algorithm.digest_hex(to_json_text(text)?.as_bytes()),
            Event::Keyed { partition_key, .. } => self.explicit_key(partition_key)?,
            Event::Number | Event::Boolean | Event::List | Event::Record(_) => {
                self.algorithm.hash_value(event)?
            }
        };

        trace!(shape = shape.kind(), algorithm = %self.algorithm, "Derived partition key");
        Ok(key)
    }

    fn explicit_key(&self, partition_key: &Value) -> Result<String> {
        let candidate = match partition_key {
            Value::String(key) => key.clone(),
            other => value_to_json_text(other)?,
        };

        let length = utf16_len(&candidate);
        if length > self.max_key_length {
            debug!(
                length,
                max_key_length = self.max_key_length,
                "Explicit partition key exceeds ceiling, using its digest"
            );
            return Ok(self.algorithm.digest_hex(candidate.as_bytes()));
        }

        Ok(candidate)
    }
}

/// Derives the partition key for an event with the default settings.
///
/// The event must serialize in a stable order; see [`KeyDeriver::derive`].
///
/// # Errors
///
/// Returns [`dpk_core::Error::Serialization`] if the event has no JSON
/// representation.
pub fn derive_partition_key<T: Serialize + ?Sized>(event: &T) -> Result<String> {
    KeyDeriver::default().derive(event)
}

/// Key length as counted by JavaScript producers.
fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
