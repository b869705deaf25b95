//! Content digests rendered as lowercase hex.

use std::fmt;
use std::str::FromStr;

use dpk_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use tracing::trace;

use crate::json::value_to_json_text;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    #[default]
    Sha3_512,
}

impl HashAlgorithm {
    pub const ALL: [Self; 8] = [
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
    ];

    /// Returns the algorithm name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
        }
    }

    /// Length of the hex digest in characters.
    pub fn hex_len(&self) -> usize {
        let bytes = match self {
            Self::Sha224 => <Sha224 as Digest>::output_size(),
            Self::Sha256 => <Sha256 as Digest>::output_size(),
            Self::Sha384 => <Sha384 as Digest>::output_size(),
            Self::Sha512 => <Sha512 as Digest>::output_size(),
            Self::Sha3_224 => <Sha3_224 as Digest>::output_size(),
            Self::Sha3_256 => <Sha3_256 as Digest>::output_size(),
            Self::Sha3_384 => <Sha3_384 as Digest>::output_size(),
            Self::Sha3_512 => <Sha3_512 as Digest>::output_size(),
        };
        bytes * 2
    }

    /// Digests raw bytes.
    pub fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            Self::Sha224 => hex_digest::<Sha224>(data),
            Self::Sha256 => hex_digest::<Sha256>(data),
            Self::Sha384 => hex_digest::<Sha384>(data),
            Self::Sha512 => hex_digest::<Sha512>(data),
            Self::Sha3_224 => hex_digest::<Sha3_224>(data),
            Self::Sha3_256 => hex_digest::<Sha3_256>(data),
            Self::Sha3_384 => hex_digest::<Sha3_384>(data),
            Self::Sha3_512 => hex_digest::<Sha3_512>(data),
        }
    }

    /// Digests a serializable value.
    ///
    /// Strings are digested as-is; anything else is digested as its JSON text,
    /// in serialization order. Unordered collections such as `HashMap` give a
    /// different digest per instance; prefer structs, `BTreeMap`, `IndexMap`,
    /// or a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `data` has no JSON representation.
    pub fn hash_digest<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        self.hash_value(&value)
    }

    /// Digests a JSON value with the same rules as [`Self::hash_digest`].
    pub fn hash_value(&self, data: &Value) -> Result<String> {
        let digest = match data {
            Value::String(text) => self.digest_hex(text.as_bytes()),
            other => self.digest_hex(value_to_json_text(other)?.as_bytes()),
        };
        trace!(algorithm = %self, "Computed content digest");
        Ok(digest)
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::unsupported_algorithm(s))
    }
}

/// Digests `data` with the named algorithm.
///
/// Strings are digested as-is; anything else is digested as its JSON text.
/// Pass [`dpk_core::DEFAULT_HASH_ALGORITHM`] for the default. The digest is
/// only stable for inputs that serialize in a stable order; see
/// [`HashAlgorithm::hash_digest`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedAlgorithm`] for an unknown algorithm name and
/// [`Error::Serialization`] if `data` has no JSON representation.
pub fn hash_digest<T: Serialize + ?Sized>(data: &T, algorithm: &str) -> Result<String> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    algorithm.hash_digest(data)
}
