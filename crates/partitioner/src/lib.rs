//! Deterministic partition key derivation for event streams.
//!
//! [`derive_partition_key`] maps any serializable event to a stable string
//! suitable for selecting a shard. [`hash_digest`] is the content digest it
//! falls back on.

pub mod config;
pub mod digest;
pub mod json;
pub mod partitioner;

pub use config::*;
pub use digest::*;
pub use partitioner::*;
