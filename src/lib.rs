//! Deterministic partition keys for event streams.
//!
//! Routes every event to a stable string key:
//! - Absent events (`null`, `false`, `0`, `""`) share the trivial key `"0"`
//! - Events carrying a `partitionKey` keep it, digested past 256 characters
//! - Everything else is keyed by a SHA3-512 digest of its JSON text
//!
//! The derivation itself never reads files or the environment; [`load_config`]
//! and [`bootstrap`] are the only entry points that do.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use dpk_core::{
    is_truthy, Error, Event, DEFAULT_HASH_ALGORITHM, MAX_PARTITION_KEY_LENGTH,
    PARTITION_KEY_FIELD, TRIVIAL_PARTITION_KEY,
};
pub use partitioner::json::{to_json_text, value_to_json_text};
pub use partitioner::{
    derive_partition_key, hash_digest, HashAlgorithm, KeyDeriver, PartitionerConfig,
};
pub use telemetry::{init_tracing, init_tracing_from_env, TracingConfig};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DPK";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub partitioner: PartitionerConfig,

    #[serde(default)]
    pub log: TracingConfig,
}

/// Load configuration from defaults, `config/default.toml`, and environment.
///
/// Environment overrides use the `DPK__` prefix and `__` between sections,
/// e.g. `DPK__PARTITIONER__HASH_ALGORITHM=sha256`. A `.env` file is read
/// first if present.
pub fn load_config() -> Result<Config> {
    dotenvy::dotenv().ok();

    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Load configuration, initialize tracing, and build a validated deriver.
pub fn bootstrap() -> Result<KeyDeriver> {
    let config = load_config()?;
    init_tracing(&config.log);

    let deriver = KeyDeriver::new(&config.partitioner).with_context(|| {
        format!(
            "Invalid partitioner configuration (hash_algorithm = {:?})",
            config.partitioner.hash_algorithm
        )
    })?;

    info!(
        algorithm = %deriver.algorithm(),
        max_key_length = deriver.max_key_length(),
        "Partition key deriver ready"
    );
    Ok(deriver)
}
