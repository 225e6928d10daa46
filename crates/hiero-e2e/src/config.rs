//! Suite configuration
//!
//! Defaults target a local solo network. A TOML file can override any field,
//! and `HIERO_*` environment variables override the file.

use hiero_crypto::{parse_private_key, PrivateKey};
use hiero_primitives::EntityId;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::wait::RetryPolicy;
use crate::{E2EError, E2EResult};

/// Path of a TOML config file
pub const ENV_CONFIG: &str = "HIERO_CONFIG";
/// Mirror node base URL
pub const ENV_MIRROR_URL: &str = "HIERO_MIRROR_URL";
/// JSON-RPC relay URL
pub const ENV_RELAY_URL: &str = "HIERO_RELAY_URL";
/// EVM chain id
pub const ENV_CHAIN_ID: &str = "HIERO_CHAIN_ID";
/// Hex-encoded ECDSA operator key
pub const ENV_OPERATOR_KEY: &str = "HIERO_OPERATOR_KEY";

/// Suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Mirror node REST base URL
    #[serde(default = "default_mirror_url")]
    pub mirror_url: String,
    /// JSON-RPC relay URL
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    /// Chain ID
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Hex-encoded ECDSA key used to sign schedules and authorizations
    #[serde(default)]
    pub operator_key: Option<String>,
    /// Shard of the network under test
    #[serde(default)]
    pub shard: u64,
    /// Realm of the network under test
    #[serde(default)]
    pub realm: u64,
    /// Budget for every poll the suite makes
    #[serde(default)]
    pub poll: RetryPolicy,
}

fn default_mirror_url() -> String {
    "http://localhost:5551".to_string()
}

fn default_relay_url() -> String {
    "http://localhost:7546".to_string()
}

fn default_chain_id() -> u64 {
    298
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            mirror_url: default_mirror_url(),
            relay_url: default_relay_url(),
            chain_id: default_chain_id(),
            operator_key: None,
            shard: 0,
            realm: 0,
            poll: RetryPolicy::default(),
        }
    }
}

impl SuiteConfig {
    /// Load config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> E2EResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| E2EError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| E2EError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save config to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> E2EResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| E2EError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| E2EError::Config(e.to_string()))
    }

    /// Build config from the process environment
    pub fn from_env() -> E2EResult<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build config from `lookup`, which resolves environment variable names
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> E2EResult<Self> {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(url) = lookup(ENV_MIRROR_URL) {
            config.mirror_url = url;
        }
        if let Some(url) = lookup(ENV_RELAY_URL) {
            config.relay_url = url;
        }
        if let Some(chain_id) = lookup(ENV_CHAIN_ID) {
            config.chain_id = chain_id
                .trim()
                .parse()
                .map_err(|_| E2EError::Config(format!("{} is not a chain id: {:?}", ENV_CHAIN_ID, chain_id)))?;
        }
        if let Some(key) = lookup(ENV_OPERATOR_KEY) {
            config.operator_key = Some(key);
        }

        Ok(config)
    }

    /// Parsed operator key, if one is configured
    pub fn operator_key(&self) -> E2EResult<Option<PrivateKey>> {
        self.operator_key
            .as_deref()
            .map(parse_private_key)
            .transpose()
            .map_err(E2EError::from)
    }

    /// Entity `num` in the configured shard and realm
    pub fn entity_id(&self, num: u64) -> EntityId {
        EntityId::new(self.shard, self.realm, num)
    }
}
