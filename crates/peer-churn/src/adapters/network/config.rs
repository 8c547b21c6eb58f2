use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::ports::ConfigProvider;
use crate::service::PeerConfig;

/// Configuration of a simulated network.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Seeds get ids `0..seed_count`
    pub seed_count: u64,
    /// Configuration of every peer
    pub peer: PeerConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            seed_count: 3,
            peer: PeerConfig::default(),
        }
    }
}

impl NetworkConfig {
    /// Testing config: three seeds with small peer limits
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_testing() -> Self {
        Self {
            seed_count: 3,
            peer: PeerConfig::for_testing(),
        }
    }

    /// Build from any configuration source.
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        Self {
            seed_count: provider.seed_count(),
            peer: provider.peer_config(),
        }
    }

    /// Reject settings no peer can run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let peer = &self.peer;
        if !peer.unlimited && peer.limits.max_outbound > peer.limits.max_total {
            return Err(ConfigError::Invalid(format!(
                "max_outbound ({}) exceeds max_total ({})",
                peer.limits.max_outbound, peer.limits.max_total
            )));
        }
        if peer.maintenance.gossip_interval_secs <= 0.0 {
            return Err(ConfigError::Invalid(
                "gossip_interval_secs must be positive".to_string(),
            ));
        }
        if peer.maintenance.broadcast_interval_secs <= 0.0 {
            return Err(ConfigError::Invalid(
                "broadcast_interval_secs must be positive".to_string(),
            ));
        }
        if !(peer.address_book.prune_ratio > 0.0 && peer.address_book.prune_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "prune_ratio ({}) must be in (0, 1]",
                peer.address_book.prune_ratio
            )));
        }
        Ok(())
    }
}

// ============================================================================
// StaticConfigProvider - Hardcoded config for tests and embedding
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for tests and embedding drivers. For config files, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: NetworkConfig,
}

impl StaticConfigProvider {
    /// Create with the default network configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `count` seeds.
    #[must_use]
    pub fn with_seed_count(mut self, count: u64) -> Self {
        self.config.seed_count = count;
        self
    }

    /// Use `config` for every peer.
    #[must_use]
    pub fn with_peer_config(mut self, config: PeerConfig) -> Self {
        self.config.peer = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn seed_count(&self) -> u64 {
        self.config.seed_count
    }

    fn peer_config(&self) -> PeerConfig {
        self.config.peer.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Config file loading
// ============================================================================

/// TOML-based configuration provider.
///
/// Missing keys fall back to their defaults.
///
/// # Config File Format
///
/// ```toml
/// seed_count = 3
///
/// [peer]
/// unlimited = false
///
/// [peer.limits]
/// max_outbound = 8
/// max_total = 125
///
/// [peer.strategy]
/// kind = "power_of_two"
/// probe = "messages"
/// preference = "min"
///
/// [peer.maintenance]
/// replacement_hours = 4.0
/// ```
#[derive(Debug, Clone)]
pub struct TomlConfigProvider {
    config: NetworkConfig,
}

impl TomlConfigProvider {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the content is not valid TOML for a [`NetworkConfig`]
    /// or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: NetworkConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(Self { config })
    }

    /// The parsed configuration.
    pub fn network_config(&self) -> &NetworkConfig {
        &self.config
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn seed_count(&self) -> u64 {
        self.config.seed_count
    }

    fn peer_config(&self) -> PeerConfig {
        self.config.peer.clone()
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },
    /// TOML parsing error.
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// Parsed but unusable settings.
    #[error("invalid config: {0}")]
    Invalid(String),
}
