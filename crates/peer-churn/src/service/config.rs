//! Peer configuration.

use serde::Deserialize;

use crate::domain::{
    AddressBookConfig, ConnectionLimits, GossipConfig, MaintenanceConfig, SelectionStrategy,
};

/// Everything a peer is constructed with besides identity, time and seeds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Connection capacity
    pub limits: ConnectionLimits,
    /// Adversarial peer that never refuses a connection; overrides `limits`
    pub unlimited: bool,
    /// How connection candidates are chosen
    pub strategy: SelectionStrategy,
    /// Address staleness and capacity
    pub address_book: AddressBookConfig,
    /// Gossip sizing
    pub gossip: GossipConfig,
    /// Tick intervals and churn
    pub maintenance: MaintenanceConfig,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            limits: ConnectionLimits::default(),
            unlimited: false,
            strategy: SelectionStrategy::Uniform,
            address_book: AddressBookConfig::default(),
            gossip: GossipConfig::default(),
            maintenance: MaintenanceConfig::default(),
        }
    }
}

impl PeerConfig {
    /// Default config with another selection strategy.
    pub fn with_strategy(strategy: SelectionStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Testing config with small connection limits
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_testing() -> Self {
        Self {
            limits: ConnectionLimits {
                max_outbound: 3,
                max_total: 6,
            },
            ..Self::default()
        }
    }

    /// Limits actually enforced.
    pub fn effective_limits(&self) -> ConnectionLimits {
        if self.unlimited {
            ConnectionLimits::unlimited()
        } else {
            self.limits
        }
    }
}
