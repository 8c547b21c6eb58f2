//! # Peer Churn
//!
//! Address gossip, connection handshakes and churn for simulated
//! unstructured P2P overlays, modelled on Bitcoin's address manager and
//! outbound connection logic.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Address book, gossip buffer, connection table,
//!   selection strategies, handshake replies, maintenance arithmetic
//! - **Ports Layer:** `PeerAgent` (driving), `TopologyView`, `RandomSource`
//!   and `ConfigProvider` (driven)
//! - **Service Layer:** `PeerNode`, one protocol participant
//! - **Adapters Layer:** Shared topology, random sources, configuration
//!   providers and the in-memory `SimulatedNetwork`
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use peer_churn::{NetworkConfig, SimulatedNetwork, StdRandomSource, Timestamp};
//!
//! let rng = Arc::new(StdRandomSource::seeded(42));
//! let mut network = SimulatedNetwork::new(NetworkConfig::default(), rng, Timestamp::ZERO);
//!
//! for _ in 0..10 {
//!     network.join(Timestamp::ZERO).unwrap();
//! }
//! for round in 1..=5 {
//!     network.run_round(Timestamp::new(round as f64)).unwrap();
//! }
//!
//! assert_eq!(network.len(), 13);
//! assert!(network.topology().edge_count() > 0);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

/// Topology, random sources, configuration and the simulated network.
pub mod adapters;

/// Test utilities (PeerBuilder, seeded networks).
/// Requires feature: `test-utils`
#[cfg(feature = "test-utils")]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain entities
pub use domain::{
    AddressBook, AddressBookConfig, AddressRecord, ConnectState, ConnectionLimits,
    ConnectionTable, DegreePreference, DegreeProbe, Envelope, GossipBuffer, GossipConfig,
    HandshakeOutcome, Intent, MaintenanceConfig, PeerId, ProtocolError, SelectionStrategy,
    Timestamp, DAY, HOUR, MINUTE,
};

// Port traits
pub use ports::{ConfigProvider, EmptyTopology, PeerAgent, RandomSource, TopologyView};

// Service
pub use service::{PeerConfig, PeerNode};

// Adapters
pub use adapters::{
    ConfigError, FixedRandomSource, NetworkConfig, NetworkError, RoundStats,
    SequenceRandomSource, SimulatedNetwork, StaticConfigProvider, StdRandomSource,
    TomlConfigProvider, Topology,
};
