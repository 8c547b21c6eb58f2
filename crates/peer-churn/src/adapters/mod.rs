//! # Adapters
//!
//! Concrete implementations of the driven ports plus the simulated
//! delivery collaborator that drives `PeerAgent`s.

pub mod network;
pub mod random;
pub mod topology;

pub use network::{
    ConfigError, NetworkConfig, NetworkError, RoundStats, SimulatedNetwork, StaticConfigProvider,
    TomlConfigProvider,
};
pub use random::{FixedRandomSource, SequenceRandomSource, StdRandomSource};
pub use topology::Topology;
