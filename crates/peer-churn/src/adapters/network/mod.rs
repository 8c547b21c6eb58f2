//! # Simulated Network
//!
//! In-memory delivery collaborator: owns every live peer and the shared
//! topology, ticks peers and carries each produced envelope through its
//! whole transcript.
//!
//! ## Adapters Provided
//!
//! - `SimulatedNetwork` - Turn-based envelope routing
//! - `StaticConfigProvider` - Hardcoded configuration
//! - `TomlConfigProvider` - Config file loading

// Semantic submodules
/// Configuration providers
pub mod config;
mod error;
mod simulation;
mod stats;

// Re-export public API
pub use config::{ConfigError, NetworkConfig, StaticConfigProvider, TomlConfigProvider};
pub use error::NetworkError;
pub use simulation::SimulatedNetwork;
pub use stats::RoundStats;
