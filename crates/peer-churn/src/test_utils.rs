//! Test utilities for peer churn.
//!
//! Deterministic fixtures for driving peers and networks from tests and
//! benches. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use peer_churn::test_utils::PeerBuilder;
//! use peer_churn::PeerAgent;
//!
//! let peer = PeerBuilder::new(7).seeds(&[0, 1]).build();
//! assert_eq!(peer.id().as_u64(), 7);
//! assert!(!peer.is_hard_coded_seed());
//! ```

use std::sync::Arc;

use crate::adapters::{FixedRandomSource, NetworkConfig, NetworkError, SimulatedNetwork, StdRandomSource};
use crate::domain::{Envelope, Intent, PeerId, SelectionStrategy, Timestamp};
use crate::ports::RandomSource;
use crate::service::{PeerConfig, PeerNode};

/// Builder for a single `PeerNode` with deterministic defaults.
///
/// Defaults: seeds `0, 1, 2`, created at time zero, testing limits and a
/// random source that always picks index 0.
pub struct PeerBuilder {
    id: u64,
    seeds: Vec<u64>,
    created: f64,
    config: PeerConfig,
    rng: Arc<dyn RandomSource>,
}

impl PeerBuilder {
    /// Start building peer `id`.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            seeds: vec![0, 1, 2],
            created: 0.0,
            config: PeerConfig::for_testing(),
            rng: Arc::new(FixedRandomSource::first()),
        }
    }

    /// Hard-coded seeds.
    #[must_use]
    pub fn seeds(mut self, seeds: &[u64]) -> Self {
        self.seeds = seeds.to_vec();
        self
    }

    /// Creation time in seconds.
    #[must_use]
    pub fn created_at(mut self, secs: f64) -> Self {
        self.created = secs;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: PeerConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep the configuration, switch the selection strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Use `rng` for every draw.
    #[must_use]
    pub fn rng(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Always draw `value` (modulo the range).
    #[must_use]
    pub fn fixed_rng(self, value: usize) -> Self {
        self.rng(Arc::new(FixedRandomSource::new(value)))
    }

    /// Build the peer.
    pub fn build(self) -> PeerNode {
        let seeds: Vec<PeerId> = self.seeds.into_iter().map(PeerId::new).collect();
        PeerNode::new(
            PeerId::new(self.id),
            Timestamp::new(self.created),
            &seeds,
            self.config,
            self.rng,
        )
    }
}

/// Envelope from `sender` to `receiver` stamped `at` seconds.
pub fn envelope(sender: u64, receiver: u64, at: f64, intent: Intent) -> Envelope {
    Envelope::with_intent(PeerId::new(sender), PeerId::new(receiver), Timestamp::new(at), intent)
}

/// Network of `seed_count` seeds and `peers` joiners, all at time zero,
/// driven by `StdRng` seeded with `seed`.
///
/// # Errors
///
/// Propagates any join failure.
pub fn seeded_network(
    seed_count: u64,
    peers: usize,
    config: PeerConfig,
    seed: u64,
) -> Result<SimulatedNetwork, NetworkError> {
    let rng = Arc::new(StdRandomSource::seeded(seed));
    let mut network = SimulatedNetwork::new(
        NetworkConfig {
            seed_count,
            peer: config,
        },
        rng,
        Timestamp::ZERO,
    );
    for _ in 0..peers {
        network.join(Timestamp::ZERO)?;
    }
    Ok(network)
}
