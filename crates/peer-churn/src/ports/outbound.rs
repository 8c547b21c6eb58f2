//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces the protocol core **requires** from its host.

use crate::domain::PeerId;
use crate::service::PeerConfig;

/// Read-only view of the authoritative connectivity graph.
///
/// Owned by the delivery collaborator. Only the direct-inspection
/// power-of-two-choice strategy reads degrees through it; everything else
/// treats it as opaque.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so peers running as independent
/// tasks can share one topology handle.
pub trait TopologyView: Send + Sync {
    /// Undirected degree of `peer`, or `None` if the peer is not in the graph.
    fn degree(&self, peer: PeerId) -> Option<usize>;

    /// Whether `peer` is currently part of the graph.
    fn peer_exists(&self, peer: PeerId) -> bool;
}

/// Source of uniform random indices.
///
/// Every random draw in the protocol (candidate selection, gossip sampling,
/// neighbor choice) goes through this port so runs can be replayed.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..max`. Returns 0 when `max == 0`.
    fn random_usize(&self, max: usize) -> usize;
}

/// Abstract interface for configuration loading.
///
/// Allows different configuration sources (file, environment, etc.)
pub trait ConfigProvider: Send + Sync {
    /// Number of seed peers (ids `0..seed_count`).
    fn seed_count(&self) -> u64;

    /// Configuration handed to every newly created peer.
    fn peer_config(&self) -> PeerConfig;
}

/// Topology that contains nobody.
///
/// Useful for peers whose strategy never inspects the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTopology;

impl TopologyView for EmptyTopology {
    fn degree(&self, _peer: PeerId) -> Option<usize> {
        None
    }

    fn peer_exists(&self, _peer: PeerId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test-only RandomSource cycling through a fixed script.
    struct ScriptedRandom(Vec<usize>, std::sync::atomic::AtomicUsize);

    impl RandomSource for ScriptedRandom {
        fn random_usize(&self, max: usize) -> usize {
            let i = self.1.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            if max == 0 {
                0
            } else {
                self.0[i % self.0.len()] % max
            }
        }
    }

    #[test]
    fn test_scripted_random_wraps_into_range() {
        let rng = ScriptedRandom(vec![7, 2], Default::default());
        assert_eq!(rng.random_usize(5), 2);
        assert_eq!(rng.random_usize(5), 2);
        assert_eq!(rng.random_usize(0), 0);
    }

    #[test]
    fn test_empty_topology_knows_nobody() {
        assert_eq!(EmptyTopology.degree(PeerId(1)), None);
        assert!(!EmptyTopology.peer_exists(PeerId(1)));
    }
}
