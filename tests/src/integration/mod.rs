//! # Integration Flows
//!
//! Multi-peer scenarios driven through `SimulatedNetwork`, plus the shared
//! invariant checks they assert after every step.

use std::sync::Once;

use peer_churn::{PeerAgent, SimulatedNetwork};
use tracing_subscriber::EnvFilter;

pub mod churn;
pub mod flows;
pub mod properties;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Ways the peers' connection tables and the shared topology can disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// A peer holds more connections than its limits allow.
    OverCapacity(u64),
    /// A table entry with no matching edge, or an edge with no table entry.
    Unmatched(u64, u64),
    /// A table references a peer that is no longer live.
    Dangling(u64, u64),
    /// Degree sum is not twice the edge count.
    DegreeSum { degrees: usize, edges: usize },
}

/// Check every table against the topology.
pub fn check_consistency(network: &SimulatedNetwork) -> Result<(), Inconsistency> {
    let topology = network.topology();
    let mut degrees = 0;

    for id in network.peer_ids() {
        let Some(peer) = network.peer(id) else {
            continue;
        };
        let limits = peer.connections().limits();
        if peer.connection_count() > limits.max_total
            || peer.outbound_peers().len() > limits.max_outbound
        {
            return Err(Inconsistency::OverCapacity(id.as_u64()));
        }
        degrees += peer.connection_count();

        for other in peer.outbound_peers() {
            let Some(remote) = network.peer(other) else {
                return Err(Inconsistency::Dangling(id.as_u64(), other.as_u64()));
            };
            if !topology.has_edge(id, other) || !remote.inbound_peers().contains(&id) {
                return Err(Inconsistency::Unmatched(id.as_u64(), other.as_u64()));
            }
        }
        for other in peer.inbound_peers() {
            if network.peer(other).is_none() {
                return Err(Inconsistency::Dangling(id.as_u64(), other.as_u64()));
            }
            if !topology.has_edge(other, id) {
                return Err(Inconsistency::Unmatched(other.as_u64(), id.as_u64()));
            }
        }
    }

    let edges = topology.edge_count();
    if degrees != 2 * edges {
        return Err(Inconsistency::DegreeSum { degrees, edges });
    }
    Ok(())
}

/// Panic with the first inconsistency found.
pub fn assert_consistent(network: &SimulatedNetwork) {
    if let Err(e) = check_consistency(network) {
        panic!("network inconsistent: {e:?}");
    }
}

/// Seeds that are currently connected to anybody.
pub fn connected_seeds(network: &SimulatedNetwork) -> usize {
    network
        .seeds()
        .iter()
        .filter_map(|id| network.peer(*id))
        .filter(|peer| peer.connection_count() > 0)
        .count()
}
