//! # Shared Topology
//!
//! Authoritative undirected connectivity graph kept by the delivery
//! collaborator. Edges appear after a completed handshake and disappear
//! after a teardown. Peers only read it through [`TopologyView`].

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use crate::domain::PeerId;
use crate::ports::TopologyView;

/// Undirected graph of live peers.
///
/// Interior mutability lets one `Arc<Topology>` be shared by the
/// collaborator and every peer reading degrees.
#[derive(Debug, Default)]
pub struct Topology {
    adjacency: RwLock<BTreeMap<PeerId, BTreeSet<PeerId>>>,
}

impl Topology {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `peer` without edges. Returns false if it was already present.
    pub fn add_peer(&self, peer: PeerId) -> bool {
        let mut adjacency = self.adjacency.write();
        if adjacency.contains_key(&peer) {
            return false;
        }
        adjacency.insert(peer, BTreeSet::new());
        true
    }

    /// Remove `peer` and every edge touching it. Returns its former neighbors.
    pub fn remove_peer(&self, peer: PeerId) -> Vec<PeerId> {
        let mut adjacency = self.adjacency.write();
        let Some(neighbors) = adjacency.remove(&peer) else {
            return Vec::new();
        };
        for neighbor in &neighbors {
            if let Some(set) = adjacency.get_mut(neighbor) {
                set.remove(&peer);
            }
        }
        neighbors.into_iter().collect()
    }

    /// Connect `a` and `b`.
    ///
    /// Both must be present and distinct. Returns false if the edge could
    /// not be added or already existed.
    pub fn add_edge(&self, a: PeerId, b: PeerId) -> bool {
        if a == b {
            return false;
        }
        let mut adjacency = self.adjacency.write();
        if !adjacency.contains_key(&a) || !adjacency.contains_key(&b) {
            return false;
        }
        let inserted = adjacency.get_mut(&a).is_some_and(|set| set.insert(b));
        if let Some(set) = adjacency.get_mut(&b) {
            set.insert(a);
        }
        inserted
    }

    /// Disconnect `a` and `b`. Returns whether the edge existed.
    pub fn remove_edge(&self, a: PeerId, b: PeerId) -> bool {
        let mut adjacency = self.adjacency.write();
        let removed = adjacency.get_mut(&a).is_some_and(|set| set.remove(&b));
        if let Some(set) = adjacency.get_mut(&b) {
            set.remove(&a);
        }
        removed
    }

    /// Whether `a` and `b` are connected.
    pub fn has_edge(&self, a: PeerId, b: PeerId) -> bool {
        self.adjacency
            .read()
            .get(&a)
            .is_some_and(|set| set.contains(&b))
    }

    /// Neighbors of `peer` in id order.
    pub fn neighbors(&self, peer: PeerId) -> Vec<PeerId> {
        self.adjacency
            .read()
            .get(&peer)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Peers in id order.
    pub fn peers(&self) -> Vec<PeerId> {
        self.adjacency.read().keys().copied().collect()
    }

    /// Number of peers.
    pub fn peer_count(&self) -> usize {
        self.adjacency.read().len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.read().values().map(BTreeSet::len).sum::<usize>() / 2
    }
}

impl TopologyView for Topology {
    fn degree(&self, peer: PeerId) -> Option<usize> {
        self.adjacency.read().get(&peer).map(BTreeSet::len)
    }

    fn peer_exists(&self, peer: PeerId) -> bool {
        self.adjacency.read().contains_key(&peer)
    }
}
