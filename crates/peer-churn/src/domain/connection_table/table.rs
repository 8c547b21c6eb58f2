//! Connection table implementation.

use std::collections::HashMap;

use super::config::ConnectionLimits;
use crate::domain::{PeerId, Timestamp};

/// Outbound and inbound connections with capacity enforcement.
#[derive(Debug, Clone)]
pub struct ConnectionTable {
    /// Peer -> time of last refresh
    outbound: HashMap<PeerId, Timestamp>,
    /// Peer -> time of acceptance
    inbound: HashMap<PeerId, Timestamp>,
    limits: ConnectionLimits,
    /// Latched once the table first reached `max_outbound` connections
    outbound_full: bool,
}

impl ConnectionTable {
    /// Create an empty table.
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            outbound: HashMap::new(),
            inbound: HashMap::new(),
            limits,
            outbound_full: false,
        }
    }

    /// Limits in effect.
    pub fn limits(&self) -> &ConnectionLimits {
        &self.limits
    }

    /// Try to give `peer` an inbound slot.
    ///
    /// Refused without mutation when `peer` is already outbound or every
    /// inbound slot is taken. A peer that already holds an inbound slot is
    /// refreshed and accepted again.
    pub fn accept_inbound(&mut self, peer: PeerId, now: Timestamp) -> bool {
        if self.outbound.contains_key(&peer) {
            return false;
        }
        if let Some(ts) = self.inbound.get_mut(&peer) {
            *ts = now;
            return true;
        }
        if self.inbound.len() >= self.limits.max_inbound() {
            return false;
        }
        self.inbound.insert(peer, now);
        self.latch_full();
        true
    }

    /// Record `peer` as an outbound connection.
    ///
    /// Refused without mutation when `peer` is inbound or the outbound table
    /// is at capacity. A known outbound peer is refreshed.
    pub fn record_outbound(&mut self, peer: PeerId, now: Timestamp) -> bool {
        if self.inbound.contains_key(&peer) {
            return false;
        }
        if let Some(ts) = self.outbound.get_mut(&peer) {
            *ts = now;
            return true;
        }
        if self.outbound.len() >= self.limits.max_outbound {
            return false;
        }
        self.outbound.insert(peer, now);
        self.latch_full();
        true
    }

    /// Forget `peer` in both directions. Returns whether anything was removed.
    pub fn remove(&mut self, peer: PeerId) -> bool {
        let outbound = self.outbound.remove(&peer).is_some();
        let inbound = self.inbound.remove(&peer).is_some();
        outbound || inbound
    }

    /// Whether the table ever held `max_outbound` connections.
    pub fn is_outbound_full(&self) -> bool {
        self.outbound_full
    }

    /// Whether no further outbound connection fits.
    pub fn outbound_at_capacity(&self) -> bool {
        self.outbound.len() >= self.limits.max_outbound
    }

    /// Outbound connection with the smallest last-activity time.
    ///
    /// Ties go to the lower id.
    pub fn oldest_outbound(&self) -> Option<(PeerId, Timestamp)> {
        self.outbound
            .iter()
            .map(|(&peer, &ts)| (peer, ts))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }

    /// Last activity of outbound `peer`.
    pub fn outbound_since(&self, peer: PeerId) -> Option<Timestamp> {
        self.outbound.get(&peer).copied()
    }

    /// Whether `peer` is an outbound connection.
    pub fn is_outbound(&self, peer: PeerId) -> bool {
        self.outbound.contains_key(&peer)
    }

    /// Whether `peer` is an inbound connection.
    pub fn is_inbound(&self, peer: PeerId) -> bool {
        self.inbound.contains_key(&peer)
    }

    /// Whether `peer` is connected in either direction.
    pub fn is_connected(&self, peer: PeerId) -> bool {
        self.is_outbound(peer) || self.is_inbound(peer)
    }

    /// Number of outbound connections.
    pub fn outbound_count(&self) -> usize {
        self.outbound.len()
    }

    /// Number of inbound connections.
    pub fn inbound_count(&self) -> usize {
        self.inbound.len()
    }

    /// Number of connections in both directions.
    pub fn total(&self) -> usize {
        self.outbound.len() + self.inbound.len()
    }

    /// Outbound peers in id order.
    pub fn outbound_peers(&self) -> Vec<PeerId> {
        sorted_keys(&self.outbound)
    }

    /// Inbound peers in id order.
    pub fn inbound_peers(&self) -> Vec<PeerId> {
        sorted_keys(&self.inbound)
    }

    /// Outbound connections with their last activity, in id order.
    pub fn outbound_records(&self) -> Vec<(PeerId, Timestamp)> {
        let mut records: Vec<_> = self.outbound.iter().map(|(&p, &ts)| (p, ts)).collect();
        records.sort_by_key(|(peer, _)| *peer);
        records
    }

    fn latch_full(&mut self) {
        if self.total() >= self.limits.max_outbound {
            self.outbound_full = true;
        }
    }
}

fn sorted_keys(map: &HashMap<PeerId, Timestamp>) -> Vec<PeerId> {
    let mut keys: Vec<PeerId> = map.keys().copied().collect();
    keys.sort();
    keys
}
