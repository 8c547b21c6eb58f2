//! Periodic maintenance tick.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::{
    base_candidate, bubble_candidate, connection_attempts, is_outdated, pick_by_degree,
    two_candidates, DegreePreference, DegreeProbe, DegreeRound, Envelope, Intent, PeerId, SelectionStrategy,
    Timestamp,
};
use crate::ports::TopologyView;
use crate::service::PeerNode;

impl PeerNode {
    /// Run every periodic job due at `now`, in order:
    ///
    /// 1. flush the gossip buffer to one random outbound neighbor
    /// 2. broadcast the gossip buffer to every connection
    /// 3. at the outbound limit, kill the oldest outbound connection
    /// 4. below it, open new connections
    /// 5. kill outbound connections whose peer record went stale
    pub(crate) fn run_maintenance(
        &mut self,
        now: Timestamp,
        topology: &dyn TopologyView,
    ) -> Vec<Envelope> {
        let mut out = Vec::new();

        if self.timers.flush_due(now, &self.config.maintenance) {
            out.extend(self.flush_gossip(now));
        }
        if self.timers.broadcast_due(now, &self.config.maintenance) {
            out.extend(self.broadcast_gossip(now));
        }

        let mut killed = HashSet::new();
        let max_outbound = self.connections.limits().max_outbound;
        if self.connections.outbound_count() >= max_outbound {
            if let Some((oldest, since)) = self.connections.oldest_outbound() {
                debug!(peer = %self.id, target = %oldest, since = %since, "rotating oldest outbound");
                killed.insert(oldest);
                out.push(self.envelope(oldest, now, Intent::Kill));
            }
        }
        if self.connections.outbound_count() < max_outbound {
            out.extend(self.open_connections(now, topology));
        }

        for peer in self.outdated_outbound() {
            if killed.insert(peer) {
                debug!(peer = %self.id, target = %peer, "dropping outdated outbound");
                out.push(self.envelope(peer, now, Intent::Kill));
            }
        }

        trace!(peer = %self.id, now = %now, envelopes = out.len(), "maintenance tick");
        out
    }

    fn flush_gossip(&mut self, now: Timestamp) -> Option<Envelope> {
        if self.gossip.is_empty() {
            return None;
        }
        let outbound = self.connections.outbound_peers();
        if outbound.is_empty() {
            return None;
        }
        let neighbor = outbound[self.rng.random_usize(outbound.len())];
        let addresses = self.gossip.drain_to(&[neighbor]);
        Some(self.envelope(neighbor, now, Intent::Gossip).with_addresses(addresses))
    }

    fn broadcast_gossip(&mut self, now: Timestamp) -> Vec<Envelope> {
        if self.gossip.is_empty() {
            return Vec::new();
        }
        let mut peers = self.connections.outbound_peers();
        peers.extend(self.connections.inbound_peers());
        let addresses = self.gossip.drain_to(&peers);
        peers
            .into_iter()
            .map(|peer| self.envelope(peer, now, Intent::Gossip).with_addresses(addresses.clone()))
            .collect()
    }

    fn open_connections(&mut self, now: Timestamp, topology: &dyn TopologyView) -> Vec<Envelope> {
        if let SelectionStrategy::PowerOfTwo {
            probe: DegreeProbe::Messages,
            preference,
        } = self.config.strategy
        {
            return self.start_degree_round(now, preference);
        }

        let attempts = connection_attempts(
            self.connections.outbound_count(),
            self.connections.limits().max_outbound,
            &self.config.maintenance,
        );
        let mut requested = HashSet::new();
        let mut out = Vec::new();
        for _ in 0..attempts {
            let Some(target) = self.pick_candidate(topology) else {
                continue;
            };
            if requested.insert(target) {
                out.push(self.envelope(target, now, Intent::ConnectRequest));
            }
        }
        if !out.is_empty() {
            debug!(peer = %self.id, requests = out.len(), "requesting connections");
        }
        out
    }

    fn pick_candidate(&self, topology: &dyn TopologyView) -> Option<PeerId> {
        let ctx = self.selection_context();
        match self.config.strategy {
            SelectionStrategy::Uniform => base_candidate(&ctx),
            SelectionStrategy::PowerOfTwo { preference, .. } => match two_candidates(&ctx) {
                (Some(first), Some(second)) => Some(pick_by_degree(topology, preference, first, second)),
                (first, _) => first,
            },
            SelectionStrategy::BubbleAware {
                bubble_count,
                same_bubble_limit,
                max_redraws,
            } => bubble_candidate(&ctx, bubble_count, same_bubble_limit, max_redraws),
        }
    }

    /// Open a degree-probe round, replacing any unfinished one.
    fn start_degree_round(
        &mut self,
        now: Timestamp,
        preference: DegreePreference,
    ) -> Vec<Envelope> {
        let ctx = self.selection_context();
        match two_candidates(&ctx) {
            (Some(first), Some(second)) => {
                if self.pending_round.is_some() {
                    trace!(peer = %self.id, "discarding unfinished degree probe");
                }
                self.pending_round = Some(DegreeRound::new(first, second, preference, now));
                vec![
                    self.envelope(first, now, Intent::DegreeQuery),
                    self.envelope(second, now, Intent::DegreeQuery),
                ]
            }
            (Some(only), None) => {
                self.pending_round = None;
                vec![self.envelope(only, now, Intent::ConnectRequest)]
            }
            _ => Vec::new(),
        }
    }

    fn outdated_outbound(&self) -> Vec<PeerId> {
        self.connections
            .outbound_records()
            .into_iter()
            .filter(|(peer, connected)| {
                self.book
                    .timestamp_of(*peer)
                    .is_some_and(|record| is_outdated(record, *connected, &self.config.maintenance))
            })
            .map(|(peer, _)| peer)
            .collect()
    }
}
