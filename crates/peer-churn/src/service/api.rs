//! `PeerAgent` implementation.

use tracing::debug;

use crate::domain::{Envelope, Intent, PeerId, ProtocolError, Timestamp};
use crate::ports::{PeerAgent, TopologyView};
use crate::service::PeerNode;

impl PeerAgent for PeerNode {
    fn id(&self) -> PeerId {
        self.id
    }

    fn tick(&mut self, now: Timestamp, topology: &dyn TopologyView) -> Vec<Envelope> {
        self.run_maintenance(now, topology)
    }

    fn receive(&mut self, now: Timestamp, envelope: Envelope) -> Result<Envelope, ProtocolError> {
        self.process(now, envelope)
    }

    fn go_offline(&mut self, now: Timestamp) -> Vec<Envelope> {
        let mut peers = self.connections.outbound_peers();
        peers.extend(self.connections.inbound_peers());
        debug!(peer = %self.id, connections = peers.len(), "going offline");
        self.pending_round = None;
        peers
            .into_iter()
            .map(|peer| self.envelope(peer, now, Intent::Kill))
            .collect()
    }

    fn is_hard_coded_seed(&self) -> bool {
        self.is_seed
    }

    fn connection_count(&self) -> usize {
        self.connections.total()
    }
}
