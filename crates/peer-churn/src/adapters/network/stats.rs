//! Per-round delivery statistics.

use std::ops::AddAssign;

/// What happened while routing one or more ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Handshakes that reached `Done`
    pub connections_made: usize,
    /// Handshakes refused for capacity or aborted by the initiator
    pub connections_rejected: usize,
    /// Edges removed by teardown transcripts
    pub connections_torn_down: usize,
    /// Envelopes whose receiver had left the network
    pub vanished: usize,
    /// Envelopes handed to a peer
    pub delivered: usize,
}

impl AddAssign for RoundStats {
    fn add_assign(&mut self, other: Self) {
        self.connections_made += other.connections_made;
        self.connections_rejected += other.connections_rejected;
        self.connections_torn_down += other.connections_torn_down;
        self.vanished += other.vanished;
        self.delivered += other.delivered;
    }
}
