use std::sync::Arc;

use crate::domain::{
    AddressBook, AddressRecord, ConnectionTable, DegreeRound, Envelope, GossipBuffer, Intent,
    IntervalTimers, PeerId, SelectionContext, Timestamp,
};
use crate::ports::RandomSource;
use crate::service::PeerConfig;

/// One protocol participant.
///
/// Owns its address book, gossip buffer and connection table. All
/// randomness flows through the shared `RandomSource`.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use peer_churn::adapters::StdRandomSource;
/// use peer_churn::ports::{EmptyTopology, PeerAgent};
/// use peer_churn::service::{PeerConfig, PeerNode};
///
/// let rng = Arc::new(StdRandomSource::seeded(7));
/// let seeds = [PeerId::new(0)];
/// let mut peer = PeerNode::new(PeerId::new(5), Timestamp::ZERO, &seeds, PeerConfig::default(), rng);
///
/// let envelopes = peer.tick(Timestamp::ZERO, &EmptyTopology);
/// assert_eq!(envelopes[0].receiver, PeerId::new(0));
/// ```
pub struct PeerNode {
    pub(crate) id: PeerId,
    /// Seeds other than ourselves, in id order
    pub(crate) seeds: Vec<PeerId>,
    pub(crate) is_seed: bool,
    pub(crate) book: AddressBook,
    pub(crate) gossip: GossipBuffer,
    pub(crate) connections: ConnectionTable,
    pub(crate) timers: IntervalTimers,
    /// Outstanding degree probe (message-based power of two choices only)
    pub(crate) pending_round: Option<DegreeRound>,
    pub(crate) config: PeerConfig,
    pub(crate) rng: Arc<dyn RandomSource>,
}

impl PeerNode {
    /// Create a peer at `now` that knows `seeds`.
    ///
    /// # Arguments
    ///
    /// * `id` - Our own identity
    /// * `now` - Creation time; seeds are recorded as known good at this time
    /// * `seeds` - Hard-coded seed peers
    /// * `config` - Limits, strategy and tuning
    /// * `rng` - Source of every random draw
    pub fn new(
        id: PeerId,
        now: Timestamp,
        seeds: &[PeerId],
        config: PeerConfig,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        let mut other_seeds: Vec<PeerId> = seeds.iter().copied().filter(|s| *s != id).collect();
        other_seeds.sort();
        other_seeds.dedup();

        Self {
            id,
            is_seed: seeds.contains(&id),
            seeds: other_seeds,
            book: AddressBook::new(id, seeds, now, config.address_book.clone()),
            gossip: GossipBuffer::new(config.gossip.clone()),
            connections: ConnectionTable::new(config.effective_limits()),
            timers: IntervalTimers::new(now),
            pending_round: None,
            config,
            rng,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &PeerConfig {
        &self.config
    }

    /// The address book.
    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    /// The gossip buffer.
    pub fn gossip_buffer(&self) -> &GossipBuffer {
        &self.gossip
    }

    /// The connection table.
    pub fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Outbound peers in id order.
    pub fn outbound_peers(&self) -> Vec<PeerId> {
        self.connections.outbound_peers()
    }

    /// Inbound peers in id order.
    pub fn inbound_peers(&self) -> Vec<PeerId> {
        self.connections.inbound_peers()
    }

    /// Every address record, in id order.
    pub fn known_addresses(&self) -> Vec<AddressRecord> {
        let mut records = self.book.records().to_vec();
        records.sort_by_key(|(id, _)| *id);
        records
    }

    /// Whether the peer ever held as many connections as outbound slots.
    pub fn is_outbound_full(&self) -> bool {
        self.connections.is_outbound_full()
    }

    /// Degree-probe round still waiting for replies.
    pub fn pending_round(&self) -> Option<&DegreeRound> {
        self.pending_round.as_ref()
    }

    /// `GetAddress` for a random outbound neighbor, or a random seed while
    /// unconnected. `None` when there is nobody to ask.
    pub fn request_addresses(&self, now: Timestamp) -> Option<Envelope> {
        let outbound = self.connections.outbound_peers();
        let pool = if outbound.is_empty() {
            &self.seeds
        } else {
            &outbound
        };
        if pool.is_empty() {
            return None;
        }
        let target = pool[self.rng.random_usize(pool.len())];
        Some(self.envelope(target, now, Intent::GetAddress))
    }

    pub(crate) fn envelope(&self, receiver: PeerId, now: Timestamp, intent: Intent) -> Envelope {
        Envelope::with_intent(self.id, receiver, now, intent)
    }

    pub(crate) fn selection_context(&self) -> SelectionContext<'_> {
        SelectionContext {
            owner: self.id,
            book: &self.book,
            connections: &self.connections,
            rng: self.rng.as_ref(),
        }
    }
}

impl std::fmt::Debug for PeerNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerNode")
            .field("id", &self.id)
            .field("is_seed", &self.is_seed)
            .field("outbound", &self.connections.outbound_count())
            .field("inbound", &self.connections.inbound_count())
            .field("known", &self.book.len())
            .field("strategy", &self.config.strategy)
            .finish()
    }
}
