//! Turn-based envelope routing.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::config::NetworkConfig;
use super::error::NetworkError;
use super::stats::RoundStats;
use crate::adapters::Topology;
use crate::domain::{Envelope, HandshakeOutcome, Intent, PeerId, Timestamp};
use crate::ports::{ConfigProvider, PeerAgent, RandomSource, TopologyView};
use crate::service::PeerNode;

/// Longest back-and-forth a single envelope may start.
const MAX_HOPS: usize = 8;

/// In-memory network of peers sharing one topology.
///
/// Peers are driven one at a time: a peer's tick and every transcript it
/// starts complete before the next peer runs.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use peer_churn::adapters::{NetworkConfig, SimulatedNetwork, StdRandomSource};
/// use peer_churn::Timestamp;
///
/// let rng = Arc::new(StdRandomSource::seeded(1));
/// let mut network = SimulatedNetwork::new(NetworkConfig::default(), rng, Timestamp::ZERO);
/// for _ in 0..20 {
///     network.join(Timestamp::ZERO)?;
/// }
/// let stats = network.run_round(Timestamp::new(1.0))?;
/// println!("{} new connections", stats.connections_made);
/// ```
pub struct SimulatedNetwork {
    topology: Arc<Topology>,
    peers: BTreeMap<PeerId, PeerNode>,
    seeds: Vec<PeerId>,
    next_id: u64,
    config: NetworkConfig,
    rng: Arc<dyn RandomSource>,
    totals: RoundStats,
}

impl SimulatedNetwork {
    /// Create a network holding only its seeds, created at `now`.
    pub fn new(config: NetworkConfig, rng: Arc<dyn RandomSource>, now: Timestamp) -> Self {
        let seeds: Vec<PeerId> = (0..config.seed_count).map(PeerId::new).collect();
        let topology = Arc::new(Topology::new());
        let mut peers = BTreeMap::new();
        for &seed in &seeds {
            topology.add_peer(seed);
            let peer = PeerNode::new(seed, now, &seeds, config.peer.clone(), Arc::clone(&rng));
            peers.insert(seed, peer);
        }
        debug!(seeds = seeds.len(), "simulated network created");

        Self {
            topology,
            peers,
            next_id: config.seed_count,
            seeds,
            config,
            rng,
            totals: RoundStats::default(),
        }
    }

    /// Create a network from any configuration source.
    pub fn from_provider(
        provider: &dyn ConfigProvider,
        rng: Arc<dyn RandomSource>,
        now: Timestamp,
    ) -> Self {
        Self::new(NetworkConfig::from_provider(provider), rng, now)
    }

    /// Add a fresh peer with the next id.
    ///
    /// The newcomer asks a seed for addresses and then runs its first tick.
    ///
    /// # Errors
    ///
    /// Propagates routing failures of the bootstrap transcripts.
    pub fn join(&mut self, now: Timestamp) -> Result<PeerId, NetworkError> {
        let id = PeerId::new(self.next_id);
        self.next_id += 1;
        let peer = PeerNode::new(
            id,
            now,
            &self.seeds,
            self.config.peer.clone(),
            Arc::clone(&self.rng),
        );
        debug!(peer = %id, now = %now, "peer joining");
        self.admit(peer, now)?;
        Ok(id)
    }

    /// Take `id` offline.
    ///
    /// Every connection is torn down through a full `Kill`/`Killed`
    /// transcript before the peer leaves the topology. The detached peer
    /// keeps its state and can come back with [`Self::rejoin`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UnknownPeer`] if `id` is not live. On a
    /// routing failure the peer stays in the network.
    pub fn leave(&mut self, id: PeerId, now: Timestamp) -> Result<PeerNode, NetworkError> {
        let mut peer = self
            .peers
            .remove(&id)
            .ok_or(NetworkError::UnknownPeer { peer: id })?;

        let mut stats = RoundStats::default();
        for envelope in peer.go_offline(now) {
            if let Err(e) = self.converse(&mut peer, envelope, now, &mut stats) {
                self.peers.insert(id, peer);
                return Err(e);
            }
        }
        let leftover = self.topology.remove_peer(id);
        stats.connections_torn_down += leftover.len();
        self.totals += stats;

        debug!(peer = %id, torn_down = stats.connections_torn_down, "peer left");
        Ok(peer)
    }

    /// Bring a previously detached peer back online.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::DuplicatePeer`] if its id is live, or a
    /// routing failure of the bootstrap transcripts.
    pub fn rejoin(&mut self, peer: PeerNode, now: Timestamp) -> Result<(), NetworkError> {
        let id = peer.id();
        if self.peers.contains_key(&id) {
            return Err(NetworkError::DuplicatePeer { peer: id });
        }
        debug!(peer = %id, now = %now, "peer rejoining");
        self.admit(peer, now)
    }

    /// Tick `id` and carry every produced envelope through its transcript.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UnknownPeer`] if `id` is not live,
    /// [`NetworkError::ForeignSender`] or [`NetworkError::UnpairedDegreeQuery`]
    /// for malformed tick output, and [`NetworkError::Protocol`] when a
    /// peer rejects a delivery.
    pub fn process_peer(&mut self, id: PeerId, now: Timestamp) -> Result<RoundStats, NetworkError> {
        let stats = self.detached(id, |network, origin| {
            let envelopes = origin.tick(now, network.topology.as_ref());
            network.route(origin, envelopes, now)
        })?;
        self.totals += stats;
        Ok(stats)
    }

    /// Route `envelopes` on behalf of live peer `origin`, as if its tick
    /// had produced them.
    ///
    /// # Errors
    ///
    /// Same as [`Self::process_peer`].
    pub fn deliver(
        &mut self,
        origin: PeerId,
        envelopes: Vec<Envelope>,
        now: Timestamp,
    ) -> Result<RoundStats, NetworkError> {
        let stats = self.detached(origin, |network, peer| network.route(peer, envelopes, now))?;
        self.totals += stats;
        Ok(stats)
    }

    /// Process every live peer once, in id order.
    ///
    /// # Errors
    ///
    /// Stops at the first error of [`Self::process_peer`].
    pub fn run_round(&mut self, now: Timestamp) -> Result<RoundStats, NetworkError> {
        let mut stats = RoundStats::default();
        for id in self.peer_ids() {
            if self.peers.contains_key(&id) {
                stats += self.process_peer(id, now)?;
            }
        }
        trace!(now = %now, ?stats, "round complete");
        Ok(stats)
    }

    /// Live peer `id`.
    pub fn peer(&self, id: PeerId) -> Option<&PeerNode> {
        self.peers.get(&id)
    }

    /// Live peers in id order.
    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.peers.keys().copied().collect()
    }

    /// Number of live peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Whether no peer is live.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Seed ids.
    pub fn seeds(&self) -> &[PeerId] {
        &self.seeds
    }

    /// Shared topology handle.
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Statistics accumulated since creation.
    pub fn totals(&self) -> RoundStats {
        self.totals
    }

    fn admit(&mut self, peer: PeerNode, now: Timestamp) -> Result<(), NetworkError> {
        let id = peer.id();
        self.topology.add_peer(id);
        self.peers.insert(id, peer);

        let stats = self.detached(id, |network, origin| {
            let mut stats = RoundStats::default();
            if let Some(request) = origin.request_addresses(now) {
                network.converse(origin, request, now, &mut stats)?;
            }
            let envelopes = origin.tick(now, network.topology.as_ref());
            stats += network.route(origin, envelopes, now)?;
            Ok(stats)
        })?;
        self.totals += stats;
        Ok(())
    }

    /// Run `f` with `id` taken out of the peer map, putting it back afterwards.
    fn detached<T, F>(&mut self, id: PeerId, f: F) -> Result<T, NetworkError>
    where
        F: FnOnce(&mut Self, &mut PeerNode) -> Result<T, NetworkError>,
    {
        let mut origin = self
            .peers
            .remove(&id)
            .ok_or(NetworkError::UnknownPeer { peer: id })?;
        let result = f(self, &mut origin);
        self.peers.insert(id, origin);
        result
    }

    fn route(
        &mut self,
        origin: &mut PeerNode,
        envelopes: Vec<Envelope>,
        now: Timestamp,
    ) -> Result<RoundStats, NetworkError> {
        let id = origin.id();
        let mut stats = RoundStats::default();
        let mut queue = envelopes.into_iter();

        while let Some(envelope) = queue.next() {
            if envelope.sender != id {
                warn!(peer = %id, sender = %envelope.sender, "tick produced a foreign envelope");
                return Err(NetworkError::ForeignSender {
                    expected: id,
                    sender: envelope.sender,
                });
            }

            if envelope.degree_query() {
                let partner = queue
                    .next()
                    .filter(|e| e.degree_query() && e.sender == id)
                    .ok_or(NetworkError::UnpairedDegreeQuery { peer: id })?;
                let missing = [envelope.receiver, partner.receiver]
                    .iter()
                    .filter(|r| !self.topology.peer_exists(**r))
                    .count();
                if missing > 0 {
                    debug!(peer = %id, missing, "degree probe candidate vanished");
                    stats.vanished += missing;
                    continue;
                }
                self.converse(origin, envelope, now, &mut stats)?;
                self.converse(origin, partner, now, &mut stats)?;
                continue;
            }

            self.converse(origin, envelope, now, &mut stats)?;
        }
        Ok(stats)
    }

    /// Deliver `first` and keep routing replies until one is inert.
    fn converse(
        &mut self,
        origin: &mut PeerNode,
        first: Envelope,
        now: Timestamp,
        stats: &mut RoundStats,
    ) -> Result<(), NetworkError> {
        let mut exchanges: Vec<(Envelope, Envelope)> = Vec::new();
        let mut next = Some(first);

        while let Some(envelope) = next.take() {
            if exchanges.len() >= MAX_HOPS {
                debug!(peer = %origin.id(), "transcript cut at hop limit");
                break;
            }
            let receiver = envelope.receiver;
            let delivered = if receiver == origin.id() {
                origin.receive(now, envelope.clone())
            } else {
                // Detached peers stay in the graph; only live ones receive.
                let present = self.topology.peer_exists(receiver);
                match self.peers.get_mut(&receiver).filter(|_| present) {
                    Some(peer) => peer.receive(now, envelope.clone()),
                    None => {
                        debug!(sender = %envelope.sender, receiver = %receiver, "receiver vanished");
                        stats.vanished += 1;
                        break;
                    }
                }
            };
            let reply = delivered.map_err(|e| {
                warn!(receiver = %receiver, error = %e, "delivery rejected");
                NetworkError::from(e)
            })?;
            stats.delivered += 1;
            if !reply.is_inert() {
                next = Some(reply.clone());
            }
            exchanges.push((envelope, reply));
        }

        self.apply_transcript(&exchanges, stats);
        Ok(())
    }

    /// Reflect completed handshakes and teardowns in the topology.
    fn apply_transcript(&self, exchanges: &[(Envelope, Envelope)], stats: &mut RoundStats) {
        for (i, (sent, reply)) in exchanges.iter().enumerate() {
            match sent.intent {
                Intent::ConnectRequest => {
                    let answer = exchanges.get(i + 1).map(|(_, r)| &r.intent);
                    match HandshakeOutcome::from_replies(&reply.intent, answer) {
                        HandshakeOutcome::Established => {
                            if self.topology.add_edge(sent.sender, sent.receiver) {
                                stats.connections_made += 1;
                                debug!(from = %sent.sender, to = %sent.receiver, "connection established");
                            }
                        }
                        outcome => {
                            stats.connections_rejected += 1;
                            debug!(from = %sent.sender, to = %sent.receiver, ?outcome, "connection refused");
                        }
                    }
                }
                Intent::Kill if reply.intent == Intent::Killed => {
                    if self.topology.remove_edge(sent.sender, sent.receiver) {
                        stats.connections_torn_down += 1;
                        debug!(from = %sent.sender, to = %sent.receiver, "connection torn down");
                    }
                }
                _ => {}
            }
        }
    }
}

impl std::fmt::Debug for SimulatedNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedNetwork")
            .field("peers", &self.peers.len())
            .field("edges", &self.topology.edge_count())
            .field("next_id", &self.next_id)
            .field("totals", &self.totals)
            .finish()
    }
}
