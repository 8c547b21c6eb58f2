//! Gossip buffer implementation.

use std::collections::{HashMap, VecDeque};

use super::config::GossipConfig;
use crate::domain::{AddressRecord, PeerId, Timestamp};

/// Outgoing address queue with per-neighbor suppression.
#[derive(Debug, Clone)]
pub struct GossipBuffer {
    /// neighbor -> (address -> freshest timestamp exchanged)
    known_by_neighbor: HashMap<PeerId, HashMap<PeerId, Timestamp>>,
    /// Queued addresses, oldest first
    outgoing: VecDeque<AddressRecord>,
    config: GossipConfig,
}

impl GossipBuffer {
    /// Create an empty buffer.
    pub fn new(config: GossipConfig) -> Self {
        Self {
            known_by_neighbor: HashMap::new(),
            outgoing: VecDeque::new(),
            config,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &GossipConfig {
        &self.config
    }

    /// Start tracking `neighbor` if it is new.
    pub fn ensure_neighbor(&mut self, neighbor: PeerId) {
        self.known_by_neighbor.entry(neighbor).or_default();
    }

    /// Whether `neighbor` is tracked.
    pub fn knows_neighbor(&self, neighbor: PeerId) -> bool {
        self.known_by_neighbor.contains_key(&neighbor)
    }

    /// Freshest timestamp for `id` already exchanged with `neighbor`.
    pub fn known_by(&self, neighbor: PeerId, id: PeerId) -> Option<Timestamp> {
        self.known_by_neighbor
            .get(&neighbor)
            .and_then(|known| known.get(&id).copied())
    }

    /// Queue every candidate that would be news to `neighbor`.
    ///
    /// A candidate `(id, own_ts)` is queued when the neighbor was never told
    /// about `id` or `own_ts` is strictly fresher than what it was told, and
    /// the same record is not already waiting in the queue. The neighbor's
    /// own address is never queued for it. Knowledge is only recorded once
    /// the queue is sent, see [`Self::drain_to`]. Returns the number of
    /// addresses queued.
    pub fn buffer_for(&mut self, neighbor: PeerId, candidates: &[AddressRecord]) -> usize {
        self.ensure_neighbor(neighbor);
        let queued: Vec<AddressRecord> = self
            .news_for(neighbor, candidates)
            .into_iter()
            .filter(|record| !self.outgoing.contains(record))
            .collect();
        let count = queued.len();
        self.outgoing.extend(queued);
        self.enforce_capacity();
        count
    }

    /// Record that `neighbor` knows `id` at `ts`. Keeps the freshest.
    pub fn mark_known(&mut self, neighbor: PeerId, id: PeerId, ts: Timestamp) {
        let known = self.known_by_neighbor.entry(neighbor).or_default();
        match known.get_mut(&id) {
            Some(told) if *told >= ts => {}
            Some(told) => *told = ts,
            None => {
                known.insert(id, ts);
            }
        }
    }

    /// Drop every trace of `id`: as a neighbor and as gossiped address.
    pub fn forget(&mut self, id: PeerId) {
        self.known_by_neighbor.remove(&id);
        for known in self.known_by_neighbor.values_mut() {
            known.remove(&id);
        }
    }

    /// Number of queued addresses.
    pub fn len(&self) -> usize {
        self.outgoing.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Queued addresses, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &AddressRecord> {
        self.outgoing.iter()
    }

    /// Copy of the queue, leaving it in place.
    pub fn snapshot(&self) -> Vec<AddressRecord> {
        self.outgoing.iter().copied().collect()
    }

    /// Discard the queue and answer `requester` directly.
    ///
    /// Every candidate that is news to `requester` is returned and recorded
    /// as known by it. The queue ceiling does not apply to the answer.
    pub fn reply_to(&mut self, requester: PeerId, candidates: &[AddressRecord]) -> Vec<AddressRecord> {
        self.clear();
        let reply = self.news_for(requester, candidates);
        for &(id, ts) in &reply {
            self.mark_known(requester, id, ts);
        }
        reply
    }

    /// Take the whole queue for sending to `recipients`.
    ///
    /// Every recipient is recorded as knowing every drained record, keeping
    /// the freshest timestamp. A recipient's own address is not recorded.
    pub fn drain_to(&mut self, recipients: &[PeerId]) -> Vec<AddressRecord> {
        let sent: Vec<AddressRecord> = self.outgoing.drain(..).collect();
        for &recipient in recipients {
            for &(id, ts) in &sent {
                if id != recipient {
                    self.mark_known(recipient, id, ts);
                }
            }
        }
        sent
    }

    /// Discard the queue. Nobody is recorded as knowing the discarded records.
    pub fn clear(&mut self) {
        self.outgoing.clear();
    }

    fn news_for(&self, neighbor: PeerId, candidates: &[AddressRecord]) -> Vec<AddressRecord> {
        let known = self.known_by_neighbor.get(&neighbor);
        let mut news: Vec<AddressRecord> = Vec::new();
        for &(id, ts) in candidates {
            if id == neighbor || news.contains(&(id, ts)) {
                continue;
            }
            let told = known.and_then(|known| known.get(&id));
            if told.map_or(true, |&told| ts > told) {
                news.push((id, ts));
            }
        }
        news
    }

    fn enforce_capacity(&mut self) {
        if let Some(cap) = self.config.buffer_capacity {
            let excess = self.outgoing.len().saturating_sub(cap);
            self.outgoing.drain(..excess);
        }
    }
}
