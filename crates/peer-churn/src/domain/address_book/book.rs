//! Main AddressBook implementation.

use std::collections::{BTreeSet, HashMap};

use super::config::AddressBookConfig;
use super::security::{condemned_timestamp, is_terrible_at};
use crate::domain::{AddressRecord, PeerId, Timestamp};
use crate::ports::RandomSource;

/// Per-peer store of known addresses and when each was last known good.
///
/// Records keep insertion order in a dense vector so random draws are a
/// single index lookup; `index` maps ids back into it.
#[derive(Debug, Clone)]
pub struct AddressBook {
    /// Identity of the owning peer (never stored)
    owner: PeerId,
    /// Seed peers, never evicted
    seeds: BTreeSet<PeerId>,
    /// Records in insertion order
    records: Vec<AddressRecord>,
    /// Position of each id in `records`
    index: HashMap<PeerId, usize>,
    /// Configuration
    config: AddressBookConfig,
}

impl AddressBook {
    /// Create a book pre-populated with `seeds` at `now`.
    ///
    /// The owner's own id is skipped if it is a seed.
    pub fn new(owner: PeerId, seeds: &[PeerId], now: Timestamp, config: AddressBookConfig) -> Self {
        let mut book = Self {
            owner,
            seeds: seeds.iter().copied().collect(),
            records: Vec::with_capacity(seeds.len()),
            index: HashMap::with_capacity(seeds.len()),
            config,
        };
        for &seed in seeds {
            book.observe(seed, now);
        }
        book
    }

    /// Whether `id` has a record.
    pub fn has(&self, id: PeerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Last-known-good time of `id`.
    pub fn timestamp_of(&self, id: PeerId) -> Option<Timestamp> {
        self.index.get(&id).map(|&i| self.records[i].1)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the book holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `id` is one of the hard-coded seeds.
    pub fn is_seed(&self, id: PeerId) -> bool {
        self.seeds.contains(&id)
    }

    /// Hard-coded seeds, including the owner if it is one.
    pub fn seeds(&self) -> &BTreeSet<PeerId> {
        &self.seeds
    }

    /// Configuration in effect.
    pub fn config(&self) -> &AddressBookConfig {
        &self.config
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    /// Record an address heard through gossip.
    ///
    /// Inserts unknown ids. A known id only moves forward in time; an older
    /// report never replaces a fresher record. Returns true if the id was new.
    pub fn observe(&mut self, id: PeerId, ts: Timestamp) -> bool {
        if id == self.owner {
            return false;
        }
        match self.index.get(&id) {
            Some(&i) => {
                if ts > self.records[i].1 {
                    self.records[i].1 = ts;
                }
                false
            }
            None => {
                self.index.insert(id, self.records.len());
                self.records.push((id, ts));
                true
            }
        }
    }

    /// Record verified-good contact with `id` at `ts`, overwriting any record.
    pub fn refresh(&mut self, id: PeerId, ts: Timestamp) {
        if id == self.owner {
            return;
        }
        match self.index.get(&id) {
            Some(&i) => self.records[i].1 = ts,
            None => {
                self.index.insert(id, self.records.len());
                self.records.push((id, ts));
            }
        }
    }

    /// Whether the record for `id` is implausible at `now`.
    ///
    /// Pure check; unknown ids are never terrible.
    pub fn is_terrible(&self, now: Timestamp, id: PeerId) -> bool {
        self.timestamp_of(id)
            .is_some_and(|ts| is_terrible_at(ts, now, &self.config))
    }

    /// Demote `id` by forcing its record back to `now - condemn_penalty`.
    pub fn condemn(&mut self, id: PeerId, now: Timestamp) {
        if let Some(&i) = self.index.get(&id) {
            self.records[i].1 = condemned_timestamp(now, &self.config);
        }
    }

    /// Whether the record for `id` is fresh enough to trigger epidemic forwarding.
    pub fn is_recent(&self, now: Timestamp, id: PeerId) -> bool {
        self.timestamp_of(id)
            .is_some_and(|ts| now.secs_since(ts) < self.config.epidemic_window_secs)
    }

    /// One uniformly drawn id.
    pub fn random_id(&self, rng: &dyn RandomSource) -> Option<PeerId> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.records[rng.random_usize(self.records.len())].0)
    }

    /// `count` draws with replacement, duplicates removed (first occurrence kept).
    pub fn sample_with_replacement(&self, rng: &dyn RandomSource, count: usize) -> Vec<PeerId> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(id) = self.random_id(rng) {
                if !drawn.contains(&id) {
                    drawn.push(id);
                }
            }
        }
        drawn
    }

    /// Up to `count` distinct ids, skipping those for which `exclude` holds.
    ///
    /// Partial Fisher-Yates over the eligible ids.
    pub fn sample_distinct<F>(&self, rng: &dyn RandomSource, count: usize, exclude: F) -> Vec<PeerId>
    where
        F: Fn(PeerId) -> bool,
    {
        let mut pool: Vec<PeerId> = self
            .records
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !exclude(*id))
            .collect();
        let take = count.min(pool.len());
        for i in 0..take {
            let j = i + rng.random_usize(pool.len() - i);
            pool.swap(i, j);
        }
        pool.truncate(take);
        pool
    }

    /// Records for `ids`, skipping unknown ones.
    pub fn records_for(&self, ids: &[PeerId]) -> Vec<AddressRecord> {
        ids.iter()
            .filter_map(|&id| self.timestamp_of(id).map(|ts| (id, ts)))
            .collect()
    }

    /// Remove the record for `id`. Seeds are never removed.
    pub fn remove(&mut self, id: PeerId) -> Option<Timestamp> {
        if self.is_seed(id) {
            return None;
        }
        let i = self.index.remove(&id)?;
        let (_, ts) = self.records.swap_remove(i);
        if let Some(&(moved, _)) = self.records.get(i) {
            self.index.insert(moved, i);
        }
        Some(ts)
    }

    /// Enforce the capacity bound.
    ///
    /// Once the book exceeds `capacity`, the oldest records that are neither
    /// seeds nor `protected` are removed until the book is down to the prune
    /// target. Returns the removed ids, oldest first.
    pub fn prune<F>(&mut self, protected: F) -> Vec<PeerId>
    where
        F: Fn(PeerId) -> bool,
    {
        let (Some(capacity), Some(target)) = (self.config.capacity, self.config.prune_target())
        else {
            return Vec::new();
        };
        if self.records.len() <= capacity {
            return Vec::new();
        }

        let mut candidates: Vec<AddressRecord> = self
            .records
            .iter()
            .copied()
            .filter(|(id, _)| !self.is_seed(*id) && !protected(*id))
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let excess = self.records.len().saturating_sub(target);
        let mut removed = Vec::with_capacity(excess);
        for (id, _) in candidates.into_iter().take(excess) {
            if self.remove(id).is_some() {
                removed.push(id);
            }
        }
        removed
    }
}
