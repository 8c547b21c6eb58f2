//! Address Book configuration.

use serde::Deserialize;

use crate::domain::{DAY, HOUR, MINUTE};

/// Staleness and capacity rules for an address book.
///
/// All durations are in simulation seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddressBookConfig {
    /// Records touched this recently are never terrible.
    pub recent_grace_secs: f64,
    /// Records further than this in the future are terrible.
    pub future_tolerance_secs: f64,
    /// Records older than this are terrible.
    pub horizon_secs: f64,
    /// How far before `now` a condemned record is placed.
    pub condemn_penalty_secs: f64,
    /// Records this fresh trigger epidemic forwarding when gossiped.
    pub epidemic_window_secs: f64,
    /// Outbound senders whose record is older than this get refreshed on contact.
    pub sender_refresh_secs: f64,
    /// Maximum number of records; `None` keeps the book unbounded.
    pub capacity: Option<usize>,
    /// Fraction of `capacity` the book is pruned down to once exceeded.
    pub prune_ratio: f64,
}

impl Default for AddressBookConfig {
    fn default() -> Self {
        Self {
            recent_grace_secs: MINUTE,
            future_tolerance_secs: 10.0 * MINUTE,
            horizon_secs: 30.0 * DAY,
            condemn_penalty_secs: 5.0 * HOUR,
            epidemic_window_secs: 10.0 * MINUTE,
            sender_refresh_secs: 20.0 * MINUTE,
            capacity: Some(2500),
            prune_ratio: 0.8,
        }
    }
}

impl AddressBookConfig {
    /// Testing config with a tiny capacity
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            capacity: Some(10),
            ..Self::default()
        }
    }

    /// Number of records the book is pruned down to, if bounded.
    pub fn prune_target(&self) -> Option<usize> {
        self.capacity
            .map(|cap| (cap as f64 * self.prune_ratio).floor() as usize)
    }
}
