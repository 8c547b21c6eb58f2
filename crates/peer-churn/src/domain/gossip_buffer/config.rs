//! Gossip configuration.

use serde::Deserialize;

/// Gossip buffer and address-reply sizing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GossipConfig {
    /// Maximum queued addresses; the oldest are dropped first. `None` is unbounded.
    pub buffer_capacity: Option<usize>,
    /// Addresses drawn from the book when a fresh address triggers epidemic forwarding.
    pub forward_fanout: usize,
    /// Fraction of the book returned to a `GetAddress` request.
    pub getaddr_max_pct: f64,
    /// Absolute ceiling for a `GetAddress` reply.
    pub getaddr_max: usize,
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: Some(1000),
            forward_fanout: 2,
            getaddr_max_pct: 0.23,
            getaddr_max: 2500,
        }
    }
}

impl GossipConfig {
    /// Testing config with a small buffer
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            buffer_capacity: Some(4),
            ..Self::default()
        }
    }

    /// Number of addresses to answer a `GetAddress` with.
    ///
    /// `book_size` is the whole book, requester included. The seed floor wins
    /// over the cap.
    pub fn getaddr_reply_size(&self, book_size: usize, seed_count: usize) -> usize {
        let share = (self.getaddr_max_pct * book_size as f64).floor() as usize;
        self.getaddr_max
            .min(share)
            .min(book_size)
            .max(seed_count.saturating_sub(1))
    }
}
