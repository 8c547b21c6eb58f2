//! Interval marks and churn arithmetic.

use super::config::MaintenanceConfig;
use crate::domain::Timestamp;

/// Last time each periodic job ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimers {
    last_flush: Timestamp,
    last_broadcast: Timestamp,
}

impl IntervalTimers {
    /// Both marks start at the peer's creation time.
    pub fn new(created: Timestamp) -> Self {
        Self {
            last_flush: created,
            last_broadcast: created,
        }
    }

    /// Whether the gossip flush is due; advances the mark when it is.
    pub fn flush_due(&mut self, now: Timestamp, config: &MaintenanceConfig) -> bool {
        advance_if_due(&mut self.last_flush, now, config.gossip_interval_secs)
    }

    /// Whether the broadcast is due; advances the mark when it is.
    pub fn broadcast_due(&mut self, now: Timestamp, config: &MaintenanceConfig) -> bool {
        advance_if_due(&mut self.last_broadcast, now, config.broadcast_interval_secs)
    }

    /// Time of the last flush.
    pub fn last_flush(&self) -> Timestamp {
        self.last_flush
    }

    /// Time of the last broadcast.
    pub fn last_broadcast(&self) -> Timestamp {
        self.last_broadcast
    }
}

fn advance_if_due(mark: &mut Timestamp, now: Timestamp, interval: f64) -> bool {
    if now.secs_since(*mark) >= interval {
        *mark = now;
        true
    } else {
        false
    }
}

/// Connection attempts for a tick with `outbound` connections open.
///
/// One attempt once within `burst_headroom` of the limit, the full burst
/// otherwise, none at the limit.
pub fn connection_attempts(outbound: usize, max_outbound: usize, config: &MaintenanceConfig) -> usize {
    if outbound >= max_outbound {
        0
    } else if outbound.saturating_add(config.burst_headroom) > max_outbound {
        1
    } else {
        config.connect_burst
    }
}

/// Whether an outbound connection opened at `connected` has outlived the
/// book record of its peer, last known good at `record`.
pub fn is_outdated(record: Timestamp, connected: Timestamp, config: &MaintenanceConfig) -> bool {
    record.add_secs(config.replacement_secs()) < connected
}
