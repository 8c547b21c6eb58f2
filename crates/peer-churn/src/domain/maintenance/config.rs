//! Maintenance configuration.

use serde::Deserialize;

use crate::domain::{DAY, HOUR};

/// Intervals and churn parameters of the maintenance tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Seconds between gossip flushes to one random outbound neighbor.
    pub gossip_interval_secs: f64,
    /// Seconds between broadcasts to every connected peer.
    pub broadcast_interval_secs: f64,
    /// Outbound peers whose record lags the connection by more than this many hours are dropped.
    pub replacement_hours: f64,
    /// Connection attempts per tick while far from the outbound limit.
    pub connect_burst: usize,
    /// Distance to the outbound limit below which only one attempt is made.
    pub burst_headroom: usize,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            gossip_interval_secs: 0.1,
            broadcast_interval_secs: DAY,
            replacement_hours: 4.0,
            connect_burst: 5,
            burst_headroom: 5,
        }
    }
}

impl MaintenanceConfig {
    /// Replacement window in seconds.
    pub fn replacement_secs(&self) -> f64 {
        self.replacement_hours * HOUR
    }

    /// Testing config with a one minute broadcast and a one hour replacement window
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            broadcast_interval_secs: 60.0,
            replacement_hours: 1.0,
            ..Self::default()
        }
    }
}
