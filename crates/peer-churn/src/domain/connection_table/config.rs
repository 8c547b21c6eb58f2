//! Connection capacity limits.

use serde::Deserialize;

/// Capacity limits of a connection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionLimits {
    /// Maximum outbound connections
    pub max_outbound: usize,
    /// Maximum connections in both directions together
    pub max_total: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_outbound: 8,
            max_total: 125,
        }
    }
}

impl ConnectionLimits {
    /// Limits of an adversarial peer that never refuses a connection.
    pub const fn unlimited() -> Self {
        Self {
            max_outbound: usize::MAX / 2,
            max_total: usize::MAX,
        }
    }

    /// Testing config with small limits
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            max_outbound: 3,
            max_total: 5,
        }
    }

    /// Inbound slots left over once outbound slots are reserved.
    pub fn max_inbound(&self) -> usize {
        self.max_total.saturating_sub(self.max_outbound)
    }
}
