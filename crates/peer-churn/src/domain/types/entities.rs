//! Core Domain Entities for Peer Churn
//!
//! Identities and simulation time shared by every component.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque peer identifier.
///
/// Identifiers are plain integers so the bubble-aware strategy can
/// partition them with `id mod bubble_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(pub u64);

impl PeerId {
    /// Create a PeerId from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Bubble this peer falls into when identities are split into `count` partitions.
    pub fn bubble(&self, count: u64) -> u64 {
        if count == 0 {
            0
        } else {
            self.0 % count
        }
    }
}

impl From<u64> for PeerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulation time in seconds.
///
/// Only comparisons and differences carry meaning; there is no wall-clock
/// epoch behind the value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Simulation start.
    pub const ZERO: Self = Self(0.0);

    /// Create a timestamp from seconds.
    pub const fn new(secs: f64) -> Self {
        Self(secs)
    }

    /// Get the underlying seconds value.
    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Add seconds to the timestamp.
    pub fn add_secs(&self, secs: f64) -> Self {
        Self(self.0 + secs)
    }

    /// Subtract seconds from the timestamp.
    pub fn sub_secs(&self, secs: f64) -> Self {
        Self(self.0 - secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    pub fn secs_since(&self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// Total ordering, NaN sorted last.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Timestamp {
    fn from(secs: f64) -> Self {
        Self(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
