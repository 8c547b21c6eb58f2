//! Value Objects for Peer Churn
//!
//! Time units used throughout the protocol. Simulation time is measured in
//! seconds, so these are plain multipliers.

/// One minute in simulation seconds.
pub const MINUTE: f64 = 60.0;

/// One hour in simulation seconds.
pub const HOUR: f64 = 60.0 * MINUTE;

/// One day in simulation seconds.
pub const DAY: f64 = 24.0 * HOUR;

/// An `(address, timestamp)` pair as carried in gossip.
pub type AddressRecord = (super::PeerId, super::Timestamp);
