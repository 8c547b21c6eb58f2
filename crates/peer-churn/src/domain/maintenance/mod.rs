//! # Maintenance Scheduling
//!
//! Interval bookkeeping for the per-peer maintenance tick: when to flush
//! gossip, when to broadcast, how many connection attempts to make and
//! which outbound connections went stale.

mod config;
mod timers;

pub use config::MaintenanceConfig;
pub use timers::{connection_attempts, is_outdated, IntervalTimers};
