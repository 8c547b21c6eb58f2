//! # Connection Table
//!
//! Outbound and inbound connections of one peer, keyed by peer id with the
//! time of last activity.
//!
//! - **Outbound**: connections we initiated, capped at `max_outbound`
//! - **Inbound**: connections others initiated, capped at
//!   `max_total - max_outbound`
//!
//! A peer is never both.

mod config;
mod table;

pub use config::ConnectionLimits;
pub use table::ConnectionTable;
