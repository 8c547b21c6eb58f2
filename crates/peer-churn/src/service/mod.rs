//! # Peer Service
//!
//! `PeerNode` ties the domain components of one peer together and
//! implements the `PeerAgent` driving port.
//!
//! ## Responsibilities
//!
//! - `receive`: validate routing, run the handshake, absorb gossip, answer
//!   address and degree requests
//! - `tick`: flush and broadcast gossip, churn outbound connections, drop
//!   stale ones
//! - `go_offline` / `request_addresses`: lifecycle envelopes
//!
//! Both personalities (degrees read from the topology, degrees probed with
//! messages) are the same `PeerNode` with a different `SelectionStrategy`.

// Semantic submodules
mod api;
mod config;
mod core;
mod maintenance;
mod receive;

// Re-export public API
pub use config::PeerConfig;
pub use core::PeerNode;
