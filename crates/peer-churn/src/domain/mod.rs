//! Domain Layer - Pure protocol logic with no I/O
//!
//! This module contains the per-peer protocol state:
//! - Peer identities and simulation time
//! - Envelopes and their intents
//! - Address Book (staleness, condemnation, capacity)
//! - Gossip Buffer (per-neighbor suppression)
//! - Connection Table (outbound/inbound slots)
//! - Peer Selection (uniform, power of two choices, bubble aware)
//! - Connection Handshake (request, accept, done, kill)
//! - Maintenance Scheduling (interval marks, churn arithmetic)

pub mod address_book;
pub mod connection_table;
pub mod envelope;
pub mod gossip_buffer;
pub mod handshake;
pub mod maintenance;
pub mod selection;
/// Core domain types (entities, values, errors)
pub mod types;

pub use address_book::*;
pub use connection_table::*;
pub use envelope::*;
pub use gossip_buffer::*;
pub use handshake::*;
pub use maintenance::*;
pub use selection::*;
pub use types::*;
