//! # Gossip Buffer
//!
//! Outgoing address batch plus, per neighbor, the freshest timestamp we
//! already exchanged for every address. An address is only queued for a
//! neighbor when it would tell that neighbor something new.

mod buffer;
mod config;

pub use buffer::GossipBuffer;
pub use config::GossipConfig;

#[cfg(test)]
mod tests;
