//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** what a peer exposes to the delivery collaborator
//! - **Driven Ports (Outbound):** what a peer requires from its host

pub mod inbound;
pub mod outbound;

pub use inbound::PeerAgent;
pub use outbound::{ConfigProvider, EmptyTopology, RandomSource, TopologyView};
