//! # Driving Ports (Inbound API)
//!
//! The surface a delivery collaborator drives a peer through.

use crate::domain::{Envelope, PeerId, ProtocolError, Timestamp};
use crate::ports::TopologyView;

/// One protocol participant as seen by the delivery collaborator.
///
/// The collaborator ticks peers, routes every produced envelope to its
/// receiver and hands each reply back to the original sender. It never
/// inspects protocol state beyond what this trait exposes.
///
/// # Example
///
/// ```rust,ignore
/// use peer_churn::ports::{PeerAgent, EmptyTopology};
///
/// fn drive<P: PeerAgent>(peer: &mut P, now: Timestamp) {
///     for envelope in peer.tick(now, &EmptyTopology) {
///         println!("{} -> {}", envelope.sender, envelope.receiver);
///     }
/// }
/// ```
pub trait PeerAgent {
    /// Identity of this peer.
    fn id(&self) -> PeerId;

    /// Run one maintenance tick.
    ///
    /// Returns the envelopes to deliver, in order. `topology` is only read
    /// by strategies that inspect degrees directly.
    fn tick(&mut self, now: Timestamp, topology: &dyn TopologyView) -> Vec<Envelope>;

    /// Process one envelope addressed to this peer.
    ///
    /// Always produces exactly one reply, which may be inert.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] when the envelope could not have been
    /// routed correctly: its sender is this peer, it is addressed to its own
    /// sender, or its receiver is another peer.
    fn receive(&mut self, now: Timestamp, envelope: Envelope) -> Result<Envelope, ProtocolError>;

    /// Teardown envelopes for every connection, emitted before leaving.
    fn go_offline(&mut self, now: Timestamp) -> Vec<Envelope>;

    /// Whether this peer is one of the hard-coded seeds.
    fn is_hard_coded_seed(&self) -> bool;

    /// Connections in both directions.
    fn connection_count(&self) -> usize;
}
