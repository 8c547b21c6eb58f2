//! Domain Errors for Peer Churn
//!
//! Only protocol violations are errors. Capacity rejections and stale
//! addresses are ordinary protocol outcomes and never surface here.

use thiserror::Error;

use super::entities::PeerId;

/// Envelope that no correct delivery collaborator would ever hand to a peer.
///
/// These indicate a routing bug upstream and must abort the call instead of
/// being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The envelope claims to come from the receiving peer itself.
    #[error("peer {peer} received an envelope it sent itself")]
    ReflectedSender {
        /// The receiving peer.
        peer: PeerId,
    },

    /// Sender and receiver are the same identity.
    #[error("envelope from {peer} is addressed to its own sender")]
    SelfAddressed {
        /// The offending identity.
        peer: PeerId,
    },

    /// The envelope was delivered to a peer other than its receiver.
    #[error("envelope for {receiver} delivered to peer {peer}")]
    Misdelivered {
        /// The peer that was handed the envelope.
        peer: PeerId,
        /// The envelope's addressed receiver.
        receiver: PeerId,
    },
}
