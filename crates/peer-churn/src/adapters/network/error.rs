//! Delivery errors.

use thiserror::Error;

use crate::domain::{PeerId, ProtocolError};

/// Routing failures of the simulated network.
///
/// A vanished receiver is not an error; it is counted in the round stats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// No live peer has this id.
    #[error("peer {peer} is not in the network")]
    UnknownPeer {
        /// The missing peer.
        peer: PeerId,
    },

    /// A peer with this id is already live.
    #[error("peer {peer} is already in the network")]
    DuplicatePeer {
        /// The duplicated id.
        peer: PeerId,
    },

    /// A ticking peer produced an envelope in someone else's name.
    #[error("peer {expected} emitted an envelope sent by {sender}")]
    ForeignSender {
        /// The ticking peer.
        expected: PeerId,
        /// The sender written on the envelope.
        sender: PeerId,
    },

    /// A degree query was not followed by its partner query.
    #[error("peer {peer} emitted an unpaired degree query")]
    UnpairedDegreeQuery {
        /// The querying peer.
        peer: PeerId,
    },

    /// A peer rejected an envelope as misrouted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
