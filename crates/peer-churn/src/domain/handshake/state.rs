//! Handshake transitions.

use tracing::debug;

use crate::domain::{ConnectionTable, Intent, PeerId, Timestamp};

/// Apply a handshake or teardown `intent` received from `peer`.
///
/// Returns the intent to answer with, or `None` when `intent` is not part
/// of the handshake.
pub fn respond(
    table: &mut ConnectionTable,
    peer: PeerId,
    intent: Intent,
    now: Timestamp,
) -> Option<Intent> {
    let reply = match intent {
        Intent::ConnectRequest => {
            if table.accept_inbound(peer, now) {
                Intent::ConnectAccepted
            } else {
                debug!(peer = %peer, inbound = table.inbound_count(), "inbound connection refused");
                Intent::Gossip
            }
        }
        Intent::ConnectAccepted => {
            if table.record_outbound(peer, now) {
                Intent::ConnectDone
            } else {
                debug!(peer = %peer, "accepted connection no longer fits, killing");
                Intent::Kill
            }
        }
        // Acceptor already holds the inbound slot.
        Intent::ConnectDone => Intent::Gossip,
        Intent::Kill => {
            table.remove(peer);
            Intent::Killed
        }
        Intent::Killed => {
            table.remove(peer);
            Intent::Gossip
        }
        Intent::Gossip | Intent::GetAddress | Intent::DegreeQuery | Intent::DegreeReply(_) => {
            return None
        }
    };
    Some(reply)
}
