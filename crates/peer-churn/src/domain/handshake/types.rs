//! Handshake types.

use crate::domain::{ConnectState, Intent};

/// How a connection attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// Both sides recorded the connection.
    Established,
    /// The acceptor had no inbound slot.
    Rejected,
    /// The acceptor granted a slot but the initiator could not take it.
    Aborted,
}

impl HandshakeOutcome {
    /// Outcome implied by the initiator's answer to the acceptor's reply.
    ///
    /// `reply` is what the acceptor answered the request with; `answer` is
    /// what the initiator sent back, if anything.
    pub fn from_replies(reply: &Intent, answer: Option<&Intent>) -> Self {
        match (reply, answer) {
            (Intent::ConnectAccepted, Some(Intent::ConnectDone)) => Self::Established,
            (Intent::ConnectAccepted, _) => Self::Aborted,
            _ => Self::Rejected,
        }
    }

    /// Handshake state reached.
    pub fn final_state(self) -> ConnectState {
        match self {
            Self::Established => ConnectState::Done,
            Self::Aborted => ConnectState::Accepted,
            Self::Rejected => ConnectState::None,
        }
    }
}
