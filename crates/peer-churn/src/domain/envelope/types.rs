//! Envelope data types.

use serde::{Deserialize, Serialize};

use crate::domain::{AddressRecord, PeerId, Timestamp};

/// What an envelope asks of its receiver.
///
/// Exactly one intent travels per envelope; address gossip rides along
/// independently in [`Envelope::address_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Nothing beyond the carried addresses.
    Gossip,
    /// Initiator asks to become an outbound connection of the receiver.
    ConnectRequest,
    /// Receiver granted an inbound slot.
    ConnectAccepted,
    /// Initiator recorded the connection.
    ConnectDone,
    /// Tear down the connection with the receiver.
    Kill,
    /// Teardown acknowledged.
    Killed,
    /// Ask the receiver for a batch of addresses.
    GetAddress,
    /// Ask the receiver for its current connection count.
    DegreeQuery,
    /// Connection count of the sender.
    DegreeReply(usize),
}

/// Handshake progress as seen on a single envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectState {
    /// No connection intent (also the silent rejection).
    None,
    /// Connection requested.
    Request,
    /// Inbound slot granted.
    Accepted,
    /// Connection established on both sides.
    Done,
}

/// Message exchanged between two peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Originating peer.
    pub sender: PeerId,
    /// Addressed peer.
    pub receiver: PeerId,
    /// Simulation time the envelope was produced.
    pub timestamp: Timestamp,
    /// Gossiped addresses in send order.
    pub address_list: Vec<AddressRecord>,
    /// What the sender asks of the receiver.
    pub intent: Intent,
}

impl Envelope {
    /// Create an inert envelope.
    pub fn new(sender: PeerId, receiver: PeerId, timestamp: Timestamp) -> Self {
        Self {
            sender,
            receiver,
            timestamp,
            address_list: Vec::new(),
            intent: Intent::Gossip,
        }
    }

    /// Create an envelope carrying `intent`.
    pub fn with_intent(
        sender: PeerId,
        receiver: PeerId,
        timestamp: Timestamp,
        intent: Intent,
    ) -> Self {
        Self {
            intent,
            ..Self::new(sender, receiver, timestamp)
        }
    }

    /// Attach a gossip payload.
    #[must_use]
    pub fn with_addresses(mut self, addresses: Vec<AddressRecord>) -> Self {
        self.address_list = addresses;
        self
    }

    /// Handshake state carried by this envelope.
    pub fn connect_state(&self) -> ConnectState {
        match self.intent {
            Intent::ConnectRequest => ConnectState::Request,
            Intent::ConnectAccepted => ConnectState::Accepted,
            Intent::ConnectDone => ConnectState::Done,
            _ => ConnectState::None,
        }
    }

    /// Whether the sender asks to tear the connection down.
    pub fn kill_connection(&self) -> bool {
        self.intent == Intent::Kill
    }

    /// Whether the sender acknowledges a teardown.
    pub fn connection_killed(&self) -> bool {
        self.intent == Intent::Killed
    }

    /// Whether the sender asks for addresses.
    pub fn get_address(&self) -> bool {
        self.intent == Intent::GetAddress
    }

    /// Whether the sender asks for the receiver's degree.
    pub fn degree_query(&self) -> bool {
        self.intent == Intent::DegreeQuery
    }

    /// Degree reported by the sender, if this is a degree reply.
    pub fn degree_reply(&self) -> Option<usize> {
        match self.intent {
            Intent::DegreeReply(degree) => Some(degree),
            _ => None,
        }
    }

    /// Whether the envelope opens or advances a handshake.
    pub fn is_connection_intent(&self) -> bool {
        self.connect_state() != ConnectState::None
    }

    /// Whether the envelope carries no intent and no addresses.
    pub fn is_inert(&self) -> bool {
        self.intent == Intent::Gossip && self.address_list.is_empty()
    }
}
