//! Envelope processing.

use tracing::{debug, trace};

use crate::domain::{
    respond, AddressRecord, Envelope, Intent, PeerId, ProbeOutcome, ProtocolError, Timestamp,
};
use crate::service::PeerNode;

impl PeerNode {
    /// Process one envelope addressed to this peer and build the reply.
    pub(crate) fn process(
        &mut self,
        now: Timestamp,
        envelope: Envelope,
    ) -> Result<Envelope, ProtocolError> {
        self.validate(&envelope)?;
        let sender = envelope.sender;
        trace!(
            peer = %self.id,
            sender = %sender,
            intent = ?envelope.intent,
            addresses = envelope.address_list.len(),
            "receiving envelope"
        );

        let mut reply = Envelope::new(self.id, sender, now);

        if !self.book.has(sender) {
            self.book.observe(sender, now);
        }
        self.gossip.ensure_neighbor(sender);

        if let Some(intent) = respond(&mut self.connections, sender, envelope.intent, now) {
            reply.intent = intent;
        }

        self.refresh_outbound_sender(sender, now);

        if !envelope.address_list.is_empty() {
            self.absorb_addresses(sender, &envelope.address_list, now);
        }

        match envelope.intent {
            Intent::GetAddress => {
                reply.address_list = self.answer_get_address(sender);
            }
            Intent::DegreeQuery => {
                reply.intent = Intent::DegreeReply(self.connections.total());
            }
            Intent::DegreeReply(degree) => {
                if let Some(target) = self.record_degree(sender, degree) {
                    reply.receiver = target;
                    reply.intent = Intent::ConnectRequest;
                }
            }
            _ => {}
        }

        Ok(reply)
    }

    fn validate(&self, envelope: &Envelope) -> Result<(), ProtocolError> {
        if envelope.sender == self.id {
            return Err(ProtocolError::ReflectedSender { peer: self.id });
        }
        if envelope.sender == envelope.receiver {
            return Err(ProtocolError::SelfAddressed {
                peer: envelope.sender,
            });
        }
        if envelope.receiver != self.id {
            return Err(ProtocolError::Misdelivered {
                peer: self.id,
                receiver: envelope.receiver,
            });
        }
        Ok(())
    }

    /// Outbound neighbors we hear from are known good, at most every refresh window.
    fn refresh_outbound_sender(&mut self, sender: PeerId, now: Timestamp) {
        if !self.connections.is_outbound(sender) {
            return;
        }
        let window = self.book.config().sender_refresh_secs;
        if let Some(ts) = self.book.timestamp_of(sender) {
            if ts < now.sub_secs(window) {
                self.book.refresh(sender, now);
            }
        }
    }

    fn absorb_addresses(&mut self, sender: PeerId, addresses: &[AddressRecord], now: Timestamp) {
        for &(address, ts) in addresses {
            if address == self.id {
                continue;
            }
            self.book.observe(address, ts);
            self.gossip.mark_known(sender, address, ts);
            if self.book.is_terrible(now, address) {
                trace!(peer = %self.id, address = %address, "condemning implausible address");
                self.book.condemn(address, now);
            }
            if self.book.is_recent(now, address) {
                self.forward_epidemic(sender);
            }
        }
        self.prune_book();
    }

    /// Queue a few random addresses for `neighbor` after it told us something fresh.
    fn forward_epidemic(&mut self, neighbor: PeerId) {
        let fanout = self.gossip.config().forward_fanout;
        let ids = self.book.sample_with_replacement(self.rng.as_ref(), fanout);
        let records = self.book.records_for(&ids);
        self.gossip.buffer_for(neighbor, &records);
    }

    fn prune_book(&mut self) {
        let connections = &self.connections;
        let removed = self.book.prune(|id| connections.is_connected(id));
        if removed.is_empty() {
            return;
        }
        debug!(peer = %self.id, removed = removed.len(), "address book pruned");
        for id in removed {
            self.gossip.forget(id);
        }
    }

    /// Fill a `GetAddress` reply for `requester`.
    ///
    /// The outgoing buffer is discarded and the sampled addresses that are
    /// news to the requester make up the reply. The reply is sized on the
    /// whole book, requester included, while the requester itself is never
    /// sampled.
    fn answer_get_address(&mut self, requester: PeerId) -> Vec<AddressRecord> {
        let seed_count = self.book.seeds().len();
        let size = self
            .gossip
            .config()
            .getaddr_reply_size(self.book.len(), seed_count);
        let others = self.book.len() - usize::from(self.book.has(requester));

        let ids = if size <= others {
            self.book
                .sample_distinct(self.rng.as_ref(), size, |id| id == requester)
        } else {
            let mut ids = self.book.sample_with_replacement(self.rng.as_ref(), size);
            ids.retain(|id| *id != requester);
            ids
        };
        let records = self.book.records_for(&ids);
        let reply = self.gossip.reply_to(requester, &records);
        trace!(peer = %self.id, requester = %requester, size, sent = reply.len(), "answering address request");
        reply
    }

    /// Record a degree reply; returns whom to connect to once the round is decided.
    fn record_degree(&mut self, sender: PeerId, degree: usize) -> Option<PeerId> {
        let round = self.pending_round.as_mut()?;
        match round.record(sender, degree) {
            ProbeOutcome::Decided(target) => {
                debug!(peer = %self.id, target = %target, "degree probe decided");
                self.pending_round = None;
                Some(target)
            }
            ProbeOutcome::Waiting => None,
            ProbeOutcome::Ignored => {
                trace!(peer = %self.id, sender = %sender, "unsolicited degree reply");
                None
            }
        }
    }
}
