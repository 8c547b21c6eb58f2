//! Outstanding degree-probe round of a message-based power-of-two peer.

use crate::domain::{DegreePreference, PeerId, Timestamp};

/// What recording a degree reply led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The sender is not part of the round, or already answered.
    Ignored,
    /// The other candidate has not answered yet.
    Waiting,
    /// Both answered; connect to this one.
    Decided(PeerId),
}

/// Two candidates asked for their degree, and what they answered so far.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeRound {
    candidates: [PeerId; 2],
    replies: [Option<usize>; 2],
    preference: DegreePreference,
    started: Timestamp,
}

impl DegreeRound {
    /// Start a round probing `first` and `second`.
    pub fn new(
        first: PeerId,
        second: PeerId,
        preference: DegreePreference,
        started: Timestamp,
    ) -> Self {
        Self {
            candidates: [first, second],
            replies: [None, None],
            preference,
            started,
        }
    }

    /// Probed peers in draw order.
    pub fn candidates(&self) -> [PeerId; 2] {
        self.candidates
    }

    /// When the round was opened.
    pub fn started(&self) -> Timestamp {
        self.started
    }

    /// Whether `peer` was probed in this round and has not answered yet.
    pub fn awaits(&self, peer: PeerId) -> bool {
        self.slot(peer).is_some_and(|i| self.replies[i].is_none())
    }

    /// Record `degree` reported by `peer`.
    pub fn record(&mut self, peer: PeerId, degree: usize) -> ProbeOutcome {
        let Some(i) = self.slot(peer) else {
            return ProbeOutcome::Ignored;
        };
        if self.replies[i].is_some() {
            return ProbeOutcome::Ignored;
        }
        self.replies[i] = Some(degree);
        match self.replies {
            [Some(d1), Some(d2)] => {
                let [first, second] = self.candidates;
                if self.preference.keeps_first(d1, d2) {
                    ProbeOutcome::Decided(first)
                } else {
                    ProbeOutcome::Decided(second)
                }
            }
            _ => ProbeOutcome::Waiting,
        }
    }

    fn slot(&self, peer: PeerId) -> Option<usize> {
        self.candidates.iter().position(|&c| c == peer)
    }
}
