//! Candidate draws shared by every strategy.

use crate::domain::{AddressBook, ConnectionTable, DegreePreference, PeerId};
use crate::ports::{RandomSource, TopologyView};

/// Collisions tolerated after the first draw.
const BASE_RETRIES: usize = 3;

/// Everything a draw needs to know about the drawing peer.
#[derive(Clone, Copy)]
pub struct SelectionContext<'a> {
    /// The drawing peer
    pub owner: PeerId,
    /// Its address book
    pub book: &'a AddressBook,
    /// Its connections
    pub connections: &'a ConnectionTable,
    /// Randomness
    pub rng: &'a dyn RandomSource,
}

impl SelectionContext<'_> {
    fn collides(&self, id: PeerId) -> bool {
        self.book.is_seed(id) || self.connections.is_connected(id)
    }

    fn non_seed_outbound(&self) -> usize {
        self.connections
            .outbound_peers()
            .into_iter()
            .filter(|peer| !self.book.is_seed(*peer))
            .count()
    }
}

/// One candidate, or `None`.
///
/// With no outbound connection any book entry will do, seeds included.
/// Otherwise a draw that hits a seed or a connected peer is retried a
/// bounded number of times before giving up.
pub fn base_candidate(ctx: &SelectionContext<'_>) -> Option<PeerId> {
    if ctx.connections.outbound_count() == 0 {
        return ctx.book.random_id(ctx.rng);
    }
    if ctx.non_seed_outbound() > ctx.connections.limits().max_outbound {
        return None;
    }

    let first = ctx.book.random_id(ctx.rng)?;
    if !ctx.collides(first) {
        return Some(first);
    }
    for _ in 0..BASE_RETRIES {
        match ctx.book.random_id(ctx.rng) {
            Some(id) if !ctx.collides(id) => return Some(id),
            _ => {}
        }
    }
    None
}

/// Two base draws; the second is dropped when it repeats the first.
pub fn two_candidates(ctx: &SelectionContext<'_>) -> (Option<PeerId>, Option<PeerId>) {
    let first = base_candidate(ctx);
    let second = base_candidate(ctx).filter(|id| Some(*id) != first);
    match (first, second) {
        (None, second) => (second, None),
        pair => pair,
    }
}

/// Keep the preferred of two candidates by their current degree.
///
/// Degrees are only compared when both candidates are in the topology;
/// otherwise the first is kept.
pub fn pick_by_degree(
    topology: &dyn TopologyView,
    preference: DegreePreference,
    first: PeerId,
    second: PeerId,
) -> PeerId {
    match (topology.degree(first), topology.degree(second)) {
        (Some(d1), Some(d2)) if !preference.keeps_first(d1, d2) => second,
        _ => first,
    }
}

/// Bubble-aware draw.
///
/// A candidate outside every bubble we already connect to is taken at once.
/// A candidate from our own bubble is taken while fewer than
/// `same_bubble_limit` outbound connections share it. Anything else is
/// redrawn up to `max_redraws` times, after which the last draw stands.
pub fn bubble_candidate(
    ctx: &SelectionContext<'_>,
    bubble_count: u64,
    same_bubble_limit: usize,
    max_redraws: usize,
) -> Option<PeerId> {
    let own = ctx.owner.bubble(bubble_count);
    let outbound_bubbles: Vec<u64> = ctx
        .connections
        .outbound_peers()
        .iter()
        .map(|peer| peer.bubble(bubble_count))
        .collect();
    let own_bubble_links = outbound_bubbles.iter().filter(|&&b| b == own).count();

    let mut candidate = base_candidate(ctx);
    for _ in 0..max_redraws {
        let id = candidate?;
        let bubble = id.bubble(bubble_count);
        if !outbound_bubbles.contains(&bubble) {
            break;
        }
        if bubble == own && own_bubble_links < same_bubble_limit {
            break;
        }
        candidate = base_candidate(ctx);
    }
    candidate
}
