//! Tests for Gossip Buffer

use proptest::prelude::*;

use super::*;
use crate::domain::{PeerId, Timestamp};

fn rec(id: u64, ts: f64) -> (PeerId, Timestamp) {
    (PeerId(id), Timestamp::new(ts))
}

// =============================================================================
// TEST GROUP 1: Suppression
// =============================================================================

#[test]
fn test_buffer_skips_what_neighbor_already_knows() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    let neighbor = PeerId(12);
    buffer.mark_known(neighbor, PeerId(2000), Timestamp::new(5.2));
    buffer.mark_known(neighbor, PeerId(5000), Timestamp::new(4.3));
    buffer.mark_known(neighbor, PeerId(6000), Timestamp::new(1.2));

    let queued = buffer.buffer_for(neighbor, &[rec(101, 3.9), rec(2000, 4.3), rec(5000, 88.2)]);

    assert_eq!(queued, 2);
    assert_eq!(buffer.snapshot(), vec![rec(101, 3.9), rec(5000, 88.2)]);
}

#[test]
fn test_buffer_updates_neighbor_knowledge() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    let neighbor = PeerId(3);

    buffer.buffer_for(neighbor, &[rec(7, 10.0)]);
    assert_eq!(buffer.known_by(neighbor, PeerId(7)), None);

    // Already waiting in the queue.
    assert_eq!(buffer.buffer_for(neighbor, &[rec(7, 10.0)]), 0);
    assert_eq!(buffer.len(), 1);

    assert_eq!(buffer.drain_to(&[neighbor]), vec![rec(7, 10.0)]);
    assert_eq!(buffer.known_by(neighbor, PeerId(7)), Some(Timestamp::new(10.0)));
    assert_eq!(buffer.buffer_for(neighbor, &[rec(7, 10.0)]), 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_discarded_records_are_offered_again() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    let neighbor = PeerId(77);

    assert_eq!(buffer.buffer_for(neighbor, &[rec(40, 50.0)]), 1);
    buffer.clear();

    assert_eq!(buffer.known_by(neighbor, PeerId(40)), None);
    assert_eq!(buffer.buffer_for(neighbor, &[rec(40, 50.0)]), 1);
}

#[test]
fn test_capacity_drop_leaves_no_knowledge() {
    let mut buffer = GossipBuffer::new(GossipConfig::for_testing());
    let candidates: Vec<_> = (10..16).map(|id| rec(id, id as f64)).collect();
    buffer.buffer_for(PeerId(1), &candidates);

    assert_eq!(buffer.known_by(PeerId(1), PeerId(10)), None);
    buffer.drain_to(&[PeerId(1)]);
    assert_eq!(buffer.known_by(PeerId(1), PeerId(10)), None);
    assert_eq!(buffer.known_by(PeerId(1), PeerId(15)), Some(Timestamp::new(15.0)));
    assert_eq!(buffer.buffer_for(PeerId(1), &[rec(10, 10.0)]), 1);
}

#[test]
fn test_drain_to_marks_every_recipient() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    buffer.buffer_for(PeerId(1), &[rec(5, 3.0), rec(2, 4.0)]);

    buffer.drain_to(&[PeerId(1), PeerId(2)]);

    assert_eq!(buffer.known_by(PeerId(1), PeerId(5)), Some(Timestamp::new(3.0)));
    assert_eq!(buffer.known_by(PeerId(2), PeerId(5)), Some(Timestamp::new(3.0)));
    // A recipient is never recorded as knowing itself.
    assert_eq!(buffer.known_by(PeerId(2), PeerId(2)), None);
}

#[test]
fn test_buffer_never_tells_neighbor_about_itself() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    assert_eq!(buffer.buffer_for(PeerId(3), &[rec(3, 1.0)]), 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_mark_known_keeps_freshest() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    buffer.mark_known(PeerId(1), PeerId(9), Timestamp::new(50.0));
    buffer.mark_known(PeerId(1), PeerId(9), Timestamp::new(20.0));
    assert_eq!(buffer.known_by(PeerId(1), PeerId(9)), Some(Timestamp::new(50.0)));
}

#[test]
fn test_forget_drops_neighbor_and_address() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    buffer.mark_known(PeerId(1), PeerId(9), Timestamp::new(1.0));
    buffer.mark_known(PeerId(9), PeerId(1), Timestamp::new(1.0));

    buffer.forget(PeerId(9));

    assert!(!buffer.knows_neighbor(PeerId(9)));
    assert_eq!(buffer.known_by(PeerId(1), PeerId(9)), None);
    assert!(buffer.knows_neighbor(PeerId(1)));
}

// =============================================================================
// TEST GROUP 2: Queue Handling
// =============================================================================

#[test]
fn test_capacity_drops_oldest() {
    let mut buffer = GossipBuffer::new(GossipConfig::for_testing());
    let candidates: Vec<_> = (10..16).map(|id| rec(id, id as f64)).collect();

    buffer.buffer_for(PeerId(1), &candidates);

    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.pending().next(), Some(&rec(12, 12.0)));
}

#[test]
fn test_drain_and_clear() {
    let mut buffer = GossipBuffer::new(GossipConfig::default());
    buffer.buffer_for(PeerId(1), &[rec(5, 1.0), rec(6, 2.0)]);

    assert_eq!(buffer.drain_to(&[PeerId(1)]), vec![rec(5, 1.0), rec(6, 2.0)]);
    assert!(buffer.is_empty());

    buffer.buffer_for(PeerId(2), &[rec(5, 1.0)]);
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.known_by(PeerId(2), PeerId(5)), None);
    // Knowledge from an earlier send survives a clear.
    assert_eq!(buffer.known_by(PeerId(1), PeerId(5)), Some(Timestamp::new(1.0)));
}

#[test]
fn test_reply_to_bypasses_queue() {
    let mut buffer = GossipBuffer::new(GossipConfig::for_testing());
    buffer.buffer_for(PeerId(77), &[rec(40, 50.0)]);
    buffer.mark_known(PeerId(9), PeerId(11), Timestamp::new(11.0));
    let candidates: Vec<_> = (10..20).map(|id| rec(id, id as f64)).collect();

    let reply = buffer.reply_to(PeerId(9), &candidates);

    // Ceiling of 4 does not apply; 11 is already known.
    assert_eq!(reply.len(), 9);
    assert!(!reply.contains(&rec(11, 11.0)));
    assert!(buffer.is_empty());
    assert_eq!(buffer.known_by(PeerId(9), PeerId(19)), Some(Timestamp::new(19.0)));
    assert_eq!(buffer.known_by(PeerId(77), PeerId(40)), None);
}

#[test]
fn test_getaddr_reply_size() {
    let config = GossipConfig::default();
    // Small book: the seed floor wins.
    assert_eq!(config.getaddr_reply_size(3, 3), 2);
    assert_eq!(config.getaddr_reply_size(100, 3), 23);
    assert_eq!(config.getaddr_reply_size(20_000, 3), 2500);
    assert_eq!(config.getaddr_reply_size(0, 0), 0);
    // Floor may exceed the book.
    assert_eq!(config.getaddr_reply_size(1, 5), 4);
}

// =============================================================================
// TEST GROUP 3: Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_never_resends_known_address(
        told in prop::collection::vec((0u64..20, 0.0f64..100.0), 0..30),
        offered in prop::collection::vec((0u64..20, 0.0f64..100.0), 0..30),
    ) {
        let neighbor = PeerId(99);
        let mut buffer = GossipBuffer::new(GossipConfig { buffer_capacity: None, ..GossipConfig::default() });
        for (id, ts) in &told {
            buffer.mark_known(neighbor, PeerId(*id), Timestamp::new(*ts));
        }
        let before: Vec<_> = (0..20).map(|id| buffer.known_by(neighbor, PeerId(id))).collect();

        let candidates: Vec<_> = offered.iter().map(|(id, ts)| rec(*id, *ts)).collect();
        buffer.buffer_for(neighbor, &candidates);

        for (id, ts) in buffer.pending() {
            if let Some(known) = before[id.as_u64() as usize] {
                prop_assert!(*ts > known);
            }
        }
    }
}
