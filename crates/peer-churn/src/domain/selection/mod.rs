//! # Peer Selection
//!
//! Picks whom to open the next outbound connection to.
//!
//! | Strategy | Candidate |
//! |----------|-----------|
//! | `Uniform` | one random book entry |
//! | `PowerOfTwo` (topology) | lower/higher degree of two draws, read from the graph |
//! | `PowerOfTwo` (messages) | two draws probed with `DegreeQuery` |
//! | `BubbleAware` | draws avoiding over-represented `id mod n` partitions |
//!
//! Every strategy builds on the same base draw, which skips seeds and
//! peers we are already connected to, and gives up after a bounded number
//! of collisions.

mod candidate;
mod probe;
mod strategy;

pub use candidate::{
    base_candidate, bubble_candidate, pick_by_degree, two_candidates, SelectionContext,
};
pub use probe::{DegreeRound, ProbeOutcome};
pub use strategy::{DegreePreference, DegreeProbe, SelectionStrategy};
