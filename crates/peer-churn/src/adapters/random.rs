//! # Random Source Adapters
//!
//! | Adapter | Use |
//! |---------|-----|
//! | `FixedRandomSource` | Tests: always the same index |
//! | `SequenceRandomSource` | Tests: replays a scripted sequence |
//! | `StdRandomSource` | Simulation runs: seeded or entropy-backed `StdRng` |

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::RandomSource;

/// Fixed random source for deterministic testing.
///
/// Always returns the same value (modulo the range), enabling reproducible tests.
///
/// # Example
///
/// ```rust
/// use peer_churn::adapters::FixedRandomSource;
/// use peer_churn::RandomSource;
///
/// let rng = FixedRandomSource::new(42);
/// assert_eq!(rng.random_usize(100), 42);
/// assert_eq!(rng.random_usize(100), 42); // Always same value
/// ```
#[derive(Debug, Clone)]
pub struct FixedRandomSource {
    value: usize,
}

impl FixedRandomSource {
    /// Create a fixed random source that always returns the given value.
    pub fn new(value: usize) -> Self {
        Self { value }
    }

    /// Create a random source that returns 0 (first element).
    pub fn first() -> Self {
        Self::new(0)
    }
}

impl RandomSource for FixedRandomSource {
    fn random_usize(&self, max: usize) -> usize {
        if max == 0 {
            0
        } else {
            self.value % max
        }
    }
}

/// Random source replaying a fixed script of values, wrapping around.
///
/// Each value is reduced modulo the requested range.
#[derive(Debug)]
pub struct SequenceRandomSource {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandomSource {
    /// Create a source replaying `values`. An empty script always yields 0.
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandomSource {
    fn random_usize(&self, max: usize) -> usize {
        if max == 0 || self.values.is_empty() {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[i] % max
    }
}

/// Production random source backed by `StdRng`.
///
/// Seed it for reproducible simulation runs, or draw the seed from OS
/// entropy.
#[derive(Debug)]
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
}

impl StdRandomSource {
    /// Create a source with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Create a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandomSource {
    fn random_usize(&self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.rng.lock().gen_range(0..max)
    }
}
