//! Selection strategy definitions.

use serde::Deserialize;

/// How a power-of-two-choice peer learns candidate degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeProbe {
    /// Read degrees straight from the shared topology.
    #[default]
    Topology,
    /// Ask both candidates with `DegreeQuery` and wait for their replies.
    Messages,
}

/// Which of two candidates a power-of-two-choice peer keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreePreference {
    /// Lower degree; ties keep the first candidate.
    #[default]
    Min,
    /// Higher degree; ties keep the first candidate.
    Max,
}

impl DegreePreference {
    /// Whether `first` wins over `second`.
    pub fn keeps_first(self, first: usize, second: usize) -> bool {
        match self {
            Self::Min => first <= second,
            Self::Max => first >= second,
        }
    }
}

/// Candidate selection strategy of a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// One base draw.
    #[default]
    Uniform,
    /// Two base draws, keep the preferred degree.
    PowerOfTwo {
        /// Where degrees come from
        #[serde(default)]
        probe: DegreeProbe,
        /// Which degree wins
        #[serde(default)]
        preference: DegreePreference,
    },
    /// Spread outbound connections over `id mod bubble_count` partitions.
    BubbleAware {
        /// Number of partitions
        #[serde(default = "default_bubble_count")]
        bubble_count: u64,
        /// Own-partition connections tolerated before redrawing
        #[serde(default = "default_same_bubble_limit")]
        same_bubble_limit: usize,
        /// Redraws before the last draw is accepted
        #[serde(default = "default_max_redraws")]
        max_redraws: usize,
    },
}

fn default_bubble_count() -> u64 {
    5
}

fn default_same_bubble_limit() -> usize {
    8
}

fn default_max_redraws() -> usize {
    40
}

impl SelectionStrategy {
    /// Bubble-aware strategy with the standard partitioning.
    pub const fn bubble_aware() -> Self {
        Self::BubbleAware {
            bubble_count: 5,
            same_bubble_limit: 8,
            max_redraws: 40,
        }
    }

    /// Power-of-two-choice reading degrees from the topology.
    pub const fn topology_p2c(preference: DegreePreference) -> Self {
        Self::PowerOfTwo {
            probe: DegreeProbe::Topology,
            preference,
        }
    }

    /// Power-of-two-choice probing degrees with messages.
    pub const fn message_p2c(preference: DegreePreference) -> Self {
        Self::PowerOfTwo {
            probe: DegreeProbe::Messages,
            preference,
        }
    }

    /// Whether connection attempts go through a degree-probe round.
    pub fn probes_with_messages(&self) -> bool {
        matches!(
            self,
            Self::PowerOfTwo {
                probe: DegreeProbe::Messages,
                ..
            }
        )
    }
}
