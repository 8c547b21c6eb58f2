//! # Network Properties
//!
//! Randomized runs over seeds, sizes and strategies. Whatever the draws,
//! tables and topology agree and no peer exceeds its limits.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use peer_churn::test_utils::seeded_network;
    use peer_churn::{DegreePreference, PeerConfig, PeerId, SelectionStrategy, Timestamp};

    use crate::integration::check_consistency;

    fn pick_strategy(choice: u8) -> SelectionStrategy {
        match choice % 4 {
            0 => SelectionStrategy::Uniform,
            1 => SelectionStrategy::topology_p2c(DegreePreference::Min),
            2 => SelectionStrategy::message_p2c(DegreePreference::Max),
            _ => SelectionStrategy::bubble_aware(),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_rounds_stay_consistent(
            seed in any::<u64>(),
            peers in 1usize..30,
            rounds in 1usize..8,
            choice in any::<u8>(),
        ) {
            let config = PeerConfig {
                strategy: pick_strategy(choice),
                ..PeerConfig::for_testing()
            };
            let mut network = seeded_network(3, peers, config, seed).unwrap();
            prop_assert_eq!(check_consistency(&network), Ok(()));

            for round in 1..=rounds {
                network.run_round(Timestamp::new(round as f64)).unwrap();
                prop_assert_eq!(check_consistency(&network), Ok(()));
            }
        }

        #[test]
        fn prop_leaving_cleans_up(
            seed in any::<u64>(),
            peers in 2usize..20,
            leaver_offset in any::<usize>(),
        ) {
            let mut network = seeded_network(2, peers, PeerConfig::for_testing(), seed).unwrap();
            network.run_round(Timestamp::new(1.0)).unwrap();

            let leaver = PeerId::new(2 + (leaver_offset % peers) as u64);
            let node = network.leave(leaver, Timestamp::new(2.0)).unwrap();

            prop_assert_eq!(node.connections().total(), 0);
            prop_assert!(!network.topology().peers().contains(&leaver));
            prop_assert_eq!(check_consistency(&network), Ok(()));
        }
    }
}
