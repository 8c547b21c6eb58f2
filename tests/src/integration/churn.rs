//! # Churn Scenarios
//!
//! Peers leave and come back while the rest keep ticking. Teardown
//! transcripts must leave no dangling connection behind.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use peer_churn::test_utils::seeded_network;
    use peer_churn::{NetworkError, PeerAgent, PeerConfig, PeerId, PeerNode, Timestamp};

    use crate::integration::{assert_consistent, init_tracing};

    #[test]
    fn test_random_leaves_and_rejoins() {
        init_tracing();
        let mut network = seeded_network(3, 40, PeerConfig::for_testing(), 23).unwrap();
        let mut picker = StdRng::seed_from_u64(99);
        let mut offline: Vec<PeerNode> = Vec::new();
        let mut now = 0.0;

        for step in 0..30 {
            now += 1.0;
            network.run_round(Timestamp::new(now)).unwrap();
            assert_consistent(&network);

            if step % 3 == 0 {
                let candidates: Vec<PeerId> = network
                    .peer_ids()
                    .into_iter()
                    .filter(|id| !network.peer(*id).is_some_and(|p| p.is_hard_coded_seed()))
                    .collect();
                let leaver = *candidates.choose(&mut picker).unwrap();
                offline.push(network.leave(leaver, Timestamp::new(now)).unwrap());
                assert_consistent(&network);
            }
            if step % 5 == 4 {
                if let Some(node) = offline.pop() {
                    network.rejoin(node, Timestamp::new(now)).unwrap();
                    assert_consistent(&network);
                }
            }
        }

        assert_eq!(network.len() + offline.len(), 43);
        for node in &offline {
            assert_eq!(node.connection_count(), 0);
        }
    }

    #[test]
    fn test_seed_departure_is_survivable() {
        let mut network = seeded_network(3, 15, PeerConfig::for_testing(), 31).unwrap();
        for round in 1..=3 {
            network.run_round(Timestamp::new(round as f64)).unwrap();
        }

        network.leave(PeerId::new(0), Timestamp::new(4.0)).unwrap();
        for round in 5..=8 {
            network.run_round(Timestamp::new(round as f64)).unwrap();
            assert_consistent(&network);
        }

        // Joiners still bootstrap through the remaining seeds.
        let id = network.join(Timestamp::new(9.0)).unwrap();
        assert!(network.peer(id).is_some());
        assert_consistent(&network);
    }

    #[test]
    fn test_double_leave_is_an_error() {
        let mut network = seeded_network(3, 5, PeerConfig::for_testing(), 1).unwrap();
        network.leave(PeerId::new(4), Timestamp::new(1.0)).unwrap();

        assert_eq!(
            network.leave(PeerId::new(4), Timestamp::new(2.0)).unwrap_err(),
            NetworkError::UnknownPeer {
                peer: PeerId::new(4)
            }
        );
    }
}
