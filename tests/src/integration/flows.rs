//! # Protocol Flows
//!
//! Hand-driven handshakes between builder peers, and bootstrap and gossip
//! flows over a simulated network.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use peer_churn::test_utils::{envelope, seeded_network, PeerBuilder};
    use peer_churn::{
        DegreePreference, EmptyTopology, Intent, NetworkConfig, PeerAgent, PeerConfig, PeerId,
        SelectionStrategy, SimulatedNetwork, StdRandomSource, Timestamp, TomlConfigProvider,
    };

    use crate::integration::{assert_consistent, connected_seeds, init_tracing};

    // =============================================================================
    // TEST GROUP 1: Hand-Driven Handshakes
    // =============================================================================

    #[test]
    fn test_three_message_handshake_between_builder_peers() {
        init_tracing();
        let mut alice = PeerBuilder::new(10).build();
        let mut bob = PeerBuilder::new(11).build();

        let accepted = bob
            .receive(Timestamp::new(1.0), envelope(10, 11, 1.0, Intent::ConnectRequest))
            .unwrap();
        assert_eq!(accepted.intent, Intent::ConnectAccepted);

        let done = alice.receive(Timestamp::new(1.0), accepted).unwrap();
        assert_eq!(done.intent, Intent::ConnectDone);
        assert_eq!(done.receiver, PeerId::new(11));

        let last = bob.receive(Timestamp::new(1.0), done).unwrap();
        assert!(last.is_inert());

        assert_eq!(alice.outbound_peers(), vec![PeerId::new(11)]);
        assert_eq!(bob.inbound_peers(), vec![PeerId::new(10)]);
    }

    #[test]
    fn test_teardown_between_builder_peers() {
        let mut alice = PeerBuilder::new(10).build();
        let mut bob = PeerBuilder::new(11).build();
        let accepted = bob
            .receive(Timestamp::ZERO, envelope(10, 11, 0.0, Intent::ConnectRequest))
            .unwrap();
        let done = alice.receive(Timestamp::ZERO, accepted).unwrap();
        bob.receive(Timestamp::ZERO, done).unwrap();

        let kills = alice.go_offline(Timestamp::new(5.0));
        assert_eq!(kills.len(), 1);
        let killed = bob.receive(Timestamp::new(5.0), kills[0].clone()).unwrap();
        assert_eq!(killed.intent, Intent::Killed);
        alice.receive(Timestamp::new(5.0), killed).unwrap();

        assert_eq!(alice.connection_count(), 0);
        assert_eq!(bob.connection_count(), 0);
    }

    #[test]
    fn test_first_tick_targets_a_known_address() {
        let mut peer = PeerBuilder::new(10).seeds(&[0, 1]).build();

        let envelopes = peer.tick(Timestamp::ZERO, &EmptyTopology);

        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].intent, Intent::ConnectRequest);
        assert!(envelopes[0].receiver.as_u64() < 2);
    }

    // =============================================================================
    // TEST GROUP 2: Bootstrap and Gossip
    // =============================================================================

    #[test]
    fn test_late_joiner_learns_beyond_seeds() {
        init_tracing();
        let network = seeded_network(3, 40, PeerConfig::default(), 5).unwrap();

        let last = network.peer(PeerId::new(42)).unwrap();
        assert!(last.known_addresses().len() > 3);
        assert!(connected_seeds(&network) > 0);
        assert_consistent(&network);
    }

    #[test]
    fn test_gossip_spreads_over_rounds() {
        let mut network = seeded_network(3, 30, PeerConfig::default(), 9).unwrap();
        let before: usize = network
            .peer_ids()
            .iter()
            .filter_map(|id| network.peer(*id))
            .map(|peer| peer.known_addresses().len())
            .sum();

        for round in 1..=10 {
            network.run_round(Timestamp::new(round as f64)).unwrap();
        }

        let after: usize = network
            .peer_ids()
            .iter()
            .filter_map(|id| network.peer(*id))
            .map(|peer| peer.known_addresses().len())
            .sum();
        assert!(after >= before);
        assert_consistent(&network);
    }

    #[test]
    fn test_message_probes_settle_into_connections() {
        init_tracing();
        let config = PeerConfig::with_strategy(SelectionStrategy::message_p2c(DegreePreference::Min));
        let mut network = seeded_network(3, 20, config, 17).unwrap();

        for round in 1..=5 {
            network.run_round(Timestamp::new(round as f64)).unwrap();
            assert_consistent(&network);
        }

        assert!(network.totals().connections_made >= 20);
    }

    #[test]
    fn test_network_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "seed_count = 4\n\n[peer.limits]\nmax_outbound = 2\nmax_total = 4\n\n[peer.strategy]\nkind = \"power_of_two\"\nprobe = \"topology\"\npreference = \"max\""
        )
        .unwrap();
        let provider = TomlConfigProvider::load(file.path()).unwrap();

        let mut network = SimulatedNetwork::from_provider(
            &provider,
            Arc::new(StdRandomSource::seeded(3)),
            Timestamp::ZERO,
        );
        for _ in 0..12 {
            network.join(Timestamp::ZERO).unwrap();
        }
        network.run_round(Timestamp::new(1.0)).unwrap();

        assert_eq!(network.seeds().len(), 4);
        for id in network.peer_ids() {
            assert!(network.peer(id).unwrap().connection_count() <= 4);
        }
        assert_consistent(&network);
        assert_eq!(provider.network_config().seed_count, 4);
        assert_ne!(provider.network_config(), &NetworkConfig::default());
    }
}
