//! # Peer-Churn Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Address book | observe + prune at the 2500 record capacity |
//! | Gossip buffer | suppression against a neighbor's knowledge |
//! | Simulated network | one full round at growing network sizes |

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};

use peer_churn::test_utils::seeded_network;
use peer_churn::{
    AddressBook, AddressBookConfig, AddressRecord, GossipBuffer, GossipConfig, PeerConfig, PeerId,
    Timestamp,
};

// ============================================================================
// Address Book
// ============================================================================

fn bench_address_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("address-book");
    let seeds = [PeerId::new(0), PeerId::new(1), PeerId::new(2)];

    group.bench_function("observe_and_prune_at_capacity", |b| {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut book = AddressBook::new(
            PeerId::new(u64::MAX),
            &seeds,
            Timestamp::ZERO,
            AddressBookConfig::default(),
        );
        let mut next = 3u64;
        b.iter(|| {
            book.observe(PeerId::new(next), Timestamp::new(rng.gen_range(0.0..1000.0)));
            next += 1;
            black_box(book.prune(|_| false));
        })
    });

    group.finish();
}

// ============================================================================
// Gossip Buffer
// ============================================================================

fn bench_gossip_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("gossip-buffer");

    for size in [10usize, 100, 1000] {
        let records: Vec<AddressRecord> = (0..size as u64)
            .map(|id| (PeerId::new(id + 10), Timestamp::new(id as f64)))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("buffer_for", size), &records, |b, records| {
            b.iter(|| {
                let mut buffer = GossipBuffer::new(GossipConfig::default());
                black_box(buffer.buffer_for(PeerId::new(1), records));
                black_box(buffer.buffer_for(PeerId::new(1), records));
            })
        });
    }

    group.finish();
}

// ============================================================================
// Simulated Network
// ============================================================================

fn bench_network_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulated-network");
    group.measurement_time(Duration::from_secs(10));

    for peers in [50usize, 200] {
        group.throughput(Throughput::Elements(peers as u64));
        group.bench_with_input(BenchmarkId::new("run_round", peers), &peers, |b, &peers| {
            let mut network = seeded_network(3, peers, PeerConfig::default(), 7)
                .unwrap_or_else(|e| panic!("network setup failed: {e}"));
            let mut now = 0.0;
            b.iter(|| {
                now += 1.0;
                black_box(network.run_round(Timestamp::new(now)).ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_address_book, bench_gossip_buffer, bench_network_round);
criterion_main!(benches);
