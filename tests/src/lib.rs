//! # Peer-Churn Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks
//! └── src/integration/  # Multi-peer flows over the simulated network
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p peer-churn-tests
//!
//! # With protocol logs
//! RUST_LOG=peer_churn=debug cargo test -p peer-churn-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p peer-churn-tests
//! ```

pub mod integration;
