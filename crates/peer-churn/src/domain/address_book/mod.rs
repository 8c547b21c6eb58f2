//! # Address Book
//!
//! Per-peer record of every address heard about and when it was last known
//! good, in the spirit of Bitcoin Core's `addrman` without the bucketing.
//!
//! ## Staleness
//!
//! - Far-future records are terrible (clock skew or fabrication)
//! - Records touched in the last minute are never terrible
//! - Records older than the 30 day horizon are terrible
//!
//! Terrible records are condemned (aged to five hours ago) rather than
//! deleted, so they stay connectable but sort first for eviction.

// Semantic submodules
mod book;
mod config;
mod security;

// Re-export public API
pub use book::AddressBook;
pub use config::AddressBookConfig;
pub use security::{condemned_timestamp, is_terrible_at};
