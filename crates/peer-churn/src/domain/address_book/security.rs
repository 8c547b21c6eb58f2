//! Address staleness policy.
//!
//! Decides whether a gossiped record is implausible. Kept apart from the
//! storage so the rules can be audited on their own.

use super::config::AddressBookConfig;
use crate::domain::Timestamp;

/// Whether a record last known good at `ts` is terrible at `now`.
///
/// Checked in this order:
/// 1. further than `future_tolerance_secs` ahead of `now` → terrible
/// 2. within `recent_grace_secs` before `now` (or ahead of it) → never terrible
/// 3. older than `horizon_secs` → terrible
///
/// The future check comes before the grace window, so a record just past
/// the tolerance is terrible even though it is also recent. Addrman
/// variants that test the grace window first would keep it.
pub fn is_terrible_at(ts: Timestamp, now: Timestamp, config: &AddressBookConfig) -> bool {
    if ts > now.add_secs(config.future_tolerance_secs) {
        return true;
    }
    if ts >= now.sub_secs(config.recent_grace_secs) {
        return false;
    }
    now.secs_since(ts) > config.horizon_secs
}

/// Timestamp a condemned record is forced to.
pub fn condemned_timestamp(now: Timestamp, config: &AddressBookConfig) -> Timestamp {
    now.sub_secs(config.condemn_penalty_secs)
}
