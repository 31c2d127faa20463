//! Per-relay evidence and the decay score.

use crate::clock::Timestamp;
use crate::config::HintDbConfig;
use crate::key::{HintKey, KEY_COUNT};
use crate::relays::RelaySerial;

/// Evidence that one relay is associated with one pubkey.
///
/// Holds the latest timestamp seen for each [`HintKey`], zero where the key was never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayEntry {
    pub relay: RelaySerial,
    pub timestamps: [Timestamp; KEY_COUNT],
}

impl RelayEntry {
    pub fn new(relay: RelaySerial) -> Self {
        Self {
            relay,
            timestamps: [0; KEY_COUNT],
        }
    }

    pub fn timestamp(&self, key: HintKey) -> Timestamp {
        self.timestamps.get(key.index()).copied().unwrap_or(0)
    }

    /// Newest timestamp over all keys, zero if nothing was observed.
    pub fn latest(&self) -> Timestamp {
        self.timestamps.iter().copied().max().unwrap_or(0)
    }

    /// Store `ts` for `key` if it is strictly newer. Returns whether anything changed.
    pub fn bump(&mut self, key: HintKey, ts: Timestamp) -> bool {
        match self.timestamps.get_mut(key.index()) {
            Some(slot) if *slot < ts => {
                *slot = ts;
                true
            }
            _ => false,
        }
    }

    /// Decayed, weighted sum over all observed keys.
    ///
    /// Each key contributes `base * scale / max(now + grace - ts, 1) ^ exponent`, truncated to an
    /// integer before summing.
    pub fn score(&self, now: Timestamp, config: &HintDbConfig) -> i64 {
        let horizon = now.saturating_add(config.grace_secs());
        let base_points = config.base_points.to_array();

        self.timestamps
            .iter()
            .zip(base_points)
            .filter(|(ts, _)| **ts != 0)
            .map(|(ts, base)| {
                let elapsed = horizon.saturating_sub(*ts).max(1) as f64;
                (base as f64 * config.scale / elapsed.powf(config.decay_exponent)) as i64
            })
            .fold(0i64, i64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000;

    fn entry_with(key: HintKey, ts: Timestamp) -> RelayEntry {
        let mut entry = RelayEntry::new(RelaySerial(0));
        entry.bump(key, ts);
        entry
    }

    #[test]
    fn test_empty_entry_scores_zero() {
        let entry = RelayEntry::new(RelaySerial(3));
        assert_eq!(entry.score(NOW, &HintDbConfig::default()), 0);
    }

    #[test]
    fn test_bump_only_newer() {
        let mut entry = RelayEntry::new(RelaySerial(0));
        assert!(entry.bump(HintKey::LastInHint, 500));
        assert!(!entry.bump(HintKey::LastInHint, 500));
        assert!(!entry.bump(HintKey::LastInHint, 300));
        assert_eq!(entry.timestamp(HintKey::LastInHint), 500);

        assert!(entry.bump(HintKey::LastInHint, 501));
        assert_eq!(entry.timestamp(HintKey::LastInHint), 501);
        assert_eq!(entry.timestamp(HintKey::LastInRelayList), 0);
    }

    #[test]
    fn test_latest() {
        let mut entry = RelayEntry::new(RelaySerial(0));
        assert_eq!(entry.latest(), 0);
        entry.bump(HintKey::LastInRelayList, 200);
        entry.bump(HintKey::LastInHint, 700);
        entry.bump(HintKey::LastFetchAttempt, 100);
        assert_eq!(entry.latest(), 700);
    }

    #[test]
    fn test_score_known_value() {
        let config = HintDbConfig::default();
        let entry = entry_with(HintKey::MostRecentEventFetched, NOW);

        // Evidence from right now is a full grace period old.
        let expected = (700.0 * 1e10 / 86_400f64.powf(1.3)) as i64;
        assert_eq!(entry.score(NOW, &config), expected);
        assert!(expected > 0);
    }

    #[test]
    fn test_score_decays_with_age() {
        let config = HintDbConfig::default();
        let mut previous = i64::MAX;
        for age in [0, 60, 3_600, 86_400, 30 * 86_400, 365 * 86_400] {
            let score = entry_with(HintKey::LastInRelayList, NOW - age).score(NOW, &config);
            assert!(score < previous, "score at age {age} should be lower");
            previous = score;
        }
    }

    #[test]
    fn test_score_is_sum_of_keys() {
        let config = HintDbConfig::default();
        let mut both = RelayEntry::new(RelaySerial(0));
        both.bump(HintKey::LastInRelayList, NOW - 100);
        both.bump(HintKey::LastInHint, NOW - 5_000);

        let a = entry_with(HintKey::LastInRelayList, NOW - 100).score(NOW, &config);
        let b = entry_with(HintKey::LastInHint, NOW - 5_000).score(NOW, &config);
        assert_eq!(both.score(NOW, &config), a + b);
    }

    #[test]
    fn test_heavier_key_wins_at_equal_age() {
        let config = HintDbConfig::default();
        let fetched = entry_with(HintKey::MostRecentEventFetched, NOW - 10).score(NOW, &config);
        let hinted = entry_with(HintKey::LastInHint, NOW - 10).score(NOW, &config);
        assert!(fetched > hinted);
    }

    #[test]
    fn test_elapsed_floor() {
        // Without a grace period, evidence from "now" hits the one-second floor.
        let config = HintDbConfig::default().with_grace_period(web_time::Duration::ZERO);
        let entry = entry_with(HintKey::LastInHint, NOW);
        assert_eq!(entry.score(NOW, &config), 20 * 10_000_000_000);

        // Evidence from the future behaves the same as evidence from now.
        assert_eq!(entry.score(NOW - 10, &config), 20 * 10_000_000_000);
    }
}
