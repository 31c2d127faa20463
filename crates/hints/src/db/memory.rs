//! In-memory hints database (does not persist across restarts).

use std::cmp::Reverse;

use hashlink::LinkedHashMap;
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::clock::{Clock, SystemClock, Timestamp};
use crate::config::HintDbConfig;
use crate::entry::RelayEntry;
use crate::error::ConfigError;
use crate::key::HintKey;
use crate::metrics::HintDbMetrics;
use crate::relays::RelayTable;

use super::report::{PubkeyReport, ScoreLine, ScoresReport};
use super::{HintsDb, RelayScores};

/// Relay table and per-pubkey entries, always locked together.
#[derive(Debug, Default)]
struct HintState {
    relays: RelayTable,
    /// Entries keep insertion order until the next ranking query reorders them.
    by_pubkey: LinkedHashMap<String, Vec<RelayEntry>>,
}

/// Statistics about the hints database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintDbStats {
    /// Number of pubkeys with at least one entry.
    pub pubkeys: usize,
    /// Number of interned relay URLs.
    pub relays: usize,
    /// Number of (pubkey, relay) entries.
    pub entries: usize,
}

/// Hints database held entirely in memory.
///
/// A single mutex covers both relay interning and the per-pubkey entries, so a relay seen for the
/// first time by two threads at once still gets exactly one serial. Critical sections are a hash
/// lookup, a scan over one pubkey's relays and at most one sort.
pub struct MemoryHintDb<C: Clock = SystemClock> {
    config: HintDbConfig,
    clock: C,
    state: Mutex<HintState>,
    metrics: HintDbMetrics,
}

impl MemoryHintDb<SystemClock> {
    /// Create an empty database with default config and the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty database with custom configuration.
    pub fn try_with_config(config: HintDbConfig) -> Result<Self, ConfigError> {
        Self::try_with_clock_and_config(SystemClock, config)
    }
}

impl Default for MemoryHintDb<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryHintDb<C> {
    /// Create an empty database with default config and a custom clock.
    pub fn with_clock(clock: C) -> Self {
        Self::build(clock, HintDbConfig::default())
    }

    pub fn try_with_clock_and_config(clock: C, config: HintDbConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(clock, config))
    }

    fn build(clock: C, config: HintDbConfig) -> Self {
        Self {
            config,
            clock,
            state: Mutex::new(HintState::default()),
            metrics: HintDbMetrics::default(),
        }
    }

    pub fn config(&self) -> &HintDbConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stats(&self) -> HintDbStats {
        let state = self.state.lock();
        HintDbStats {
            pubkeys: state.by_pubkey.len(),
            relays: state.relays.len(),
            entries: state.by_pubkey.values().map(Vec::len).sum(),
        }
    }

    /// Snapshot of every pubkey's relays in their current order, scored as of now.
    ///
    /// Does not re-rank; the order is whatever the last query or insertion left.
    /// [`print_scores`](HintsDb::print_scores) logs this report's `Display` rendering.
    pub fn scores_report(&self) -> ScoresReport {
        let now = self.clock.now();
        let state = self.state.lock();

        let pubkeys = state
            .by_pubkey
            .iter()
            .map(|(pubkey, entries)| PubkeyReport {
                pubkey: pubkey.clone(),
                relays: entries
                    .iter()
                    .enumerate()
                    .map(|(rank, entry)| ScoreLine {
                        rank,
                        relay: state.relays.url(entry.relay).unwrap_or_default().to_owned(),
                        serial: entry.relay,
                        score: entry.score(now, &self.config),
                    })
                    .collect(),
            })
            .collect();

        ScoresReport { pubkeys }
    }

    /// Rank `pubkey`'s entries in place and hand the top `n` to `f`.
    fn with_ranked<T>(
        &self,
        pubkey: &str,
        n: usize,
        f: impl FnOnce(&RelayTable, &[RelayEntry], Timestamp) -> Vec<T>,
    ) -> Vec<T> {
        self.metrics.queries_total.increment(1);
        let now = self.clock.now();

        let mut state = self.state.lock();
        let HintState { relays, by_pubkey } = &mut *state;
        let Some(entries) = by_pubkey.get_mut(pubkey) else {
            return Vec::new();
        };

        // Highest score first. Scores truncate, so old evidence often ties: the newest sighting
        // breaks those, then the relay interned first.
        entries.sort_by_cached_key(|entry| {
            (
                Reverse(entry.score(now, &self.config)),
                Reverse(entry.latest()),
                entry.relay,
            )
        });

        let top = entries.get(..n.min(entries.len())).unwrap_or_default();
        f(relays, top, now)
    }
}

impl<C: Clock> HintsDb for MemoryHintDb<C> {
    fn save(&self, pubkey: &str, relay: &str, key: HintKey, ts: Timestamp) {
        let now = self.clock.now();
        let ts = if ts > now {
            self.metrics.future_timestamps_total.increment(1);
            now
        } else {
            ts
        };

        let mut state = self.state.lock();
        let HintState { relays, by_pubkey } = &mut *state;

        let (serial, interned) = relays.intern(relay);
        if interned {
            debug!(relay, %serial, "interned new relay");
            self.metrics.relays.set(relays.len() as f64);
        }

        if !by_pubkey.contains_key(pubkey) {
            debug!(pubkey, "tracking new pubkey");
            by_pubkey.insert(pubkey.to_owned(), Vec::new());
            self.metrics.pubkeys.set(by_pubkey.len() as f64);
        }
        let Some(entries) = by_pubkey.get_mut(pubkey) else {
            return;
        };

        match entries.iter_mut().find(|entry| entry.relay == serial) {
            Some(entry) => {
                if !entry.bump(key, ts) {
                    trace!(pubkey, relay, %key, ts, "ignoring stale hint");
                    self.metrics.saves_stale_total.increment(1);
                    return;
                }
                trace!(pubkey, relay, %key, ts, "updated hint");
            }
            None => {
                let mut entry = RelayEntry::new(serial);
                entry.bump(key, ts);
                entries.push(entry);
                trace!(pubkey, relay, %key, ts, "added hint");
            }
        }
        self.metrics.saves_applied_total.increment(1);
    }

    fn top_n(&self, pubkey: &str, n: usize) -> Vec<String> {
        self.with_ranked(pubkey, n, |relays, top, _| {
            top.iter()
                .filter_map(|entry| relays.url(entry.relay))
                .map(str::to_owned)
                .collect()
        })
    }

    fn detailed_scores(&self, pubkey: &str, n: usize) -> Vec<RelayScores> {
        self.with_ranked(pubkey, n, |relays, top, now| {
            top.iter()
                .filter_map(|entry| {
                    Some(RelayScores {
                        relay: relays.url(entry.relay)?.to_owned(),
                        scores: entry.timestamps,
                        sum: entry.score(now, &self.config),
                    })
                })
                .collect()
        })
    }

    fn print_scores(&self) {
        let report = self.scores_report();
        info!(pubkeys = report.pubkeys.len(), "hint database contents");
        for line in report.to_string().lines() {
            info!("{line}");
        }
    }
}
