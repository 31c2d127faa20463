//! Hints database trait and implementations.

mod memory;
mod report;

use auto_impl::auto_impl;
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::key::{HintKey, KEY_COUNT};

pub use memory::{HintDbStats, MemoryHintDb};
pub use report::{PubkeyReport, ScoreLine, ScoresReport};

/// Store of relay hints per pubkey, with auto-impl for &, Box, Arc.
///
/// Hints are advisory. Implementations never fail: unknown pubkeys yield empty results, future
/// timestamps are clamped to now and stale timestamps are ignored.
#[auto_impl(&, Box, Arc)]
pub trait HintsDb: Send + Sync {
    /// Record that `relay` is associated with `pubkey` through `key` as of `ts`.
    fn save(&self, pubkey: &str, relay: &str, key: HintKey, ts: Timestamp);

    /// Up to `n` relay URLs for `pubkey`, best first.
    fn top_n(&self, pubkey: &str, n: usize) -> Vec<String>;

    /// Up to `n` ranked entries for `pubkey` with their timestamps and scores.
    fn detailed_scores(&self, pubkey: &str, n: usize) -> Vec<RelayScores>;

    /// Dump every pubkey's relay list, in its current order, to the log.
    fn print_scores(&self);
}

/// A ranked relay with the evidence behind its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayScores {
    pub relay: String,
    /// Latest timestamp per [`HintKey`], in slot order.
    pub scores: [Timestamp; KEY_COUNT],
    pub sum: i64,
}

impl RelayScores {
    pub fn timestamp(&self, key: HintKey) -> Timestamp {
        self.scores.get(key.index()).copied().unwrap_or(0)
    }
}
