//! Hint database metrics

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::{Counter, Gauge};

/// Label distinguishing databases that live in the same process.
const INSTANCE_LABEL: &str = "instance";

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// Hint database metrics, labelled per database instance
#[derive(Clone, Debug)]
pub(crate) struct HintDbMetrics {
    /// Number of saves that created or updated an entry
    pub(crate) saves_applied_total: Counter,
    /// Number of saves dropped because a newer timestamp was already stored
    pub(crate) saves_stale_total: Counter,
    /// Number of saves whose timestamp was in the future
    pub(crate) future_timestamps_total: Counter,
    /// Number of top-n and detailed score queries
    pub(crate) queries_total: Counter,
    /// Number of interned relay URLs
    pub(crate) relays: Gauge,
    /// Number of tracked pubkeys
    pub(crate) pubkeys: Gauge,
}

impl Default for HintDbMetrics {
    fn default() -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed).to_string();
        Self {
            saves_applied_total: metrics::counter!(
                "hints.saves.applied_total",
                INSTANCE_LABEL => instance.clone()
            ),
            saves_stale_total: metrics::counter!(
                "hints.saves.stale_total",
                INSTANCE_LABEL => instance.clone()
            ),
            future_timestamps_total: metrics::counter!(
                "hints.saves.future_timestamps_total",
                INSTANCE_LABEL => instance.clone()
            ),
            queries_total: metrics::counter!("hints.queries_total", INSTANCE_LABEL => instance.clone()),
            relays: metrics::gauge!("hints.relays", INSTANCE_LABEL => instance.clone()),
            pubkeys: metrics::gauge!("hints.pubkeys", INSTANCE_LABEL => instance),
        }
    }
}
