//! Wall-clock source for clamping and decay.

use std::sync::atomic::{AtomicU64, Ordering};

use auto_impl::auto_impl;
use web_time::{SystemTime, UNIX_EPOCH};

/// Unix timestamp in seconds. Zero means "never".
pub type Timestamp = u64;

/// Source of the current time.
#[auto_impl(&, Box, Arc)]
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::Relaxed);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::Relaxed)
    }
}
