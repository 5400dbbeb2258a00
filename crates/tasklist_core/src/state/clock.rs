//! Time sources for id generation.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the current time in Unix epoch milliseconds.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // Clock before the epoch degrades to 0; the id generator still
        // stays monotonic via its floor.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Manually driven clock for deterministic callers.
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ms: Cell<i64>,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_epoch_ms(&self) -> i64 {
        (**self).now_epoch_ms()
    }
}
