//! Wall-clock source injected into services.
//!
//! Services never read the system time directly, so "today", greetings and
//! default reminder times stay deterministic under test.

use chrono::Utc;

/// Source of the current instant.
pub trait Clock {
    /// Current time as Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}
