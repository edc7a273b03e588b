//! Wall clock abstraction so issuance and expiry times can be pinned in tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub fn default_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests.
#[derive(Debug)]
pub struct MockClock {
    current_time: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current_time: Mutex::new(initial),
        }
    }

    /// Clock fixed at the given unix timestamp (seconds).
    ///
    /// Out-of-range timestamps fall back to the unix epoch.
    pub fn at_timestamp(secs: i64) -> Self {
        Self::new(DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH))
    }

    pub fn advance(&self, duration: TimeDelta) {
        let mut time = self.current_time.lock().unwrap_or_else(PoisonError::into_inner);
        *time = *time + duration;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current_time.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current_time.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock_advance_and_set() {
        let clock = MockClock::at_timestamp(1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);

        clock.advance(TimeDelta::seconds(45));
        assert_eq!(clock.now().timestamp(), 1_700_000_045);

        clock.set(DateTime::UNIX_EPOCH);
        assert_eq!(clock.now().timestamp(), 0);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now().timestamp() > 1_577_836_800);
    }
}
