//! Time-based identifier source.

use chrono::{DateTime, Utc};
use tracing::warn;

/// Hands out millisecond timestamps as ids. A value is never issued twice:
/// if the clock has not moved past the last id, the next id is `last + 1`.
/// Once the counter is pinned at `i64::MAX` the raw timestamp is used again
/// and uniqueness is no longer guaranteed.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Start above every id already in use.
    pub fn seeded(max_existing: i64) -> Self {
        Self { last: max_existing }
    }

    /// Next id for something created at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        if candidate > self.last {
            self.last = candidate;
            return candidate;
        }
        match self.last.checked_add(1) {
            Some(next) => {
                self.last = next;
                next
            }
            None => {
                warn!(last = self.last, "id space exhausted, reusing clock timestamp");
                candidate
            }
        }
    }

    /// Most recent id handed out, or the seed.
    pub fn last(&self) -> i64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn uses_the_timestamp_when_it_moved_forward() {
        let mut ids = IdGenerator::default();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(ids.next(now), 1_700_000_000_000);
    }

    #[test]
    fn same_millisecond_still_increases() {
        let mut ids = IdGenerator::default();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let first = ids.next(now);
        let second = ids.next(now);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn exhausted_seed_falls_back_to_the_clock() {
        let mut ids = IdGenerator::seeded(i64::MAX);
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        assert_eq!(ids.next(now), 1_700_000_000_000);
        assert_eq!(ids.next(now), 1_700_000_000_000);
        assert_eq!(ids.last(), i64::MAX);
    }

    #[test]
    fn seed_wins_over_a_clock_behind_it() {
        let mut ids = IdGenerator::seeded(2_000_000_000_000);
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(ids.next(now), 2_000_000_000_001);
    }
}
