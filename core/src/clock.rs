//! Wall-clock source for capture and load timestamps.
//!
//! RULE: Nothing in the save-game model reads the system time directly.
//! All "now" values flow through a Clock so tests can pin them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock. Used by the tool and by capture's default entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedClock {
    pub at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn advance_millis(&mut self, millis: i64) {
        self.at += Duration::milliseconds(millis);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Whole seconds from `start` to `now`, rounding half up.
/// Same rounding as the in-game "game stats" duration, so saved and
/// displayed durations agree. Never negative.
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
    let millis = (now - start).num_milliseconds().max(0);
    i32::try_from((millis + 500) / 1000).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    #[test]
    fn elapsed_rounds_half_up() {
        let start = at(1_700_000_000);
        let mut clock = FixedClock::new(start);

        clock.advance_millis(1_499);
        assert_eq!(elapsed_seconds(start, clock.now()), 1);

        clock.advance_millis(1);
        assert_eq!(elapsed_seconds(start, clock.now()), 2, "1500 ms rounds up");

        clock.advance_millis(3_600_000);
        assert_eq!(elapsed_seconds(start, clock.now()), 3_602);
    }

    #[test]
    fn elapsed_is_zero_when_clock_is_behind_start() {
        let start = at(1_700_000_000);
        assert_eq!(elapsed_seconds(start, at(1_699_999_000)), 0);
    }
}
