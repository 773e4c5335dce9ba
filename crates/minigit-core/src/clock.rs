//! Time source for commit timestamps.

use std::cell::Cell;
use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Provides the current time to a repository.
pub trait Clock: fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that starts at a fixed instant and advances by `step` on every read.
///
/// Useful for reproducible ids. With a step of one second or more, no two
/// commits share a timestamp.
#[derive(Debug)]
pub struct SteppingClock {
    next: Cell<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// Render a timestamp the way commit ids and logs consume it,
/// e.g. `Wed Jun 30 21:49:08 1993`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%a %b %e %H:%M:%S %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stepping_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = SteppingClock::new(start, Duration::seconds(1));
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::seconds(1));
    }

    #[test]
    fn test_format_timestamp_ctime_style() {
        let ts = Utc.with_ymd_and_hms(1993, 6, 30, 21, 49, 8).unwrap();
        assert_eq!(format_timestamp(&ts), "Wed Jun 30 21:49:08 1993");

        let padded = Utc.with_ymd_and_hms(2024, 3, 5, 7, 0, 9).unwrap();
        assert_eq!(format_timestamp(&padded), "Tue Mar  5 07:00:09 2024");
    }
}
