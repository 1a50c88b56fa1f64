use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const DAY: i64 = 86_400;

/// Unix timestamps one day, two days and one week before a reference time,
/// each truncated to the start of its minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeTimestamps {
    pub one_day: i64,
    pub two_day: i64,
    pub one_week: i64,
}

impl ChangeTimestamps {
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        let now = now.timestamp();
        Self {
            one_day: start_of_minute(now - DAY),
            two_day: start_of_minute(now - 2 * DAY),
            one_week: start_of_minute(now - 7 * DAY),
        }
    }

    /// In the order one day, two days, one week.
    #[must_use]
    pub const fn as_array(&self) -> [i64; 3] {
        [self.one_day, self.two_day, self.one_week]
    }
}

#[must_use]
pub const fn start_of_minute(ts: i64) -> i64 {
    ts - ts.rem_euclid(MINUTE)
}

/// `start, start + step, ...` while the value is at most `now - step`.
///
/// Returns nothing for a non-positive `step`.
#[must_use]
pub fn hourly_timestamps(start: i64, now: i64, step: i64) -> Vec<i64> {
    if step <= 0 {
        return Vec::new();
    }
    let last = now - step;
    let mut out = Vec::new();
    let mut t = start;
    while t <= last {
        out.push(t);
        t += step;
    }
    out
}
