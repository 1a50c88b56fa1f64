//! Wall-clock source for operations that look back from "now".

use chrono::{DateTime, Utc};

/// Supplies the current time.
///
/// Any `Fn() -> DateTime<Utc>` closure is a clock, which keeps tests able to pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
