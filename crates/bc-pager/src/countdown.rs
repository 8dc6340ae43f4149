//! Time left until a deadline, for the header of the client

use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Remaining time from `now` to `deadline`, `None` once the deadline passed
pub fn countdown(now: DateTime<Utc>, deadline: DateTime<Utc>) -> Option<Countdown> {
    let remaining = (deadline - now).num_seconds();
    if remaining <= 0 {
        return None;
    }

    Some(Countdown {
        days: remaining / 86_400,
        hours: remaining % 86_400 / 3_600,
        minutes: remaining % 3_600 / 60,
        seconds: remaining % 60,
    })
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{:02}h {:02}m {:02}s", self.hours, self.minutes, self.seconds)
    }
}
