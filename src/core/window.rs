use std::fmt::{Debug, Formatter};

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::core::wire::format_wire_timestamp;

/// Today and tomorrow, so that tomorrow's prices are picked up as soon as they are published.
const WINDOW_HOURS: i64 = 48;

/// Requested price window, `start < end` by construction.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct PriceWindow {
    /// Inclusive.
    pub start: DateTime<Utc>,

    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl Debug for PriceWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl PriceWindow {
    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn wire_start(self) -> String {
        format_wire_timestamp(self.start)
    }

    #[must_use]
    pub fn wire_end(self) -> String {
        format_wire_timestamp(self.end)
    }
}

/// Window starting at the UTC midnight of `now` and spanning two days.
pub fn compute_window(now: DateTime<Utc>) -> PriceWindow {
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    PriceWindow { start, end: start + TimeDelta::hours(WINDOW_HOURS) }
}
