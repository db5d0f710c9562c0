use chrono::{DateTime, Utc};

use crate::quantity::price::MegawattHourPrice;

/// Market price valid from `start` until the next slot starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Constructor)]
#[must_use]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub price: MegawattHourPrice,
}
