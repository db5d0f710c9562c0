use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    core::{
        document::{Period, Point, PriceDocument, as_list},
        slot::TimeSlot,
        wire::parse_instant,
    },
    prelude::*,
    quantity::price::MegawattHourPrice,
};

/// Duration covered by a single point.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    QuarterHourly,
    Hourly,
}

impl Resolution {
    /// Unknown and missing codes fall back to hourly.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("PT15M") => Self::QuarterHourly,
            _ => Self::Hourly,
        }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        match self {
            Self::QuarterHourly => TimeDelta::minutes(15),
            Self::Hourly => TimeDelta::hours(1),
        }
    }
}

/// Flatten the document into a chronological price series.
///
/// Never fails: malformed parts are skipped or defaulted and reported in the log.
/// Slots sharing the same start are kept in document order.
#[instrument(skip_all)]
pub fn parse_document(document: PriceDocument) -> Vec<TimeSlot> {
    let Some(series) = document.series else {
        let reason = document.reason.unwrap_or_default();
        warn!(
            code = reason.code.as_deref(),
            reason = reason.text.as_deref(),
            "the document contains no time series"
        );
        return Vec::new();
    };

    let mut slots = Vec::new();
    for (series_index, series) in series.into_vec().into_iter().enumerate() {
        for (period_index, period) in as_list(series.periods).into_iter().enumerate() {
            let Some(period_start) = period.start() else {
                warn!(series_index, period_index, "skipping the period without a valid start");
                continue;
            };
            let resolution = Resolution::from_code(period.resolution.as_deref());
            trace!(series_index, period_index, %period_start, ?resolution, "flattening…");
            for point in as_list(period.points) {
                let offset = resolution.duration() * point.offset();
                let Some(start) = period_start.checked_add_signed(offset) else {
                    warn!(
                        series_index,
                        period_index,
                        position = point.position.as_deref(),
                        "point is out of range"
                    );
                    continue;
                };
                let price = MegawattHourPrice::parse_or_zero(point.amount.as_deref());
                slots.push(TimeSlot::new(start, price));
            }
        }
    }

    slots.sort_by_key(|slot| slot.start);
    debug!(n_slots = slots.len(), "parsed");
    slots
}

impl Period {
    fn start(&self) -> Option<DateTime<Utc>> {
        self.time_interval.as_ref()?.start.as_deref().and_then(parse_instant)
    }
}

impl Point {
    /// 0-based offset from the period start, in points.
    fn offset(&self) -> i32 {
        self.position
            .as_deref()
            .and_then(|position| position.trim().parse::<i32>().ok())
            .filter(|position| *position >= 1)
            .unwrap_or(1)
            - 1
    }
}
