use chrono::{DateTime, Utc};

use crate::{core::slot::TimeSlot, quantity::price::KilowattHourCents};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Availability {
    /// Resolved from the market prices.
    Live,

    /// No slot covers the moment, the configured fallback is in effect.
    NoData,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct CurrentPrice {
    pub price: KilowattHourCents,
    pub since: DateTime<Utc>,
    pub availability: Availability,
}

impl CurrentPrice {
    pub const fn no_data(fallback: KilowattHourCents, now: DateTime<Utc>) -> Self {
        Self { price: fallback, since: now, availability: Availability::NoData }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.availability == Availability::Live
    }
}

/// Select the price in effect at `now` from the chronologically sorted slots.
///
/// The last slot is open-ended. When several slots share the start, the last one wins.
/// Without a slot started at or before `now`, the fallback is returned as [`Availability::NoData`].
pub fn resolve_current(
    slots: &[TimeSlot],
    now: DateTime<Utc>,
    fallback: KilowattHourCents,
) -> CurrentPrice {
    debug_assert!(slots.is_sorted_by_key(|slot| slot.start));
    let n_started = slots.partition_point(|slot| slot.start <= now);
    match n_started.checked_sub(1).and_then(|index| slots.get(index)) {
        Some(slot) => CurrentPrice {
            price: slot.price.into(),
            since: slot.start,
            availability: Availability::Live,
        },
        None => CurrentPrice::no_data(fallback, now),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::quantity::price::MegawattHourPrice;

    const FALLBACK: KilowattHourCents = KilowattHourCents(100.0);

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, hour, minute, 0).unwrap()
    }

    fn hourly(prices: &[f64]) -> Vec<TimeSlot> {
        (0..)
            .zip(prices)
            .map(|(hour, price)| TimeSlot::new(at(hour, 0), MegawattHourPrice(*price)))
            .collect()
    }

    #[test]
    fn test_empty_falls_back() {
        let now = at(12, 34);
        assert_eq!(resolve_current(&[], now, FALLBACK), CurrentPrice::no_data(FALLBACK, now));
        assert!(!resolve_current(&[], now, FALLBACK).is_live());
    }

    #[test]
    fn test_before_first_slot_falls_back() {
        let slots = hourly(&[50.0]);
        let now = at(0, 0) - TimeDelta::seconds(1);
        assert_eq!(resolve_current(&slots, now, FALLBACK).availability, Availability::NoData);
    }

    #[test]
    fn test_inside_slot() {
        let slots = hourly(&[50.0, 45.5]);
        let current = resolve_current(&slots, at(1, 30), FALLBACK);
        assert!(current.is_live());
        assert_eq!(current.since, at(1, 0));
        assert_abs_diff_eq!(current.price.0, 4.55);
    }

    #[test]
    fn test_on_slot_boundaries() {
        let slots = hourly(&[10.0, 20.0, 30.0]);
        for (index, slot) in slots.iter().enumerate() {
            let current = resolve_current(&slots, slot.start, FALLBACK);
            assert_eq!(current.since, slot.start, "slot #{index}");
            let just_before =
                resolve_current(&slots, slot.start - TimeDelta::nanoseconds(1), FALLBACK);
            assert_ne!(just_before.since, slot.start, "slot #{index}");
        }
    }

    #[test]
    fn test_after_last_slot_open_ended() {
        let slots = hourly(&[10.0, 20.0, 30.0]);
        let current = resolve_current(&slots, at(2, 0) + TimeDelta::days(3), FALLBACK);
        assert_eq!(current.since, at(2, 0));
        assert_abs_diff_eq!(current.price.0, 3.0);
    }

    #[test]
    fn test_each_instant_in_its_slot() {
        let slots = hourly(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut now = at(0, 0);
        while now < at(6, 0) {
            let current = resolve_current(&slots, now, FALLBACK);
            let expected = slots.iter().rev().find(|slot| slot.start <= now).unwrap();
            assert_eq!(current.since, expected.start);
            assert_eq!(current.price, KilowattHourCents::from(expected.price));
            now += TimeDelta::minutes(7);
        }
    }

    #[test]
    fn test_duplicate_starts_last_wins() {
        let slots = vec![
            TimeSlot::new(at(0, 0), MegawattHourPrice(10.0)),
            TimeSlot::new(at(0, 0), MegawattHourPrice(20.0)),
        ];
        assert_abs_diff_eq!(resolve_current(&slots, at(0, 30), FALLBACK).price.0, 2.0);
    }
}
