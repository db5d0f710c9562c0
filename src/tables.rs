use chrono::{DateTime, Local, Utc};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::TimeSlot,
    quantity::price::{KilowattHourCents, MegawattHourPrice},
};

/// Diagnostic table of the slots, `current` being highlighted.
#[must_use]
pub fn build_slots_table(slots: &[TimeSlot], current: Option<DateTime<Utc>>) -> Table {
    let mean_price = if slots.is_empty() {
        MegawattHourPrice::ZERO
    } else {
        #[expect(clippy::cast_precision_loss)]
        let n_slots = slots.len() as f64;
        MegawattHourPrice(slots.iter().map(|slot| slot.price.0).sum::<f64>() / n_slots)
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Start", "UTC", "Market", "Sensor"]);
    for slot in slots {
        let local_start = slot.start.with_timezone(&Local);
        let mut start = Cell::new(local_start.format("%H:%M"));
        if Some(slot.start) == current {
            start = start.add_attribute(Attribute::Bold).fg(Color::Cyan);
        }
        table.add_row(vec![
            Cell::new(local_start.format("%b %d")).add_attribute(Attribute::Dim),
            start,
            Cell::new(slot.start.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(slot.price).set_alignment(CellAlignment::Right).fg(
                if slot.price >= mean_price { Color::Red } else { Color::Green },
            ),
            Cell::new(KilowattHourCents::from(slot.price)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
