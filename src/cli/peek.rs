use chrono::Utc;
use clap::Parser;
use itertools::{Itertools, MinMaxResult};

use crate::{
    api::PriceSource,
    cli::entsoe::EntsoeArgs,
    core::resolve_current,
    prelude::*,
    quantity::price::KilowattHourCents,
    tables::build_slots_table,
};

#[derive(Parser)]
pub struct PeekArgs {
    #[clap(flatten)]
    entsoe: EntsoeArgs,

    /// Price in cents per kilowatt-hour to show when no market price is known.
    #[clap(long = "max-price", env = "MAX_PRICE", default_value = "100")]
    max_price: KilowattHourCents,
}

impl PeekArgs {
    pub async fn run(self) -> Result {
        let api = self.entsoe.try_new_api()?.context("peeking requires an API key")?;
        let now = Utc::now();
        let slots = api.get_slots(now).await?;
        let current = resolve_current(&slots, now, self.max_price);
        println!("{}", build_slots_table(&slots, current.is_live().then_some(current.since)));
        match slots.iter().map(|slot| slot.price).minmax() {
            MinMaxResult::NoElements => warn!("no prices published for the window"),
            MinMaxResult::OneElement(price) => info!(%price, "single price"),
            MinMaxResult::MinMax(min, max) => info!(n_slots = slots.len(), %min, %max, "range"),
        }
        info!(
            price = %current.price,
            since = %current.since,
            availability = ?current.availability,
            "current price"
        );
        Ok(())
    }
}
