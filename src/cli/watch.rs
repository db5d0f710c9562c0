use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::{
    api::{PriceSource, heartbeat},
    cli::{entsoe::EntsoeArgs, home_assistant::HomeAssistantArgs},
    poller::Poller,
    prelude::*,
    quantity::price::KilowattHourCents,
    sink::{LogSink, PriceSink, Sinks},
};

/// Polling more often gains nothing: the shortest market slot is a quarter-hour.
const MIN_REFRESH_INTERVAL_MINUTES: u64 = 15;

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    entsoe: EntsoeArgs,

    #[clap(flatten)]
    home_assistant: HomeAssistantArgs,

    /// Minutes between polls, at least 15.
    #[clap(long = "refresh-interval", env = "REFRESH_INTERVAL", default_value = "60")]
    refresh_interval_minutes: u64,

    /// Price in cents per kilowatt-hour to publish when no market price is known.
    #[clap(long = "max-price", env = "MAX_PRICE", default_value = "100")]
    max_price: KilowattHourCents,

    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    heartbeat_url: Option<Url>,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let mut sinks: Vec<Box<dyn PriceSink>> = vec![Box::new(LogSink)];
        if let Some(home_assistant) = self.home_assistant.try_new_api()? {
            sinks.push(Box::new(home_assistant));
        }
        let poller = Poller::builder()
            .maybe_source(
                self.entsoe.try_new_api()?.map(|api| Box::new(api) as Box<dyn PriceSource>),
            )
            .sink(Box::new(Sinks(sinks)))
            .fallback_price(self.max_price)
            .interval(self.refresh_interval())
            .heartbeat(heartbeat::Client::new(self.heartbeat_url.clone()))
            .build();
        let latest = poller.subscribe();
        poller.run().await?;
        if let Some(last) = *latest.borrow() {
            info!(price = %last.price, since = %last.since, "stopped with the last price");
        }
        Ok(())
    }

    fn refresh_interval(&self) -> Duration {
        let minutes = if self.refresh_interval_minutes < MIN_REFRESH_INTERVAL_MINUTES {
            warn!(
                requested = self.refresh_interval_minutes,
                minimum = MIN_REFRESH_INTERVAL_MINUTES,
                "the refresh interval is too short, using the minimum"
            );
            MIN_REFRESH_INTERVAL_MINUTES
        } else {
            self.refresh_interval_minutes
        };
        Duration::from_secs(minutes * 60)
    }
}
