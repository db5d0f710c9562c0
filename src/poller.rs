use std::{io, pin::pin, time::Duration};

use bon::Builder;
use chrono::{DateTime, Utc};
use tokio::{
    signal,
    sync::watch,
    time::{MissedTickBehavior, interval},
};

use crate::{
    api::{PriceSource, heartbeat},
    core::{CurrentPrice, resolve_current},
    prelude::*,
    quantity::price::KilowattHourCents,
    sink::PriceSink,
};

/// Periodically resolves the current price and publishes it.
///
/// Polls run one at a time: the loop awaits each poll before waiting for the next tick,
/// and ticks missed meanwhile are skipped.
#[derive(Builder)]
pub struct Poller {
    /// `None` when there is no API key, in which case the fallback price is published.
    source: Option<Box<dyn PriceSource>>,

    sink: Box<dyn PriceSink>,

    /// Published when no market price is known.
    fallback_price: KilowattHourCents,

    #[builder(into)]
    interval: Duration,

    #[builder(default)]
    heartbeat: heartbeat::Client,

    /// Last published price: written by the poller only, read by anyone subscribed.
    #[builder(skip = watch::channel(None).0)]
    latest: watch::Sender<Option<CurrentPrice>>,
}

impl Poller {
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentPrice>> {
        self.latest.subscribe()
    }

    /// Poll until interrupted.
    pub async fn run(&self) -> Result {
        self.run_until(signal::ctrl_c()).await
    }

    /// Poll until `shutdown` completes. A poll in progress is finished first.
    pub async fn run_until(&self, shutdown: impl Future<Output = io::Result<()>>) -> Result {
        let mut shutdown = pin!(shutdown);
        let mut interval = interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                result = &mut shutdown => {
                    result.context("failed to listen for the interrupt signal")?;
                    info!("interrupted");
                    return Ok(());
                }
            }
            match self.poll(Utc::now()).await {
                Ok(current) => {
                    info!(
                        price = %current.price,
                        since = %current.since,
                        is_live = current.is_live(),
                        "polled"
                    );
                    self.heartbeat.send().await;
                }
                Err(error) => {
                    error!("failed to poll the prices, keeping the last known price: {error:#}");
                }
            }
        }
    }

    /// Resolve and publish the price at `now`.
    ///
    /// On error, the previously published price stays in effect.
    /// If nothing has been published yet, the fallback price is published first.
    #[instrument(skip_all, fields(now = %now))]
    pub async fn poll(&self, now: DateTime<Utc>) -> Result<CurrentPrice> {
        match self.resolve(now).await {
            Ok(current) => {
                self.publish(current).await;
                Ok(current)
            }
            Err(error) => {
                if self.latest.borrow().is_none() {
                    self.publish(CurrentPrice::no_data(self.fallback_price, now)).await;
                }
                Err(error)
            }
        }
    }

    async fn resolve(&self, now: DateTime<Utc>) -> Result<CurrentPrice> {
        let Some(source) = &self.source else {
            warn!("no API key configured, falling back");
            return Ok(CurrentPrice::no_data(self.fallback_price, now));
        };
        let slots = source.get_slots(now).await?;
        info!(n_slots = slots.len(), "fetched the prices");
        let current = resolve_current(&slots, now, self.fallback_price);
        if !current.is_live() {
            warn!(n_slots = slots.len(), "no price for the current moment, falling back");
        }
        Ok(current)
    }

    async fn publish(&self, current: CurrentPrice) {
        if let Err(error) = self.sink.publish(Some(current.price)).await {
            error!("failed to publish the price: {error:#}");
        }
        self.latest.send_replace(Some(current));
    }
}
