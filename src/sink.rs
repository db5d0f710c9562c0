//! Where the current price ends up.

use async_trait::async_trait;

use crate::{prelude::*, quantity::price::KilowattHourCents};

/// Smart-home sensor accepting price readings.
#[async_trait]
pub trait PriceSink: Send + Sync {
    /// Publish the reading, `None` meaning that there is nothing to show.
    async fn publish(&self, price: Option<KilowattHourCents>) -> Result;
}

/// Sink that only writes to the log.
pub struct LogSink;

#[async_trait]
impl PriceSink for LogSink {
    async fn publish(&self, price: Option<KilowattHourCents>) -> Result {
        match price {
            Some(price) => info!(%price, "current price"),
            None => warn!("the price is unavailable, skipping"),
        }
        Ok(())
    }
}

/// Publish to each of the sinks, one failing sink does not stop the others.
pub struct Sinks(pub Vec<Box<dyn PriceSink>>);

#[async_trait]
impl PriceSink for Sinks {
    async fn publish(&self, price: Option<KilowattHourCents>) -> Result {
        let mut n_failed = 0_usize;
        for sink in &self.0 {
            if let Err(error) = sink.publish(price).await {
                error!("failed to publish the price: {error:#}");
                n_failed += 1;
            }
        }
        ensure!(n_failed == 0, "{n_failed} of {} sinks failed", self.0.len());
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Remembers everything published.
    #[derive(Clone, Default)]
    pub struct RecordingSink(pub Arc<Mutex<Vec<Option<KilowattHourCents>>>>);

    impl RecordingSink {
        pub fn published(&self) -> Vec<Option<KilowattHourCents>> {
            self.0.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PriceSink for RecordingSink {
        async fn publish(&self, price: Option<KilowattHourCents>) -> Result {
            self.0.lock().unwrap().push(price);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl PriceSink for FailingSink {
        async fn publish(&self, _price: Option<KilowattHourCents>) -> Result {
            bail!("offline")
        }
    }

    #[tokio::test]
    async fn test_log_sink_accepts_unavailable() -> Result {
        LogSink.publish(None).await?;
        LogSink.publish(Some(KilowattHourCents(4.55))).await
    }

    #[tokio::test]
    async fn test_sinks_keep_going_after_failure() {
        let recording = RecordingSink::default();
        let sinks = Sinks(vec![Box::new(FailingSink), Box::new(recording.clone())]);
        assert!(sinks.publish(Some(KilowattHourCents(1.0))).await.is_err());
        assert_eq!(recording.published(), vec![Some(KilowattHourCents(1.0))]);
    }
}
