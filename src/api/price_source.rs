use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    core::{PriceDocument, PriceWindow, TimeSlot, compute_window, parse_document},
    prelude::*,
};

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch and flatten all slots of today and tomorrow.
    #[instrument(skip_all, fields(now = %now))]
    async fn get_slots(&self, now: DateTime<Utc>) -> Result<Vec<TimeSlot>> {
        let window = compute_window(now);
        let document = self.fetch_document(window).await?;
        Ok(parse_document(document))
    }

    async fn fetch_document(&self, window: PriceWindow) -> Result<PriceDocument>;
}
