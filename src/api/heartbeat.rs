use std::time::Duration;

use reqwest::Url;

use crate::{api::client, prelude::*};

#[derive(Clone, Default)]
pub struct Client(Option<Url>);

impl Client {
    pub const fn new(url: Option<Url>) -> Self {
        Self(url)
    }

    /// Send a heartbeat if configured, a failure is only worth a warning.
    pub async fn send(&self) {
        if let Some(url) = &self.0
            && let Err(error) = Self::send_fallible(url.clone()).await
        {
            warn!("failed to send the heartbeat: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(url: Url) -> Result {
        info!("sending a heartbeat…");
        client::try_new(Duration::from_secs(3))?.post(url).send().await?.error_for_status()?;
        Ok(())
    }
}
