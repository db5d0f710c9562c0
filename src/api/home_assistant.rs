//! [Home Assistant](https://developers.home-assistant.io/docs/api/rest) sensor.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    api::client,
    prelude::*,
    quantity::price::KilowattHourCents,
    sink::PriceSink,
};

pub struct Api {
    client: Client,
    state_url: Url,
}

impl Api {
    /// `base_url` is the API root, for example: `http://localhost:8123/api`.
    pub fn try_new(access_token: &str, base_url: &Url, entity_id: &str) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .context("the access token is not a valid header value")?;
        authorization.set_sensitive(true);
        let client = client::builder()
            .default_headers(HeaderMap::from_iter([(AUTHORIZATION, authorization)]))
            .timeout(Duration::from_secs(10))
            .build()?;
        let mut state_url = base_url.clone();
        state_url
            .path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL"))?
            .pop_if_empty()
            .push("states")
            .push(entity_id);
        Ok(Self { client, state_url })
    }
}

#[serde_as]
#[derive(Serialize)]
struct SetStateRequest {
    #[serde_as(as = "DisplayFromStr")]
    state: f64,

    attributes: Attributes,
}

#[derive(Serialize)]
struct Attributes {
    unit_of_measurement: &'static str,
    friendly_name: &'static str,
    icon: &'static str,
}

impl From<KilowattHourCents> for SetStateRequest {
    fn from(price: KilowattHourCents) -> Self {
        Self {
            state: (price.0 * 1000.0).round() / 1000.0,
            attributes: Attributes {
                unit_of_measurement: "¢/kWh",
                friendly_name: "Electricity price",
                icon: "mdi:cash",
            },
        }
    }
}

#[async_trait]
impl PriceSink for Api {
    #[instrument(skip_all, fields(url = %self.state_url))]
    async fn publish(&self, price: Option<KilowattHourCents>) -> Result {
        let Some(price) = price else {
            warn!("the price is unavailable, leaving the sensor as is");
            return Ok(());
        };
        self.client
            .post(self.state_url.clone())
            .json(&SetStateRequest::from(price))
            .send()
            .await
            .context("failed to call Home Assistant")?
            .error_for_status()
            .context("Home Assistant refused the state")?;
        info!(%price, "updated the sensor");
        Ok(())
    }
}
