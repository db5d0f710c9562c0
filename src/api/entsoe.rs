//! [ENTSO-E transparency platform](https://transparency.entsoe.eu) client.
//!
//! API docs: <https://transparency.entsoe.eu/content/static_content/Static%20content/web%20api/Guide.html>.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::Serialize;

use crate::{
    api::{PriceSource, client},
    core::{PriceDocument, PriceWindow},
    prelude::*,
};

/// The platform also accepts `securityToken` in the query string, but that ends up in access logs.
const SECURITY_TOKEN_HEADER: HeaderName = HeaderName::from_static("security_token");

/// What to ask the platform for.
#[derive(Clone, Debug, bon::Builder)]
pub struct Market {
    /// `A44` for the day-ahead prices.
    #[builder(into)]
    pub document_type: String,

    /// Bidding zone EIC code.
    #[builder(into)]
    pub in_domain: String,

    #[builder(into)]
    pub out_domain: String,
}

pub struct Api {
    client: Client,
    base_url: Url,
    market: Market,
}

impl Api {
    pub fn try_new(api_key: &str, base_url: Url, market: Market) -> Result<Self> {
        let mut security_token =
            HeaderValue::from_str(api_key).context("the API key is not a valid header value")?;
        security_token.set_sensitive(true);
        let client = client::builder()
            .default_headers(HeaderMap::from_iter([(SECURITY_TOKEN_HEADER, security_token)]))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, base_url, market })
    }
}

#[async_trait]
impl PriceSource for Api {
    #[instrument(skip_all, fields(window = ?window, in_domain = %self.market.in_domain))]
    async fn fetch_document(&self, window: PriceWindow) -> Result<PriceDocument> {
        info!(hours = window.duration().num_hours(), "fetching…");

        #[derive(Serialize)]
        struct Query<'a> {
            #[serde(rename = "documentType")]
            document_type: &'a str,

            #[serde(rename = "in_Domain")]
            in_domain: &'a str,

            #[serde(rename = "out_Domain")]
            out_domain: &'a str,

            #[serde(rename = "periodStart")]
            period_start: String,

            #[serde(rename = "periodEnd")]
            period_end: String,
        }

        let query = Query {
            document_type: &self.market.document_type,
            in_domain: &self.market.in_domain,
            out_domain: &self.market.out_domain,
            period_start: window.wire_start(),
            period_end: window.wire_end(),
        };
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&query)
            .send()
            .await
            .context("failed to call the transparency platform")?;
        let status = response.status();
        let body = response.text().await.context("failed to read the response body")?;
        debug!(%status, len = body.len(), "received");

        if !status.is_success() {
            // Errors come as acknowledgement documents, the reason is the only useful part.
            let reason = PriceDocument::from_xml(&body)
                .ok()
                .and_then(|document| document.reason)
                .and_then(|reason| reason.text);
            bail!(
                "the transparency platform responded with `{status}`: {}",
                reason.as_deref().unwrap_or("no reason given"),
            );
        }
        PriceDocument::from_xml(&body)
    }
}
