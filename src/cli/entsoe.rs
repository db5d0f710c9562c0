use clap::Parser;
use reqwest::Url;

use crate::{
    api::entsoe::{Api, Market},
    prelude::*,
};

#[derive(Parser)]
pub struct EntsoeArgs {
    /// Transparency platform security token, without it only the fallback price is published.
    #[clap(long = "api-key", env = "ENTSOE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[clap(
        long = "entsoe-api-url",
        env = "ENTSOE_API_URL",
        default_value = "https://web-api.tp.entsoe.eu/api"
    )]
    pub api_url: Url,

    #[clap(long = "document-type", env = "DOCUMENT_TYPE", default_value = "A44")]
    pub document_type: String,

    /// Bidding zone EIC code.
    #[clap(long = "in-domain", env = "IN_DOMAIN", default_value = "10YNL----------L")]
    pub in_domain: String,

    /// Bidding zone EIC code, normally the same as `--in-domain`.
    #[clap(long = "out-domain", env = "OUT_DOMAIN", default_value = "10YNL----------L")]
    pub out_domain: String,
}

impl EntsoeArgs {
    /// Build the client, or `None` when the API key is missing or blank.
    pub fn try_new_api(&self) -> Result<Option<Api>> {
        let Some(api_key) = self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
        else {
            warn!("the API key is not set");
            return Ok(None);
        };
        let market = Market::builder()
            .document_type(&self.document_type)
            .in_domain(&self.in_domain)
            .out_domain(&self.out_domain)
            .build();
        Ok(Some(Api::try_new(api_key, self.api_url.clone(), market)?))
    }
}
