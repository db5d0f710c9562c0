use clap::Parser;
use reqwest::Url;

use crate::{api::home_assistant::Api, prelude::*};

#[derive(Parser)]
pub struct HomeAssistantArgs {
    /// Home Assistant long-lived access token.
    #[clap(
        long = "home-assistant-access-token",
        env = "HOME_ASSISTANT_ACCESS_TOKEN",
        hide_env_values = true,
        requires = "home_assistant_base_url"
    )]
    pub home_assistant_access_token: Option<String>,

    /// Home Assistant API base URL. For example: `http://localhost:8123/api`.
    #[clap(
        long = "home-assistant-api-base-url",
        env = "HOME_ASSISTANT_API_BASE_URL",
        requires = "home_assistant_access_token"
    )]
    pub home_assistant_base_url: Option<Url>,

    #[clap(
        long = "home-assistant-entity-id",
        env = "HOME_ASSISTANT_ENTITY_ID",
        default_value = "sensor.electricity_price"
    )]
    pub home_assistant_entity_id: String,
}

impl HomeAssistantArgs {
    pub fn try_new_api(&self) -> Result<Option<Api>> {
        match (&self.home_assistant_access_token, &self.home_assistant_base_url) {
            (Some(access_token), Some(base_url)) => {
                Ok(Some(Api::try_new(access_token, base_url, &self.home_assistant_entity_id)?))
            }
            _ => Ok(None),
        }
    }
}
