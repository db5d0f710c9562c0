use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::prelude::*;

/// Start building a client with the defaults shared by all the APIs.
pub fn builder() -> ClientBuilder {
    Client::builder().user_agent(concat!("dayahead/", env!("CARGO_PKG_VERSION")))
}

/// Build a default client.
pub fn try_new(timeout: Duration) -> Result<Client> {
    builder().timeout(timeout).build().context("failed to build the HTTP client")
}
