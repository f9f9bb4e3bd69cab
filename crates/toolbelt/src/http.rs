//! HTTP port for the network tools
//!
//! Tools take `&impl HttpClient` so tests can hand them a canned client.
//! There are no retries: a failed call is reported and the tool stops.

use crate::prelude::*;
use std::time::Duration;

const USER_AGENT: &str = concat!("toolbelt/", env!("CARGO_PKG_VERSION"));

#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Body of a JSON endpoint, left unparsed for the core parsers.
    async fn get_json(&self, url: &str) -> Result<String>;

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(f!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(f!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Network(f!("Failed to fetch {url}: HTTP {}", response.status())).into());
        }
        Ok(response)
    }
}

impl HttpClient for ReqwestClient {
    async fn get_json(&self, url: &str) -> Result<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| Error::Network(f!("Failed to read response from {url}: {e}")).into())
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| Error::Network(f!("Failed to read response from {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}
