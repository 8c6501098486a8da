//! HTTP page source for paged JSON listings

use crate::pagination::{ListingPage, PageSource};
use crate::{build_http_client, FetchError, FetcherConfig, Result};
use tracing::debug;

/// Listing client issuing `GET <base_url>?page=N`
pub struct HttpPageSource {
    config: FetcherConfig,
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Client for the NOAA volcano listing
    pub fn noaa_volcanoes() -> Result<Self> {
        Self::new(FetcherConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> Result<ListingPage> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::PageStatus { page, status });
        }

        let body = response.bytes().await?;
        debug!("Page {}: {} bytes", page, body.len());

        Ok(serde_json::from_slice(&body)?)
    }
}
