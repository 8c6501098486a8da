//! Hazard Data Fetcher
//!
//! Pulls public hazard listings from remote APIs:
//!
//! - **Volcanoes**: walks the NOAA hazard-service listing page by page and
//!   saves the whole collection as one JSON snapshot.
//! - **Earthquakes**: runs a USGS FDSN event query and classifies each
//!   event with [`seismic_classifier`].
//!
//! Requests are issued one at a time. A failed page ends the walk but keeps
//! every page fetched before it.

use std::time::Duration;
use thiserror::Error;

pub mod client;
pub mod pagination;
pub mod snapshot;
pub mod usgs;

pub use client::HttpPageSource;
pub use pagination::{fetch_all_pages, FetchOutcome, ListingPage, PageFailure, PageSource};
pub use snapshot::{load_snapshot, save_snapshot, write_json, SnapshotError};
pub use usgs::{EventQuery, UsgsClient, UsgsConfig};

/// NOAA hazard-service volcano listing
pub const NOAA_VOLCANOES_URL: &str = "https://www.ngdc.noaa.gov/hazel/hazard-service/api/v1/volcanoes";

/// USGS FDSN event query endpoint
pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Default snapshot file for the volcano listing
pub const DEFAULT_SNAPSHOT_PATH: &str = "noaa_volcanoes.json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Page {page} returned status {status}")]
    PageStatus { page: u32, status: reqwest::StatusCode },
    #[error("Event query returned status {0}")]
    QueryStatus(reqwest::StatusCode),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Feed error: {0}")]
    Feed(#[from] seismic_classifier::FeedError),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Paginated listing client configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Listing endpoint; pages are requested as `?page=N`
    pub base_url: String,
    /// Per-request timeout (client default when `None`)
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: NOAA_VOLCANOES_URL.to_string(),
            timeout: None,
        }
    }
}

/// Build the shared reqwest client, applying the optional timeout
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
