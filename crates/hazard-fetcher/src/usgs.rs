//! USGS earthquake event query
//!
//! Filters map one-to-one onto FDSN query parameters:
//!
//! | Field           | Parameter      |
//! |-----------------|----------------|
//! | `start`         | `starttime`    |
//! | `end`           | `endtime`      |
//! | `min_magnitude` | `minmagnitude` |
//! | `max_magnitude` | `maxmagnitude` |
//! | `min_depth`     | `mindepth`     |
//! | `max_depth`     | `maxdepth`     |

use crate::{build_http_client, FetchError, Result, USGS_QUERY_URL};
use chrono::{Days, NaiveDate, Utc};
use seismic_classifier::{classify_all, feed::parse_feature_collection, ClassifiedRecord};
use std::time::Duration;
use tracing::{debug, info};

/// Event query endpoint configuration
#[derive(Debug, Clone)]
pub struct UsgsConfig {
    pub base_url: String,
    /// Per-request timeout (client default when `None`)
    pub timeout: Option<Duration>,
}

impl Default for UsgsConfig {
    fn default() -> Self {
        Self {
            base_url: USGS_QUERY_URL.to_string(),
            timeout: None,
        }
    }
}

/// Time window plus magnitude and depth ranges (all bounds inclusive)
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    /// km
    pub min_depth: f64,
    /// km
    pub max_depth: f64,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self::past_days(7, Utc::now().date_naive())
    }
}

impl EventQuery {
    /// Window ending at `today`, starting `days` earlier
    pub fn past_days(days: u32, today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MIN);

        Self {
            start,
            end: today,
            min_magnitude: 4.5,
            max_magnitude: 10.0,
            min_depth: 0.0,
            max_depth: 700.0,
        }
    }

    pub fn with_magnitude(mut self, min: f64, max: f64) -> Self {
        self.min_magnitude = min;
        self.max_magnitude = max;
        self
    }

    pub fn with_depth(mut self, min_km: f64, max_km: f64) -> Self {
        self.min_depth = min_km;
        self.max_depth = max_km;
        self
    }

    /// Reject inverted or non-finite ranges
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(FetchError::InvalidQuery(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        check_range("magnitude", self.min_magnitude, self.max_magnitude)?;
        check_range("depth", self.min_depth, self.max_depth)?;
        Ok(())
    }

    /// FDSN query parameters, `format=geojson` first
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", "geojson".to_string()),
            ("starttime", self.start.to_string()),
            ("endtime", self.end.to_string()),
            ("minmagnitude", self.min_magnitude.to_string()),
            ("maxmagnitude", self.max_magnitude.to_string()),
            ("mindepth", self.min_depth.to_string()),
            ("maxdepth", self.max_depth.to_string()),
        ]
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(FetchError::InvalidQuery(format!(
            "{} bounds must be finite",
            name
        )));
    }
    if min > max {
        return Err(FetchError::InvalidQuery(format!(
            "min {} {} exceeds max {}",
            name, min, max
        )));
    }
    Ok(())
}

/// FDSN event query client
pub struct UsgsClient {
    config: UsgsConfig,
    client: reqwest::Client,
}

impl UsgsClient {
    pub fn new(config: UsgsConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Run the query and classify every returned event
    pub async fn fetch_classified(&self, query: &EventQuery) -> Result<Vec<ClassifiedRecord>> {
        query.validate()?;

        info!(
            "Querying USGS events {}..{} (M{}-{}, {}-{} km)",
            query.start,
            query.end,
            query.min_magnitude,
            query.max_magnitude,
            query.min_depth,
            query.max_depth
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::QueryStatus(status));
        }

        let body = response.text().await?;
        debug!("Event query returned {} bytes", body.len());

        let records = parse_feature_collection(&body)?;
        Ok(classify_all(records))
    }
}
