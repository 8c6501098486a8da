//! Paged listing walk
//!
//! ```text
//! page = 1
//! loop:
//!     fetch page      -- failure: stop, keep what we have
//!     append items
//!     page >= totalPages ? stop : page += 1
//! ```

use crate::{FetchError, Result};
use serde::Deserialize;
use std::future::Future;
use tracing::{info, warn};

fn single_page() -> f64 {
    1.0
}

/// One decoded page of a listing
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    /// Opaque records, passed through untouched
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    /// Absent means the listing fits on one page. Any JSON number is
    /// accepted (`3.0`, `-1`); the walk stops once `page >= total_pages`.
    #[serde(rename = "totalPages", default = "single_page")]
    pub total_pages: f64,
}

/// Anything that can serve listing pages by 1-based page number
pub trait PageSource {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<ListingPage>> + Send;
}

/// Page that stopped the walk early
#[derive(Debug)]
pub struct PageFailure {
    pub page: u32,
    pub error: FetchError,
}

/// Result of walking a listing
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Items from every successfully fetched page, in page order
    pub items: Vec<serde_json::Value>,
    pub pages_fetched: u32,
    /// Set when the walk ended before the last page
    pub failure: Option<PageFailure>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Fetch pages from 1 until `totalPages` is reached or a page fails
pub async fn fetch_all_pages<S: PageSource>(source: &S) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();
    let mut page: u32 = 1;

    loop {
        info!("Fetching page {}...", page);

        let listing = match source.fetch_page(page).await {
            Ok(listing) => listing,
            Err(error) => {
                warn!("Failed at page {}: {}", page, error);
                outcome.failure = Some(PageFailure { page, error });
                break;
            }
        };

        outcome.pages_fetched += 1;
        outcome.items.extend(listing.items);

        if f64::from(page) >= listing.total_pages {
            break;
        }
        page += 1;
    }

    info!(
        "Fetched {} items from {} pages",
        outcome.items.len(),
        outcome.pages_fetched
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// In-memory listing with `total_pages` pages of `per_page` items each
    struct FakeListing {
        total_pages: u32,
        per_page: usize,
        fail_on: Option<u32>,
        omit_total: bool,
        requests: AtomicU32,
    }

    impl FakeListing {
        fn new(total_pages: u32, per_page: usize) -> Self {
            Self {
                total_pages,
                per_page,
                fail_on: None,
                omit_total: false,
                requests: AtomicU32::new(0),
            }
        }

        fn requests(&self) -> u32 {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl PageSource for FakeListing {
        async fn fetch_page(&self, page: u32) -> Result<ListingPage> {
            self.requests.fetch_add(1, Ordering::SeqCst);

            if self.fail_on == Some(page) {
                return Err(FetchError::PageStatus {
                    page,
                    status: StatusCode::SERVICE_UNAVAILABLE,
                });
            }

            let items: Vec<serde_json::Value> = (0..self.per_page)
                .map(|i| json!({"id": format!("v-{}-{}", page, i), "name": "Etna"}))
                .collect();

            let body = if self.omit_total {
                json!({ "items": items })
            } else {
                json!({ "items": items, "totalPages": self.total_pages })
            };
            Ok(serde_json::from_value(body)?)
        }
    }

    #[tokio::test]
    async fn test_collects_every_page() {
        let source = FakeListing::new(3, 2);

        let outcome = fetch_all_pages(&source).await;
        assert!(outcome.is_complete());
        assert_eq!(outcome.items.len(), 6);
        assert_eq!(outcome.pages_fetched, 3);
        assert_eq!(source.requests(), 3);

        // Page order is preserved
        assert_eq!(outcome.items[0]["id"], "v-1-0");
        assert_eq!(outcome.items[5]["id"], "v-3-1");
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_pages() {
        let mut source = FakeListing::new(3, 2);
        source.fail_on = Some(2);

        let outcome = fetch_all_pages(&source).await;
        assert!(!outcome.is_complete());
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.pages_fetched, 1);
        assert_eq!(source.requests(), 2);

        let failure = outcome.failure.unwrap();
        assert_eq!(failure.page, 2);
        assert!(matches!(failure.error, FetchError::PageStatus { page: 2, .. }));
    }

    #[tokio::test]
    async fn test_failure_on_first_page_yields_nothing() {
        let mut source = FakeListing::new(3, 2);
        source.fail_on = Some(1);

        let outcome = fetch_all_pages(&source).await;
        assert!(outcome.items.is_empty());
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn test_single_page_when_total_missing() {
        let mut source = FakeListing::new(5, 4);
        source.omit_total = true;

        let outcome = fetch_all_pages(&source).await;
        assert_eq!(outcome.items.len(), 4);
        assert_eq!(source.requests(), 1);
    }

    #[test]
    fn test_listing_page_defaults() {
        let page: ListingPage = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1.0);

        let page: ListingPage =
            serde_json::from_str(r#"{"items": [{"a": 1}], "totalPages": 12, "page": 1}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 12.0);
    }

    #[test]
    fn test_non_integer_total_pages_keeps_items() {
        let page: ListingPage =
            serde_json::from_str(r#"{"items": [{"a": 1}], "totalPages": 3.0}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 3.0);

        let page: ListingPage =
            serde_json::from_str(r#"{"items": [{"a": 1}, {"a": 2}], "totalPages": -1}"#).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, -1.0);
    }

    /// Serves fixed JSON bodies, one per page
    struct ScriptedListing {
        bodies: Vec<serde_json::Value>,
        requests: AtomicU32,
    }

    impl PageSource for ScriptedListing {
        async fn fetch_page(&self, page: u32) -> Result<ListingPage> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let body = self.bodies[(page - 1) as usize].clone();
            Ok(serde_json::from_value(body)?)
        }
    }

    #[tokio::test]
    async fn test_float_and_negative_totals_end_walk() {
        let source = ScriptedListing {
            bodies: vec![
                json!({"items": [{"n": 1}], "totalPages": 2.0}),
                json!({"items": [{"n": 2}, {"n": 3}], "totalPages": 2.0}),
            ],
            requests: AtomicU32::new(0),
        };
        let outcome = fetch_all_pages(&source).await;
        assert!(outcome.is_complete());
        assert_eq!(outcome.items.len(), 3);
        assert_eq!(source.requests.load(Ordering::SeqCst), 2);

        let source = ScriptedListing {
            bodies: vec![json!({"items": [{"n": 1}], "totalPages": -1})],
            requests: AtomicU32::new(0),
        };
        let outcome = fetch_all_pages(&source).await;
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(source.requests.load(Ordering::SeqCst), 1);
    }
}
