// src/services/connector.rs

//! Source connector capability and the shared pagination loop.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Config, Provider, RawRecord};
use crate::services::{HeadHunterConnector, SuperJobConnector};

/// How a provider treats page counts above its quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    /// Fail before fetching anything
    Reject(u32),
    /// Quietly fetch at most this many pages
    Clamp(u32),
}

impl PageLimit {
    /// Number of pages to actually fetch for a request.
    pub fn resolve(self, provider: Provider, requested: u32) -> Result<u32> {
        match self {
            PageLimit::Reject(limit) if requested > limit => {
                Err(AppError::quota(provider, requested, limit))
            }
            PageLimit::Reject(_) => Ok(requested),
            PageLimit::Clamp(limit) => Ok(requested.min(limit)),
        }
    }
}

/// A job board that can return one page of raw vacancies.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Provider served by this connector.
    fn provider(&self) -> Provider;

    /// Page quota policy.
    fn page_limit(&self) -> PageLimit;

    /// Region id used when the caller does not pick one.
    fn default_region(&self) -> &str;

    /// Fetch one page. `page` is zero-based; connectors translate it for the wire.
    async fn fetch_page(&self, keyword: &str, page: u32, region: &str) -> Result<Vec<RawRecord>>;
}

/// Fetch `pages` pages one after another and concatenate them in page order.
pub async fn fetch_vacancies(
    connector: &dyn SourceConnector,
    keyword: &str,
    pages: u32,
    region: &str,
) -> Result<Vec<RawRecord>> {
    let provider = connector.provider();
    let pages = connector.page_limit().resolve(provider, pages)?;

    let mut records = Vec::new();
    for page in 0..pages {
        let batch = connector.fetch_page(keyword, page, region).await?;
        log::debug!(
            "{}: page {}/{} returned {} records",
            provider,
            page + 1,
            pages,
            batch.len()
        );
        records.extend(batch);
    }

    log::info!("{}: fetched {} records from {} pages", provider, records.len(), pages);
    Ok(records)
}

/// Build the connector for a provider tag.
pub fn connector_for(
    provider: Provider,
    config: &Config,
    client: reqwest::Client,
) -> Box<dyn SourceConnector> {
    match provider {
        Provider::HeadHunter => Box::new(HeadHunterConnector::new(config.headhunter.clone(), client)),
        Provider::SuperJob => Box::new(SuperJobConnector::new(config.superjob.clone(), client)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Connector that records requested pages and returns two records each.
    struct FakeConnector {
        limit: PageLimit,
        calls: Mutex<Vec<u32>>,
    }

    impl FakeConnector {
        fn new(limit: PageLimit) -> Self {
            Self {
                limit,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SourceConnector for FakeConnector {
        fn provider(&self) -> Provider {
            Provider::HeadHunter
        }

        fn page_limit(&self) -> PageLimit {
            self.limit
        }

        fn default_region(&self) -> &str {
            "113"
        }

        async fn fetch_page(&self, _keyword: &str, page: u32, _region: &str) -> Result<Vec<RawRecord>> {
            self.calls.lock().unwrap().push(page);
            Ok(vec![json!({ "page": page, "n": 0 }), json!({ "page": page, "n": 1 })])
        }
    }

    #[test]
    fn test_reject_over_limit() {
        let err = PageLimit::Reject(20).resolve(Provider::HeadHunter, 21).unwrap_err();
        assert!(matches!(
            err,
            AppError::QuotaExceeded { requested: 21, limit: 20, .. }
        ));
        assert_eq!(PageLimit::Reject(20).resolve(Provider::HeadHunter, 20).unwrap(), 20);
    }

    #[test]
    fn test_clamp_over_limit() {
        assert_eq!(PageLimit::Clamp(5).resolve(Provider::SuperJob, 9).unwrap(), 5);
        assert_eq!(PageLimit::Clamp(5).resolve(Provider::SuperJob, 3).unwrap(), 3);
    }

    #[tokio::test]
    async fn test_pages_concatenated_in_order() {
        let connector = FakeConnector::new(PageLimit::Reject(20));
        let records = fetch_vacancies(&connector, "rust", 3, "113").await.unwrap();

        assert_eq!(*connector.calls.lock().unwrap(), vec![0, 1, 2]);
        let pages: Vec<u64> = records.iter().map(|r| r["page"].as_u64().unwrap()).collect();
        assert_eq!(pages, vec![0, 0, 1, 1, 2, 2]);
    }

    #[tokio::test]
    async fn test_quota_failure_fetches_nothing() {
        let connector = FakeConnector::new(PageLimit::Reject(20));
        let result = fetch_vacancies(&connector, "rust", 21, "113").await;

        assert!(matches!(result, Err(AppError::QuotaExceeded { .. })));
        assert!(connector.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clamped_fetch() {
        let connector = FakeConnector::new(PageLimit::Clamp(5));
        let records = fetch_vacancies(&connector, "rust", 8, "1").await.unwrap();

        assert_eq!(connector.calls.lock().unwrap().len(), 5);
        assert_eq!(records.len(), 10);
    }
}
