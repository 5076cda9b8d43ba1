// src/pipeline/fetch.rs

//! Fetch raw vacancies from providers and store them under a label.

use crate::error::{AppError, Result};
use crate::models::Provider;
use crate::services::{SourceConnector, fetch_vacancies};
use crate::storage::VacancyStorage;
use crate::utils::log::{header, step, sub_item};

/// One provider to query, with an optional region override.
pub struct FetchJob<'a> {
    pub connector: &'a dyn SourceConnector,
    pub region: Option<String>,
}

/// What happened to one provider during a fetch run.
#[derive(Debug)]
pub enum ProviderOutcome {
    /// Records fetched and written
    Stored { count: usize, location: String },
    /// Provider not requested; an empty raw file was written
    NotRequested,
    /// Fetch failed; the provider's raw file was emptied
    Failed(AppError),
}

/// Per-provider results of [`run_fetch`].
#[derive(Debug)]
pub struct FetchReport {
    pub outcomes: Vec<(Provider, ProviderOutcome)>,
}

impl FetchReport {
    /// Total records stored across providers.
    pub fn total(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                ProviderOutcome::Stored { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }
}

/// Fetch every job in turn and persist raw records under `label`.
///
/// A failing provider does not stop the others; its raw file is replaced by an
/// empty list so a reload never mixes in records from an earlier run. The run
/// only fails when every requested provider failed, returning the first error.
pub async fn run_fetch(
    storage: &dyn VacancyStorage,
    jobs: &[FetchJob<'_>],
    keyword: &str,
    pages: u32,
    label: &str,
) -> Result<FetchReport> {
    header(&format!("Fetching vacancies for '{keyword}'"));

    let mut outcomes = Vec::new();
    for (index, job) in jobs.iter().enumerate() {
        let provider = job.connector.provider();
        let region = job
            .region
            .as_deref()
            .unwrap_or_else(|| job.connector.default_region());
        step(index + 1, jobs.len(), &format!("{provider} (region {region})"));

        let outcome = match fetch_vacancies(job.connector, keyword, pages, region).await {
            Ok(records) => {
                let location = storage.persist_raw(provider, label, &records).await?;
                sub_item(&format!("{} records -> {}", records.len(), location));
                ProviderOutcome::Stored {
                    count: records.len(),
                    location,
                }
            }
            Err(e) => {
                log::error!("{} fetch failed: {}", provider, e);
                storage.persist_raw(provider, label, &[]).await?;
                ProviderOutcome::Failed(e)
            }
        };
        outcomes.push((provider, outcome));
    }

    for provider in Provider::ALL {
        if !outcomes.iter().any(|(p, _)| *p == provider) {
            storage.persist_raw(provider, label, &[]).await?;
            outcomes.push((provider, ProviderOutcome::NotRequested));
        }
    }

    let all_failed = !jobs.is_empty()
        && outcomes
            .iter()
            .all(|(_, o)| matches!(o, ProviderOutcome::Failed(_) | ProviderOutcome::NotRequested));
    if all_failed {
        let first = outcomes
            .into_iter()
            .find_map(|(_, o)| match o {
                ProviderOutcome::Failed(e) => Some(e),
                _ => None,
            });
        if let Some(e) = first {
            return Err(e);
        }
        return Err(AppError::validation("no provider returned data"));
    }

    Ok(FetchReport { outcomes })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::models::RawRecord;
    use crate::services::{IdentityAllocator, Normalizer, PageLimit};
    use crate::storage::LocalStorage;

    struct StaticConnector {
        provider: Provider,
        limit: PageLimit,
    }

    #[async_trait]
    impl SourceConnector for StaticConnector {
        fn provider(&self) -> Provider {
            self.provider
        }

        fn page_limit(&self) -> PageLimit {
            self.limit
        }

        fn default_region(&self) -> &str {
            "1"
        }

        async fn fetch_page(&self, _keyword: &str, page: u32, region: &str) -> Result<Vec<RawRecord>> {
            Ok(vec![json!({
                "profession": "NEW-SJ",
                "page": page,
                "region": region
            })])
        }
    }

    #[tokio::test]
    async fn test_stores_each_provider() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let hh = StaticConnector {
            provider: Provider::HeadHunter,
            limit: PageLimit::Reject(20),
        };
        let sj = StaticConnector {
            provider: Provider::SuperJob,
            limit: PageLimit::Clamp(5),
        };
        let jobs = [
            FetchJob {
                connector: &hh,
                region: Some("2".to_string()),
            },
            FetchJob {
                connector: &sj,
                region: None,
            },
        ];

        let report = run_fetch(&storage, &jobs, "rust", 7, "rust").await.unwrap();
        assert_eq!(report.total(), 7 + 5);

        let hh_raw = storage.load_raw(Provider::HeadHunter, "rust").await.unwrap().unwrap();
        assert_eq!(hh_raw[0]["region"], "2");
        let sj_raw = storage.load_raw(Provider::SuperJob, "rust").await.unwrap().unwrap();
        assert_eq!(sj_raw.len(), 5);
        assert_eq!(sj_raw[0]["region"], "1");
    }

    #[tokio::test]
    async fn test_quota_failure_does_not_stop_other_provider() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let hh = StaticConnector {
            provider: Provider::HeadHunter,
            limit: PageLimit::Reject(20),
        };
        let sj = StaticConnector {
            provider: Provider::SuperJob,
            limit: PageLimit::Clamp(5),
        };
        let jobs = [
            FetchJob { connector: &hh, region: None },
            FetchJob { connector: &sj, region: None },
        ];

        let report = run_fetch(&storage, &jobs, "rust", 25, "rust").await.unwrap();

        assert!(matches!(
            report.outcomes[0],
            (Provider::HeadHunter, ProviderOutcome::Failed(AppError::QuotaExceeded { .. }))
        ));
        assert!(matches!(
            report.outcomes[1],
            (Provider::SuperJob, ProviderOutcome::Stored { count: 5, .. })
        ));
        let hh_raw = storage.load_raw(Provider::HeadHunter, "rust").await.unwrap();
        assert_eq!(hh_raw, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_failed_provider_drops_previous_records() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage
            .persist_raw(Provider::HeadHunter, "rust", &[json!({ "name": "OLD-HH" })])
            .await
            .unwrap();
        storage
            .persist_raw(Provider::SuperJob, "rust", &[json!({ "profession": "OLD-SJ" })])
            .await
            .unwrap();

        let hh = StaticConnector {
            provider: Provider::HeadHunter,
            limit: PageLimit::Reject(20),
        };
        let sj = StaticConnector {
            provider: Provider::SuperJob,
            limit: PageLimit::Clamp(5),
        };
        let jobs = [
            FetchJob { connector: &hh, region: None },
            FetchJob { connector: &sj, region: None },
        ];
        run_fetch(&storage, &jobs, "rust", 25, "rust").await.unwrap();

        let normalizer = Normalizer::new(Arc::new(IdentityAllocator::new()));
        let reloaded = storage.load_and_normalize("rust", &normalizer).await.unwrap();
        assert_eq!(reloaded.len(), 5);
        assert!(reloaded.iter().all(|v| v.title == "NEW-SJ"));
    }

    #[tokio::test]
    async fn test_unrequested_provider_gets_empty_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let sj = StaticConnector {
            provider: Provider::SuperJob,
            limit: PageLimit::Clamp(5),
        };
        let jobs = [FetchJob { connector: &sj, region: None }];

        let report = run_fetch(&storage, &jobs, "rust", 1, "rust").await.unwrap();
        assert!(matches!(
            report.outcomes[1],
            (Provider::HeadHunter, ProviderOutcome::NotRequested)
        ));
        let hh_raw = storage.load_raw(Provider::HeadHunter, "rust").await.unwrap();
        assert_eq!(hh_raw, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_all_failed_returns_error() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let hh = StaticConnector {
            provider: Provider::HeadHunter,
            limit: PageLimit::Reject(20),
        };
        let jobs = [FetchJob { connector: &hh, region: None }];

        let result = run_fetch(&storage, &jobs, "rust", 21, "rust").await;
        assert!(matches!(result, Err(AppError::QuotaExceeded { .. })));
    }
}
