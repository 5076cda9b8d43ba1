// src/services/superjob.rs

//! SuperJob (superjob.ru) connector.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Provider, RawRecord, SuperJobConfig};
use crate::services::headhunter::take_array;
use crate::services::{PageLimit, SourceConnector};
use crate::utils::http::fetch_json;

/// Header carrying the static application key.
const API_KEY_HEADER: &str = "X-Api-App-Id";

/// Connector for the SuperJob vacancy API.
pub struct SuperJobConnector {
    config: SuperJobConfig,
    client: Client,
}

impl SuperJobConnector {
    pub fn new(config: SuperJobConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl SourceConnector for SuperJobConnector {
    fn provider(&self) -> Provider {
        Provider::SuperJob
    }

    fn default_region(&self) -> &str {
        &self.config.default_region
    }

    fn page_limit(&self) -> PageLimit {
        PageLimit::Clamp(self.config.max_pages)
    }

    async fn fetch_page(&self, keyword: &str, page: u32, region: &str) -> Result<Vec<RawRecord>> {
        if self.config.api_key.is_empty() {
            log::warn!("SuperJob API key is empty; requests will likely be rejected");
        }

        // SuperJob pages start at 1
        let page = (page + 1).to_string();
        let count = self.config.per_page.to_string();
        let request = self
            .client
            .get(&self.config.base_url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[
                ("keyword", keyword),
                (self.config.region_param.as_str(), region),
                ("sort_new (unixtime)", "1"),
                ("page", page.as_str()),
                ("count", count.as_str()),
                ("no_agreement", "1"),
            ]);

        let body: Value = fetch_json(request).await?;
        take_array(body, "objects")
            .ok_or_else(|| AppError::provider(Provider::SuperJob, "missing 'objects' array"))
    }
}
