// src/services/headhunter.rs

//! HeadHunter (hh.ru) connector.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{HeadHunterConfig, Provider, RawRecord};
use crate::services::{PageLimit, SourceConnector};
use crate::utils::http::fetch_json;

/// Only RUR salaries are requested.
const CURRENCY: &str = "RUR";

/// Connector for the hh.ru vacancy search.
pub struct HeadHunterConnector {
    config: HeadHunterConfig,
    client: Client,
}

impl HeadHunterConnector {
    pub fn new(config: HeadHunterConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl SourceConnector for HeadHunterConnector {
    fn provider(&self) -> Provider {
        Provider::HeadHunter
    }

    fn default_region(&self) -> &str {
        &self.config.default_area
    }

    fn page_limit(&self) -> PageLimit {
        PageLimit::Reject(self.config.max_pages)
    }

    async fn fetch_page(&self, keyword: &str, page: u32, region: &str) -> Result<Vec<RawRecord>> {
        let page = page.to_string();
        let per_page = self.config.per_page.to_string();
        let request = self.client.get(&self.config.base_url).query(&[
            ("text", keyword),
            ("page", page.as_str()),
            ("per_page", per_page.as_str()),
            ("only_with_salary", "true"),
            ("order_by", "publication_time"),
            ("area", region),
            ("currency", CURRENCY),
        ]);

        let body: Value = fetch_json(request).await?;
        take_array(body, "items")
            .ok_or_else(|| AppError::provider(Provider::HeadHunter, "missing 'items' array"))
    }
}

/// Pull an array field out of a response envelope.
pub(crate) fn take_array(mut body: Value, field: &str) -> Option<Vec<RawRecord>> {
    match body.get_mut(field).map(Value::take) {
        Some(Value::Array(records)) => Some(records),
        _ => None,
    }
}
