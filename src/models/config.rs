//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable overriding the SuperJob credential.
pub const SUPERJOB_KEY_ENV: &str = "SUPERJOB_API_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// HeadHunter connector settings
    #[serde(default)]
    pub headhunter: HeadHunterConfig,

    /// SuperJob connector settings
    #[serde(default)]
    pub superjob: SuperJobConfig,

    /// Top-N selection settings
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            let mut config = Self::default();
            config.apply_env();
            config
        })
    }

    fn apply_env(&mut self) {
        self.override_api_key(std::env::var(SUPERJOB_KEY_ENV).ok());
    }

    /// Replace the SuperJob key unless `key` is missing or blank.
    fn override_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.superjob.api_key = key;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        Url::parse(&self.headhunter.base_url)?;
        Url::parse(&self.headhunter.areas_url)?;
        Url::parse(&self.superjob.base_url)?;
        if !(1..=100).contains(&self.headhunter.per_page) {
            return Err(AppError::config(
                "headhunter.per_page must be between 1 and 100",
            ));
        }
        if !(1..=100).contains(&self.superjob.per_page) {
            return Err(AppError::config(
                "superjob.per_page must be between 1 and 100",
            ));
        }
        if self.headhunter.max_pages == 0 || self.superjob.max_pages == 0 {
            return Err(AppError::config("max_pages must be > 0"));
        }
        if self.superjob.region_param.trim().is_empty() {
            return Err(AppError::config("superjob.region_param is empty"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// HeadHunter API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadHunterConfig {
    #[serde(default = "defaults::hh_base_url")]
    pub base_url: String,

    /// Region tree endpoint used by the `areas` lookup
    #[serde(default = "defaults::hh_areas_url")]
    pub areas_url: String,

    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// Hard page limit; larger requests fail
    #[serde(default = "defaults::hh_max_pages")]
    pub max_pages: u32,

    /// Area id used when none is given (113 = all of Russia)
    #[serde(default = "defaults::hh_default_area")]
    pub default_area: String,
}

impl Default for HeadHunterConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::hh_base_url(),
            areas_url: defaults::hh_areas_url(),
            per_page: defaults::per_page(),
            max_pages: defaults::hh_max_pages(),
            default_area: defaults::hh_default_area(),
        }
    }
}

/// SuperJob API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperJobConfig {
    #[serde(default = "defaults::sj_base_url")]
    pub base_url: String,

    /// Sent as `X-Api-App-Id`
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// Soft page limit; larger requests are clamped
    #[serde(default = "defaults::sj_max_pages")]
    pub max_pages: u32,

    #[serde(default = "defaults::sj_default_region")]
    pub default_region: String,

    /// Query parameter carrying the region id.
    ///
    /// Defaults to the historical name (Cyrillic "с"), which may not be
    /// honoured upstream. Override once the correct parameter is confirmed.
    #[serde(default = "defaults::sj_region_param")]
    pub region_param: String,
}

impl Default for SuperJobConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::sj_base_url(),
            api_key: String::new(),
            per_page: defaults::per_page(),
            max_pages: defaults::sj_max_pages(),
            default_region: defaults::sj_default_region(),
            region_param: defaults::sj_region_param(),
        }
    }
}

/// How the top-N selector treats its boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopNMode {
    /// Exactly the N highest salaries
    #[default]
    Exact,
    /// Historical slicing: N-1 highest, empty for N=1
    Legacy,
}

/// Top-N selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub top_n_mode: TopNMode,
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; vacancy-aggregator/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn per_page() -> u32 {
        100
    }

    pub fn hh_base_url() -> String {
        "https://api.hh.ru/vacancies".into()
    }
    pub fn hh_areas_url() -> String {
        "https://api.hh.ru/areas".into()
    }
    pub fn hh_max_pages() -> u32 {
        20
    }
    pub fn hh_default_area() -> String {
        "113".into()
    }

    pub fn sj_base_url() -> String {
        "https://api.superjob.ru/2.0/vacancies/".into()
    }
    pub fn sj_max_pages() -> u32 {
        5
    }
    pub fn sj_default_region() -> String {
        "1".into()
    }
    pub fn sj_region_param() -> String {
        "\u{0441}".into()
    }
}
