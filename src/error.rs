// src/error.rs

//! Unified error handling for the vacancy aggregator.

use std::fmt;

use thiserror::Error;

use crate::models::Provider;

/// Result type alias for aggregator operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Requested more pages than the provider allows
    #[error("{provider} allows at most {limit} pages, {requested} requested")]
    QuotaExceeded {
        provider: Provider,
        requested: u32,
        limit: u32,
    },

    /// Salary filter input could not be parsed
    #[error("Invalid salary filter '{spec}': {message}")]
    InvalidFilterSpec { spec: String, message: String },

    /// Provider response did not have the expected envelope
    #[error("Unexpected {provider} response: {message}")]
    Provider { provider: Provider, message: String },

    /// Raw record could not be mapped to a vacancy
    #[error("Cannot normalize {provider} record: {message}")]
    Normalize { provider: Provider, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a quota error for a provider.
    pub fn quota(provider: Provider, requested: u32, limit: u32) -> Self {
        Self::QuotaExceeded {
            provider,
            requested,
            limit,
        }
    }

    /// Create a salary filter parsing error.
    pub fn invalid_filter(spec: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::InvalidFilterSpec {
            spec: spec.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected-response error.
    pub fn provider(provider: Provider, message: impl fmt::Display) -> Self {
        Self::Provider {
            provider,
            message: message.to_string(),
        }
    }

    /// Create a normalization error.
    pub fn normalize(provider: Provider, message: impl fmt::Display) -> Self {
        Self::Normalize {
            provider,
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
