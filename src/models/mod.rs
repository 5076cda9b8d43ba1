// src/models/mod.rs

//! Domain models for the vacancy aggregator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod provider;
mod raw;
mod vacancy;

// Re-export all public types
pub use config::{
    Config, HeadHunterConfig, HttpConfig, SUPERJOB_KEY_ENV, SelectionConfig, SuperJobConfig,
    TopNMode,
};
pub use provider::Provider;
pub use raw::{AreaNode, HhSalary, HhVacancy, RawRecord, SjVacancy};
pub use vacancy::{NO_DESCRIPTION, NO_REQUIREMENTS, Vacancy};
