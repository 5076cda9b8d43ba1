//! Service layer for the vacancy aggregator.
//!
//! This module contains the business logic for:
//! - Provider connectors (`HeadHunterConnector`, `SuperJobConnector`)
//! - Record normalization (`Normalizer`, `IdentityAllocator`)
//! - Region id lookup (`AreaLookup`)

mod areas;
mod connector;
mod headhunter;
mod identity;
mod normalizer;
mod superjob;

pub use areas::{AreaLookup, AreaMatch};
pub use connector::{PageLimit, SourceConnector, connector_for, fetch_vacancies};
pub use headhunter::HeadHunterConnector;
pub use identity::IdentityAllocator;
pub use normalizer::{Normalizer, salary_bounds};
pub use superjob::SuperJobConnector;
