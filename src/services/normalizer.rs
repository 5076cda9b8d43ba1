// src/services/normalizer.rs

//! Maps provider-shaped records onto [`Vacancy`].

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{
    HhVacancy, NO_DESCRIPTION, NO_REQUIREMENTS, Provider, RawRecord, SjVacancy, Vacancy,
};
use crate::services::IdentityAllocator;

/// Converts raw provider records into canonical vacancies.
#[derive(Debug, Clone)]
pub struct Normalizer {
    ids: Arc<IdentityAllocator>,
}

impl Normalizer {
    pub fn new(ids: Arc<IdentityAllocator>) -> Self {
        Self { ids }
    }

    /// Normalize a single record.
    ///
    /// An id is consumed even when the record is rejected.
    pub fn normalize(&self, provider: Provider, raw: &RawRecord) -> Result<Vacancy> {
        let id = self.ids.next_id();
        match provider {
            Provider::HeadHunter => map_headhunter(id, raw),
            Provider::SuperJob => map_superjob(id, raw),
        }
    }

    /// Normalize a batch in order, skipping records that cannot be mapped.
    pub fn normalize_all(&self, provider: Provider, raws: &[RawRecord]) -> Vec<Vacancy> {
        let mut vacancies = Vec::with_capacity(raws.len());
        for (index, raw) in raws.iter().enumerate() {
            match self.normalize(provider, raw) {
                Ok(vacancy) => vacancies.push(vacancy),
                Err(e) => log::warn!("Skipping {} record #{}: {}", provider, index, e),
            }
        }
        vacancies
    }
}

fn map_headhunter(id: u64, raw: &RawRecord) -> Result<Vacancy> {
    let provider = Provider::HeadHunter;
    let record =
        HhVacancy::deserialize(raw).map_err(|e| AppError::normalize(provider, e))?;

    let title = required_title(provider, record.name)?;
    let salary = record.salary.unwrap_or_default();
    let (salary_min, salary_max) = salary_bounds(salary.from, salary.to);
    let snippet = record.snippet.unwrap_or_default();

    Ok(Vacancy {
        id,
        title,
        salary_min,
        salary_max,
        currency: salary.currency.unwrap_or_default(),
        area: record.area.and_then(|a| a.name).unwrap_or_default(),
        requirement: text_or(snippet.requirement, NO_REQUIREMENTS),
        responsibility: text_or(snippet.responsibility, NO_DESCRIPTION),
        experience: record.experience.and_then(|e| e.name).unwrap_or_default(),
        link: record.alternate_url.unwrap_or_default(),
    })
}

fn map_superjob(id: u64, raw: &RawRecord) -> Result<Vacancy> {
    let provider = Provider::SuperJob;
    let record =
        SjVacancy::deserialize(raw).map_err(|e| AppError::normalize(provider, e))?;

    let title = required_title(provider, record.profession)?;
    let (salary_min, salary_max) = salary_bounds(record.payment_from, record.payment_to);

    Ok(Vacancy {
        id,
        title,
        salary_min,
        salary_max,
        currency: record.currency.unwrap_or_default(),
        area: record.town.and_then(|t| t.title).unwrap_or_default(),
        requirement: text_or(record.candidat, NO_REQUIREMENTS),
        responsibility: text_or(record.work, NO_DESCRIPTION),
        experience: record.experience.and_then(|e| e.title).unwrap_or_default(),
        link: record.link.unwrap_or_default(),
    })
}

fn required_title(provider: Provider, title: Option<String>) -> Result<String> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(AppError::normalize(provider, "missing title")),
    }
}

/// Fill a missing salary bound from the other one.
///
/// Zero counts as unknown: SuperJob reports unset bounds as `0`.
pub fn salary_bounds(from: Option<u64>, to: Option<u64>) -> (Option<u64>, Option<u64>) {
    let from = from.filter(|v| *v > 0);
    let to = to.filter(|v| *v > 0);

    let min = from.or(to);
    let max = to.or(min);
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
        bounds => bounds,
    }
}

fn text_or(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
