// src/pipeline/process.rs

//! Reload stored vacancies and run them through filters, sorting, selection.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{TopNMode, Vacancy};
use crate::services::Normalizer;
use crate::storage::{DeleteOutcome, VacancyStorage, delete_by_id};
use crate::utils::log::{header, step, summary};

use super::filter::{Filter, apply_all};
use super::sort::{sort_by_salary, top_n};

/// What to do with a reloaded vacancy set.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Applied in order
    pub filters: Vec<Filter>,
    /// Keep only the N highest salaries
    pub top: Option<usize>,
    pub top_mode: TopNMode,
    /// Ids to drop from the working list after selection
    pub delete: Vec<u64>,
    /// Write the result file
    pub save: bool,
}

/// Outcome of [`run_process`].
#[derive(Debug)]
pub struct ProcessReport {
    pub loaded: usize,
    pub after_filters: usize,
    pub deleted: Vec<u64>,
    pub not_found: Vec<u64>,
    pub saved_to: Option<String>,
    pub vacancies: Vec<Vacancy>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Run the post-fetch pipeline for `label`.
pub async fn run_process(
    storage: &dyn VacancyStorage,
    normalizer: &Normalizer,
    label: &str,
    options: &ProcessOptions,
) -> Result<ProcessReport> {
    let started_at = Utc::now();
    header(&format!("Processing vacancies for '{label}'"));

    step(1, 4, "Load and normalize");
    let loaded = storage.load_and_normalize(label, normalizer).await?;
    let loaded_count = loaded.len();

    step(2, 4, "Filter");
    let filtered = apply_all(&options.filters, loaded);
    let after_filters = filtered.len();
    if after_filters == 0 {
        log::warn!("No vacancies match the given filters");
    }

    step(3, 4, "Sort and select");
    let mut vacancies = sort_by_salary(filtered);
    if let Some(n) = options.top {
        vacancies = top_n(vacancies, n, options.top_mode);
        log::info!("Top {} ({:?}) kept {} vacancies", n, options.top_mode, vacancies.len());
    }

    let mut deleted = Vec::new();
    let mut not_found = Vec::new();
    for id in &options.delete {
        match delete_by_id(*id, &mut vacancies) {
            DeleteOutcome::Removed(_) => deleted.push(*id),
            DeleteOutcome::NotFound => not_found.push(*id),
        }
    }

    step(4, 4, "Save");
    let saved_to = if options.save {
        Some(storage.save_result(label, &vacancies).await?)
    } else {
        None
    };

    let finished_at = Utc::now();
    summary(
        "Processing",
        &[
            ("Loaded", loaded_count.to_string()),
            ("After filters", after_filters.to_string()),
            ("Selected", vacancies.len().to_string()),
            ("Deleted", deleted.len().to_string()),
            ("Saved to", saved_to.clone().unwrap_or_else(|| "-".to_string())),
            (
                "Elapsed",
                format!("{} ms", (finished_at - started_at).num_milliseconds()),
            ),
        ],
    );

    Ok(ProcessReport {
        loaded: loaded_count,
        after_filters,
        deleted,
        not_found,
        saved_to,
        vacancies,
        started_at,
        finished_at,
    })
}
