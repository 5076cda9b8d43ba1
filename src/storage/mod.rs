//! Storage abstractions for vacancy persistence.
//!
//! Every run is named by a user-chosen label. Raw provider responses and the
//! final selection live side by side:
//!
//! ```text
//! storage/
//! ├── config.toml
//! ├── hh_{Label}.json       # raw HeadHunter records
//! ├── sj_{Label}.json       # raw SuperJob records
//! └── result_{Label}.json   # filtered/sorted canonical vacancies
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Provider, RawRecord, Vacancy};
use crate::services::Normalizer;

// Re-export for convenience
pub use local::{LocalStorage, file_label};

/// Trait for vacancy storage backends.
#[async_trait]
pub trait VacancyStorage: Send + Sync {
    /// Write raw records for one provider, replacing any previous file.
    ///
    /// Returns the location written.
    async fn persist_raw(
        &self,
        provider: Provider,
        label: &str,
        records: &[RawRecord],
    ) -> Result<String>;

    /// Read raw records for one provider, `None` if never persisted.
    async fn load_raw(&self, provider: Provider, label: &str) -> Result<Option<Vec<RawRecord>>>;

    /// Write the final vacancy list, replacing any previous result.
    ///
    /// Returns the location written.
    async fn save_result(&self, label: &str, vacancies: &[Vacancy]) -> Result<String>;

    /// Read every provider's raw file for `label` and normalize it again.
    ///
    /// HeadHunter records come first. Ids are freshly allocated, so they differ
    /// from any earlier load of the same files.
    async fn load_and_normalize(&self, label: &str, normalizer: &Normalizer) -> Result<Vec<Vacancy>> {
        let mut vacancies = Vec::new();
        for provider in Provider::ALL {
            match self.load_raw(provider, label).await? {
                Some(records) => {
                    let batch = normalizer.normalize_all(provider, &records);
                    log::info!(
                        "Loaded {} of {} {} records for '{}'",
                        batch.len(),
                        records.len(),
                        provider,
                        label
                    );
                    vacancies.extend(batch);
                }
                None => log::warn!("No {} data stored for '{}'", provider, label),
            }
        }
        Ok(vacancies)
    }
}

/// Result of removing a vacancy from a working list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed(Vacancy),
    NotFound,
}

/// Remove the first vacancy with `id` from the in-memory list.
///
/// Stored files are left untouched.
pub fn delete_by_id(id: u64, vacancies: &mut Vec<Vacancy>) -> DeleteOutcome {
    match vacancies.iter().position(|v| v.id == id) {
        Some(index) => DeleteOutcome::Removed(vacancies.remove(index)),
        None => {
            log::info!("No vacancy found with id {}", id);
            DeleteOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacancy(id: u64) -> Vacancy {
        Vacancy {
            id,
            title: format!("Vacancy {id}"),
            salary_min: Some(id * 1000),
            salary_max: Some(id * 1000),
            currency: "RUR".to_string(),
            area: "Москва".to_string(),
            requirement: "Rust".to_string(),
            responsibility: "Code".to_string(),
            experience: "Нет опыта".to_string(),
            link: format!("https://hh.ru/vacancy/{id}"),
        }
    }

    #[test]
    fn test_delete_existing() {
        let mut list = vec![vacancy(1), vacancy(2), vacancy(3)];
        let outcome = delete_by_id(2, &mut list);

        assert_eq!(outcome, DeleteOutcome::Removed(vacancy(2)));
        let ids: Vec<u64> = list.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_removes_only_first_match() {
        let mut list = vec![vacancy(5), vacancy(5)];
        delete_by_id(5, &mut list);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_delete_missing_leaves_list_unchanged() {
        let mut list = vec![vacancy(1), vacancy(2)];
        let before = list.clone();

        assert_eq!(delete_by_id(42, &mut list), DeleteOutcome::NotFound);
        assert_eq!(list, before);
    }
}
