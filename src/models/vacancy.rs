//! Canonical vacancy record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used when a provider has no requirements text.
pub const NO_REQUIREMENTS: &str = "No requirements found";

/// Placeholder used when a provider has no responsibility text.
pub const NO_DESCRIPTION: &str = "No description";

/// A provider-agnostic vacancy produced by the normalizer.
///
/// Ordering is deliberately not implemented here; see
/// [`crate::pipeline::sort_by_salary`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vacancy {
    /// Process-wide id assigned at normalization time
    pub id: u64,

    /// Vacancy title
    pub title: String,

    /// Lower salary bound (mirrors `salary_max` when only that is known)
    pub salary_min: Option<u64>,

    /// Upper salary bound (mirrors `salary_min` when only that is known)
    pub salary_max: Option<u64>,

    /// Currency code, e.g. "RUR"
    pub currency: String,

    /// Region or city name
    pub area: String,

    /// Candidate requirements
    pub requirement: String,

    /// Job description
    pub responsibility: String,

    /// Required experience as reported by the provider
    pub experience: String,

    /// Link to the original listing
    pub link: String,
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<u64>| b.map_or_else(|| "n/a".to_string(), |v| v.to_string());

        writeln!(f, "Vacancy in {}: {}", self.area, self.title)?;
        writeln!(
            f,
            "Salary from {} to {} {}",
            bound(self.salary_min),
            bound(self.salary_max),
            self.currency
        )?;
        writeln!(f, "Requirements: {}", self.requirement)?;
        writeln!(f, "Description: {}", self.responsibility)?;
        writeln!(f, "Experience: {}", self.experience)?;
        writeln!(f, "Link: {}", self.link)?;
        write!(f, "Id: {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_missing_salary() {
        let vacancy = Vacancy {
            id: 7,
            title: "Rust developer".to_string(),
            salary_min: None,
            salary_max: None,
            currency: "RUR".to_string(),
            area: "Москва".to_string(),
            requirement: NO_REQUIREMENTS.to_string(),
            responsibility: NO_DESCRIPTION.to_string(),
            experience: "Нет опыта".to_string(),
            link: "https://hh.ru/vacancy/1".to_string(),
        };

        let text = vacancy.to_string();
        assert!(text.starts_with("Vacancy in Москва: Rust developer"));
        assert!(text.contains("Salary from n/a to n/a RUR"));
        assert!(text.ends_with("Id: 7"));
    }
}
