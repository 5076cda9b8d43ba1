// src/pipeline/filter.rs

//! Order-preserving vacancy filters.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::Vacancy;

/// Experience descriptors that count as "no experience" (compared case-insensitively).
const NO_EXPERIENCE: [&str; 2] = ["нет опыта", "без опыта"];

static SALARY_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?:-\s*(\d+)\s*)?$").expect("salary pattern is valid")
});

/// Parsed salary filter: `"min-max"` or just `"min"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryRange {
    Between(u64, u64),
    AtLeast(u64),
}

impl SalaryRange {
    /// Whether a vacancy's minimum salary falls in the range.
    ///
    /// Vacancies without a salary never match.
    pub fn matches(&self, vacancy: &Vacancy) -> bool {
        match (self, vacancy.salary_min) {
            (_, None) => false,
            (SalaryRange::Between(lo, hi), Some(s)) => *lo <= s && s <= *hi,
            (SalaryRange::AtLeast(lo), Some(s)) => s >= *lo,
        }
    }
}

impl FromStr for SalaryRange {
    type Err = AppError;

    fn from_str(spec: &str) -> Result<Self> {
        let caps = SALARY_SPEC
            .captures(spec)
            .ok_or_else(|| AppError::invalid_filter(spec, "expected 'min-max' or 'min'"))?;

        let parse = |m: regex::Match<'_>| {
            m.as_str()
                .parse::<u64>()
                .map_err(|e| AppError::invalid_filter(spec, e))
        };

        let lo = parse(caps.get(1).ok_or_else(|| AppError::invalid_filter(spec, "no minimum"))?)?;
        match caps.get(2) {
            Some(hi) => Ok(SalaryRange::Between(lo, parse(hi)?)),
            None => Ok(SalaryRange::AtLeast(lo)),
        }
    }
}

/// A single filtering step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Substring of requirement or responsibility
    Keyword(String),
    /// Minimum salary range
    Salary(SalaryRange),
    /// Substring of the area
    Region(String),
    /// No experience, or a descriptor mentioning "1"
    LowExperience,
}

impl Filter {
    /// Keep the matching vacancies, preserving order.
    pub fn apply(&self, vacancies: Vec<Vacancy>) -> Vec<Vacancy> {
        match self {
            Filter::Keyword(text) => by_keyword(vacancies, text),
            Filter::Salary(range) => retain(vacancies, |v| range.matches(v)),
            Filter::Region(text) => by_region(vacancies, text),
            Filter::LowExperience => by_low_experience(vacancies),
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Filter::Keyword(text) => format!("keyword '{text}'"),
            Filter::Salary(SalaryRange::Between(lo, hi)) => format!("salary {lo}-{hi}"),
            Filter::Salary(SalaryRange::AtLeast(lo)) => format!("salary >= {lo}"),
            Filter::Region(text) => format!("region '{text}'"),
            Filter::LowExperience => "low experience".to_string(),
        }
    }
}

/// Apply filters one after another.
pub fn apply_all(filters: &[Filter], mut vacancies: Vec<Vacancy>) -> Vec<Vacancy> {
    for filter in filters {
        let before = vacancies.len();
        vacancies = filter.apply(vacancies);
        log::info!(
            "Filter {}: {} -> {} vacancies",
            filter.describe(),
            before,
            vacancies.len()
        );
    }
    vacancies
}

fn retain(mut vacancies: Vec<Vacancy>, keep: impl FnMut(&Vacancy) -> bool) -> Vec<Vacancy> {
    vacancies.retain(keep);
    vacancies
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Keep vacancies whose requirement or responsibility mentions `text`.
pub fn by_keyword(vacancies: Vec<Vacancy>, text: &str) -> Vec<Vacancy> {
    let needle = text.to_lowercase();
    retain(vacancies, |v| {
        contains_ignore_case(&v.requirement, &needle)
            || contains_ignore_case(&v.responsibility, &needle)
    })
}

/// Keep vacancies whose minimum salary matches `spec` (`"min-max"` or `"min"`).
pub fn by_salary_range(vacancies: Vec<Vacancy>, spec: &str) -> Result<Vec<Vacancy>> {
    let range: SalaryRange = spec.parse()?;
    Ok(retain(vacancies, |v| range.matches(v)))
}

/// Keep vacancies whose area contains `text`.
pub fn by_region(vacancies: Vec<Vacancy>, text: &str) -> Vec<Vacancy> {
    let needle = text.to_lowercase();
    retain(vacancies, |v| contains_ignore_case(&v.area, &needle))
}

/// Keep vacancies that need no experience or whose descriptor contains `1`.
///
/// The `1` check is intentionally loose: it matches "От 1 года до 3 лет" but
/// also any other descriptor that happens to contain the digit.
pub fn by_low_experience(vacancies: Vec<Vacancy>) -> Vec<Vacancy> {
    retain(vacancies, |v| {
        let experience = v.experience.to_lowercase();
        NO_EXPERIENCE.contains(&experience.trim()) || experience.contains('1')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacancy(id: u64, salary: Option<u64>, area: &str, experience: &str) -> Vacancy {
        Vacancy {
            id,
            title: format!("Vacancy {id}"),
            salary_min: salary,
            salary_max: salary,
            currency: "RUR".to_string(),
            area: area.to_string(),
            requirement: "Опыт работы с Rust".to_string(),
            responsibility: "Разработка backend".to_string(),
            experience: experience.to_string(),
            link: String::new(),
        }
    }

    fn ids(vacancies: &[Vacancy]) -> Vec<u64> {
        vacancies.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_parse_salary_spec() {
        assert_eq!("40000-60000".parse::<SalaryRange>().unwrap(), SalaryRange::Between(40000, 60000));
        assert_eq!(" 80000 ".parse::<SalaryRange>().unwrap(), SalaryRange::AtLeast(80000));
        assert_eq!("1 - 2".parse::<SalaryRange>().unwrap(), SalaryRange::Between(1, 2));
    }

    #[test]
    fn test_parse_salary_spec_rejects_garbage() {
        for spec in ["abc-60000", "40000-xyz", "abc", "", "-5", "40000-", "1-2-3"] {
            let err = spec.parse::<SalaryRange>().unwrap_err();
            assert!(matches!(err, AppError::InvalidFilterSpec { .. }), "{spec}");
        }
    }

    #[test]
    fn test_salary_range_keeps_only_inside() {
        let list = vec![
            vacancy(1, Some(30000), "Москва", ""),
            vacancy(2, Some(50000), "Москва", ""),
            vacancy(3, Some(70000), "Москва", ""),
        ];
        let kept = by_salary_range(list, "40000-60000").unwrap();
        assert_eq!(ids(&kept), vec![2]);
    }

    #[test]
    fn test_salary_range_bounds_inclusive() {
        let list = vec![vacancy(1, Some(40000), "", ""), vacancy(2, Some(60000), "", "")];
        assert_eq!(ids(&by_salary_range(list, "40000-60000").unwrap()), vec![1, 2]);
    }

    #[test]
    fn test_salary_minimum_only() {
        let list = vec![
            vacancy(1, Some(79999), "", ""),
            vacancy(2, Some(80000), "", ""),
            vacancy(3, None, "", ""),
        ];
        assert_eq!(ids(&by_salary_range(list, "80000").unwrap()), vec![2]);
    }

    #[test]
    fn test_invalid_salary_spec_is_error() {
        let list = vec![vacancy(1, Some(1), "", "")];
        assert!(matches!(
            by_salary_range(list, "lots"),
            Err(AppError::InvalidFilterSpec { .. })
        ));
    }

    #[test]
    fn test_region_case_insensitive() {
        let list = vec![
            vacancy(1, None, "Moscow", ""),
            vacancy(2, None, "MOSCOW region", ""),
            vacancy(3, None, "Tomsk", ""),
            vacancy(4, None, "Московская область", ""),
        ];
        assert_eq!(ids(&by_region(list.clone(), "moscow")), vec![1, 2]);
        assert_eq!(ids(&by_region(list, "МОСКОВ")), vec![4]);
    }

    #[test]
    fn test_keyword_checks_both_texts() {
        let mut in_responsibility = vacancy(2, None, "", "");
        in_responsibility.requirement = "SQL".to_string();
        in_responsibility.responsibility = "Поддержка RUST сервисов".to_string();
        let mut neither = vacancy(3, None, "", "");
        neither.requirement = "Go".to_string();
        neither.responsibility = "Kubernetes".to_string();

        let list = vec![vacancy(1, None, "", ""), in_responsibility, neither];
        assert_eq!(ids(&by_keyword(list, "rust")), vec![1, 2]);
    }

    #[test]
    fn test_low_experience_is_permissive() {
        let list = vec![
            vacancy(1, None, "", "Нет опыта"),
            vacancy(2, None, "", "Без опыта"),
            vacancy(3, None, "", "От 1 года до 3 лет"),
            vacancy(4, None, "", "От 3 до 6 лет"),
            vacancy(5, None, "", "Более 10 лет"),
            vacancy(6, None, "", ""),
        ];
        assert_eq!(ids(&by_low_experience(list)), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_no_experience_ignores_case_and_padding() {
        let list = vec![
            vacancy(1, None, "", "НЕТ ОПЫТА"),
            vacancy(2, None, "", " без опыта "),
            vacancy(3, None, "", "Нет опыта работы"),
        ];
        assert_eq!(ids(&by_low_experience(list)), vec![1, 2]);
    }

    #[test]
    fn test_filters_compose_in_order() {
        let list = vec![
            vacancy(1, Some(50000), "Москва", "Нет опыта"),
            vacancy(2, Some(50000), "Томск", "Нет опыта"),
            vacancy(3, Some(90000), "Москва", "Нет опыта"),
            vacancy(4, Some(55000), "Москва", "От 3 до 6 лет"),
        ];
        let filters = vec![
            Filter::Salary("40000-60000".parse().unwrap()),
            Filter::Region("моск".to_string()),
            Filter::LowExperience,
        ];
        assert_eq!(ids(&apply_all(&filters, list)), vec![1]);
    }
}
