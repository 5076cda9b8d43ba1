// src/pipeline/sort.rs

//! Salary ordering and top-N selection.

use crate::models::{TopNMode, Vacancy};

/// Sort key: minimum salary, vacancies without one first.
pub fn salary_key(vacancy: &Vacancy) -> Option<u64> {
    vacancy.salary_min
}

/// Stable ascending sort by an extracted key.
pub fn sort_by<K: Ord>(mut vacancies: Vec<Vacancy>, key: impl FnMut(&Vacancy) -> K) -> Vec<Vacancy> {
    vacancies.sort_by_key(key);
    vacancies
}

/// Stable ascending sort by minimum salary.
pub fn sort_by_salary(vacancies: Vec<Vacancy>) -> Vec<Vacancy> {
    sort_by(vacancies, salary_key)
}

/// Pick the highest salaries from an ascending list, highest first.
///
/// [`TopNMode::Exact`] returns `n` vacancies (or all, if fewer).
/// [`TopNMode::Legacy`] reproduces the historical slice `list[-1:-n:-1]`:
/// one fewer than requested, nothing at all for `n = 1`, and everything but
/// the lowest entry for `n = 0`.
pub fn top_n(sorted: Vec<Vacancy>, n: usize, mode: TopNMode) -> Vec<Vacancy> {
    let len = sorted.len();
    let keep = match mode {
        TopNMode::Exact => n.min(len),
        TopNMode::Legacy => match n {
            0 => len.saturating_sub(1),
            n if n <= len => n - 1,
            _ => len,
        },
    };
    sorted.into_iter().rev().take(keep).collect()
}
