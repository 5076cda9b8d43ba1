//! Pipeline entry points.
//!
//! - `run_fetch`: Query providers and store raw records under a label
//! - `run_process`: Reload, filter, sort, select, delete and save

pub mod fetch;
pub mod filter;
pub mod process;
pub mod sort;

pub use fetch::{FetchJob, FetchReport, ProviderOutcome, run_fetch};
pub use filter::{
    Filter, SalaryRange, apply_all, by_keyword, by_low_experience, by_region, by_salary_range,
};
pub use process::{ProcessOptions, ProcessReport, run_process};
pub use sort::{salary_key, sort_by, sort_by_salary, top_n};
