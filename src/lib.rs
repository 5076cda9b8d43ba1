// src/lib.rs

//! Vacancy aggregator library.
//!
//! Fetches listings from HeadHunter and SuperJob, stores the raw responses,
//! and turns them into one filterable, sortable list of [`models::Vacancy`].

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
