// src/services/identity.rs

//! Vacancy id sequence.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id generator shared by everything that normalizes vacancies.
///
/// Starts at 1 and never resets. Ids are not tied to raw records, so reloading
/// the same raw file yields new ids.
#[derive(Debug)]
pub struct IdentityAllocator {
    next: AtomicU64,
}

impl IdentityAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Take the next id.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    #[cfg(test)]
    fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
