//! Job board provider tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the supported job boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// hh.ru
    HeadHunter,
    /// superjob.ru
    SuperJob,
}

impl Provider {
    /// All providers in merge order.
    pub const ALL: [Provider; 2] = [Provider::HeadHunter, Provider::SuperJob];

    /// Short prefix used in raw file names.
    pub fn prefix(&self) -> &'static str {
        match self {
            Provider::HeadHunter => "hh",
            Provider::SuperJob => "sj",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::HeadHunter => "HeadHunter",
            Provider::SuperJob => "SuperJob",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
