// src/services/areas.rs

//! HeadHunter region id lookup.

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{AreaNode, Provider};
use crate::utils::http::fetch_json;

/// A region (and optionally a town inside it) found in the area tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaMatch {
    pub region_id: String,
    pub region_name: String,
    pub town: Option<(String, String)>,
}

/// Looks up HeadHunter area ids by name.
pub struct AreaLookup {
    client: Client,
    areas_url: String,
}

impl AreaLookup {
    pub fn new(client: Client, areas_url: impl Into<String>) -> Self {
        Self {
            client,
            areas_url: areas_url.into(),
        }
    }

    /// Download the area tree and search it.
    pub async fn find(&self, region: &str, town: Option<&str>) -> Result<Option<AreaMatch>> {
        let tree: Vec<AreaNode> = fetch_json(self.client.get(&self.areas_url)).await?;
        let country = tree
            .first()
            .ok_or_else(|| AppError::provider(Provider::HeadHunter, "empty area tree"))?;
        Ok(find_in(country, region, town))
    }
}

/// Search the regions of `country` for `region`, then its children for `town`.
///
/// Names match when they contain the capitalised query.
pub fn find_in(country: &AreaNode, region: &str, town: Option<&str>) -> Option<AreaMatch> {
    let region_query = capitalize(region);
    let found = country
        .areas
        .iter()
        .find(|r| r.name.contains(&region_query))?;

    let town = match town {
        Some(name) => {
            let town_query = capitalize(name);
            let t = found.areas.iter().find(|t| t.name.contains(&town_query))?;
            Some((t.id.clone(), t.name.clone()))
        }
        None => None,
    };

    Some(AreaMatch {
        region_id: found.id.clone(),
        region_name: found.name.clone(),
        town,
    })
}

fn capitalize(s: &str) -> String {
    let lower = s.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
