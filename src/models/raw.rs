//! Provider-shaped vacancy records.
//!
//! Connectors hand back untyped JSON ([`RawRecord`]) so raw files keep every
//! field the provider sent. These structs are the typed views the normalizer
//! reads; every field is optional because responses are not schema-validated.

use serde::Deserialize;

/// A single vacancy exactly as returned by a provider.
pub type RawRecord = serde_json::Value;

/// HeadHunter `items[]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HhVacancy {
    pub name: Option<String>,
    pub alternate_url: Option<String>,
    pub salary: Option<HhSalary>,
    pub area: Option<HhNamed>,
    pub snippet: Option<HhSnippet>,
    pub experience: Option<HhNamed>,
}

/// HeadHunter salary block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HhSalary {
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub currency: Option<String>,
}

/// HeadHunter `{ "name": ... }` reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HhNamed {
    pub name: Option<String>,
}

/// HeadHunter search snippet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HhSnippet {
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
}

/// SuperJob `objects[]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SjVacancy {
    pub profession: Option<String>,
    pub link: Option<String>,
    pub payment_from: Option<u64>,
    pub payment_to: Option<u64>,
    pub currency: Option<String>,
    pub town: Option<SjTitled>,
    pub candidat: Option<String>,
    pub work: Option<String>,
    pub experience: Option<SjTitled>,
}

/// SuperJob `{ "title": ... }` reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SjTitled {
    pub title: Option<String>,
}

/// One node of the HeadHunter `/areas` tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AreaNode {
    pub id: String,
    pub name: String,
    pub areas: Vec<AreaNode>,
}
