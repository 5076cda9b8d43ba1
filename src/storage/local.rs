//! Local filesystem storage implementation.
//!
//! Files are pretty-printed UTF-8 JSON written atomically (temp file, then
//! rename), so an interrupted run never leaves a half-written list behind.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Provider, RawRecord, Vacancy};
use crate::storage::VacancyStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    fn raw_key(provider: Provider, label: &str) -> Result<String> {
        Ok(format!("{}_{}.json", provider.prefix(), file_label(label)?))
    }

    fn result_key(label: &str) -> Result<String> {
        Ok(format!("result_{}.json", file_label(label)?))
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl VacancyStorage for LocalStorage {
    async fn persist_raw(
        &self,
        provider: Provider,
        label: &str,
        records: &[RawRecord],
    ) -> Result<String> {
        let key = Self::raw_key(provider, label)?;
        self.write_json(&key, records).await?;
        log::info!("{}: {} raw records written to {}", provider, records.len(), key);
        Ok(self.path(&key).display().to_string())
    }

    async fn load_raw(&self, provider: Provider, label: &str) -> Result<Option<Vec<RawRecord>>> {
        let key = Self::raw_key(provider, label)?;
        // Older runs stored `null` for a provider that was not queried.
        let stored: Option<Option<Vec<RawRecord>>> = self.read_json(&key).await?;
        Ok(stored.map(Option::unwrap_or_default))
    }

    async fn save_result(&self, label: &str, vacancies: &[Vacancy]) -> Result<String> {
        let key = Self::result_key(label)?;
        self.write_json(&key, vacancies).await?;
        log::info!("{} vacancies written to {}", vacancies.len(), key);
        Ok(self.path(&key).display().to_string())
    }
}

/// Turn a user label into the file-name part: title-cased, no path separators.
///
/// `"rust developer"` becomes `"Rust Developer"`.
pub fn file_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::validation("label must not be empty"));
    }

    let mut out = String::with_capacity(label.len());
    let mut prev_alpha = false;
    for c in label.chars() {
        let c = if matches!(c, '/' | '\\') { '_' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    Ok(out)
}
