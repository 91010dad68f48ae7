//! Persisted wake phrase (`~/.mesmerizer/user_config.json`)
//!
//! The record is `{"wake_phrase": "..."}`. It is written exactly once, during
//! first-run setup, and only read afterwards.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Config;

/// On-disk shape of the wake phrase file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakePhraseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_phrase: Option<String>,
}

/// Location of the wake phrase record
#[derive(Debug, Clone)]
pub struct WakePhraseFile {
    path: PathBuf,
}

impl WakePhraseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file in the global config directory
    pub fn global() -> Self {
        Self::new(Config::global_config_dir().join("user_config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record; `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<WakePhraseRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let record: WakePhraseRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(record))
    }

    /// Stored phrase, or `default` when the file exists but has no usable entry.
    ///
    /// Returns `None` only when the file is missing.
    pub fn load_phrase(&self, default: &str) -> Result<Option<String>> {
        Ok(self.load()?.map(|record| {
            record
                .wake_phrase
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| default.to_lowercase())
        }))
    }

    /// Persist the phrase (lowercased). Refuses to overwrite an existing file.
    pub fn save_once(&self, phrase: &str) -> Result<String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let phrase = phrase.trim().to_lowercase();
        let record = WakePhraseRecord {
            wake_phrase: Some(phrase.clone()),
        };
        let json = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .with_context(|| format!("Wake phrase file already written: {}", self.path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let file = WakePhraseFile::new(dir.path().join("user_config.json"));
        assert_eq!(file.load_phrase("hey mesmerizer").unwrap(), None);
    }

    #[test]
    fn test_save_once_then_load() {
        let dir = tempdir().unwrap();
        let file = WakePhraseFile::new(dir.path().join("user_config.json"));

        assert_eq!(file.save_once("  Hello Computer ").unwrap(), "hello computer");
        assert_eq!(
            file.load_phrase("hey mesmerizer").unwrap().as_deref(),
            Some("hello computer")
        );

        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(raw, r#"{"wake_phrase":"hello computer"}"#);
    }

    #[test]
    fn test_save_once_never_rewrites() {
        let dir = tempdir().unwrap();
        let file = WakePhraseFile::new(dir.path().join("user_config.json"));
        file.save_once("first").unwrap();

        assert!(file.save_once("second").is_err());
        assert_eq!(file.load_phrase("x").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_file_without_key_uses_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_config.json");
        std::fs::write(&path, "{}").unwrap();

        let file = WakePhraseFile::new(path);
        assert_eq!(
            file.load_phrase("Hey Mesmerizer").unwrap().as_deref(),
            Some("hey mesmerizer")
        );
    }
}
