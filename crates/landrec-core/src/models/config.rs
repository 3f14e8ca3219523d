//! Configuration structures for the parsing pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{LandrecError, Result};

/// Main configuration for the landrec pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandrecConfig {
    /// Translation service configuration.
    pub translation: TranslationConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Translation service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translate sections before extraction.
    pub enabled: bool,

    /// Base URL of a LibreTranslate-compatible service.
    pub endpoint: String,

    /// API key, if the service requires one.
    pub api_key: Option<String>,

    /// Language of the source documents.
    pub source_language: String,

    /// Working language the field labels are written in.
    pub target_language: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://libretranslate.de".to_string(),
            api_key: None,
            source_language: "ta".to_string(),
            target_language: "en".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Sections normalized and extracted at the same time.
    pub max_concurrent_sections: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sections: 4,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted text length to treat the PDF as readable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 20 }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON-lines file holding persisted transactions.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("transactions.jsonl"),
        }
    }
}

impl LandrecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| LandrecError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| LandrecError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LandrecConfig =
            serde_json::from_str(r#"{"translation": {"enabled": false}}"#).unwrap();

        assert!(!config.translation.enabled);
        assert_eq!(config.translation.source_language, "ta");
        assert_eq!(config.translation.target_language, "en");
        assert_eq!(config.extraction.max_concurrent_sections, 4);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = LandrecConfig::default();
        config.translation.endpoint = "http://localhost:5000".to_string();
        config.save(&path).unwrap();

        let loaded = LandrecConfig::from_file(&path).unwrap();
        assert_eq!(loaded.translation.endpoint, "http://localhost:5000");
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = LandrecConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, LandrecError::Config(_)));
    }
}
