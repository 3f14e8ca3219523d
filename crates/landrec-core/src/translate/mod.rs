//! Language normalization of section text.
//!
//! Sections are translated once into the working language. Any failure of
//! the translation backend is logged and the section is used as written;
//! translation is never retried.

mod libre;

pub use libre::LibreTranslateClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TranslationError;
use crate::models::config::TranslationConfig;

/// Trait for translation backends.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target` language.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError>;
}

/// What happened to a section during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// The backend returned a translation.
    Translated,
    /// The backend failed; the original text was used.
    Fallback,
    /// Translation is disabled; the original text was used.
    Skipped,
}

/// Normalized section text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub status: Normalization,
}

/// Translates section text, degrading to the original on failure.
#[derive(Clone)]
pub struct Normalizer {
    translator: Option<Arc<dyn Translator>>,
    source_language: String,
    target_language: String,
}

impl Normalizer {
    /// Normalizer over the given backend, translating from Tamil.
    pub fn new(translator: Arc<dyn Translator>, target_language: impl Into<String>) -> Self {
        Self {
            translator: Some(translator),
            source_language: "ta".to_string(),
            target_language: target_language.into(),
        }
    }

    /// Normalizer that leaves text untouched.
    pub fn disabled() -> Self {
        Self {
            translator: None,
            source_language: "ta".to_string(),
            target_language: "en".to_string(),
        }
    }

    /// Build a normalizer from configuration.
    ///
    /// An HTTP client that cannot be constructed disables translation
    /// rather than failing the pipeline.
    pub fn from_config(config: &TranslationConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        match LibreTranslateClient::new(config) {
            Ok(client) => Self::new(Arc::new(client), config.target_language.clone())
                .with_source_language(config.source_language.clone()),
            Err(e) => {
                warn!("Translation client unavailable, continuing untranslated: {}", e);
                Self::disabled()
            }
        }
    }

    /// Set the source language passed to the backend.
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.translator.is_some()
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Normalize text into the target language.
    pub async fn normalize(&self, text: &str) -> String {
        self.normalize_with_status(text).await.text
    }

    /// Normalize text and report whether translation took place.
    pub async fn normalize_with_status(&self, text: &str) -> Normalized {
        let Some(translator) = &self.translator else {
            return Normalized {
                text: text.to_string(),
                status: Normalization::Skipped,
            };
        };

        match translator
            .translate(text, &self.source_language, &self.target_language)
            .await
        {
            Ok(translated) => {
                debug!("Translated section ({} -> {} chars)", text.len(), translated.len());
                Normalized {
                    text: translated,
                    status: Normalization::Translated,
                }
            }
            Err(e) => {
                warn!("Translation failed, using original text: {}", e);
                Normalized {
                    text: text.to_string(),
                    status: Normalization::Fallback,
                }
            }
        }
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("enabled", &self.is_enabled())
            .field("source_language", &self.source_language)
            .field("target_language", &self.target_language)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
            assert_eq!(source, "ta");
            assert_eq!(target, "en");
            Ok(text.to_uppercase())
        }
    }

    struct Failing {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Translator for Failing {
        async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TranslationError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_successful_translation() {
        let normalizer = Normalizer::new(Arc::new(Upper), "en");
        let normalized = normalizer.normalize_with_status("sr. no. : 1").await;

        assert_eq!(normalized.text, "SR. NO. : 1");
        assert_eq!(normalized.status, Normalization::Translated);
    }

    #[tokio::test]
    async fn test_failure_returns_original_without_retry() {
        let failing = Arc::new(Failing {
            calls: AtomicUsize::new(0),
        });
        let normalizer = Normalizer::new(failing.clone(), "en");

        let normalized = normalizer.normalize_with_status("வ. எண் : 1").await;

        assert_eq!(normalized.text, "வ. எண் : 1");
        assert_eq!(normalized.status, Normalization::Fallback);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_is_identity() {
        let normalizer = Normalizer::disabled();
        let normalized = normalizer.normalize_with_status("text").await;

        assert_eq!(normalized.text, "text");
        assert_eq!(normalized.status, Normalization::Skipped);
        assert!(!normalizer.is_enabled());
    }

    #[test]
    fn test_from_config_disabled() {
        let config = TranslationConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!Normalizer::from_config(&config).is_enabled());
    }
}
