//! LibreTranslate HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Translator;
use crate::error::TranslationError;
use crate::models::config::TranslationConfig;

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct LibreTranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

/// LibreTranslate request format.
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// LibreTranslate response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

impl LibreTranslateClient {
    /// Create a client from translation settings.
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/translate", self.endpoint)
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!("Translating {} chars {} -> {} via {}", text.len(), source, target, self.endpoint);

        let response = self.client.post(self.url()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        if parsed.translated_text.trim().is_empty() && !text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = TranslateRequest {
            q: "வ. எண் : 1",
            source: "ta",
            target: "en",
            format: "text",
            api_key: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"q": "வ. எண் : 1", "source": "ta", "target": "en", "format": "text"})
        );
    }

    #[test]
    fn test_response_shape() {
        let parsed: TranslateResponse =
            serde_json::from_str(r#"{"translatedText": "Sr. No. : 1"}"#).unwrap();
        assert_eq!(parsed.translated_text, "Sr. No. : 1");

        assert!(serde_json::from_str::<TranslateResponse>(r#"{"error": "x"}"#).is_err());
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let config = TranslationConfig {
            endpoint: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        let client = LibreTranslateClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://localhost:5000/translate");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_error() {
        let config = TranslationConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = LibreTranslateClient::new(&config).unwrap();

        let result = client.translate("text", "ta", "en").await;
        assert!(matches!(result, Err(TranslationError::Http(_))));
    }
}
