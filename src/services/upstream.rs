//! Upstream completion service
//!
//! Encapsulates HTTP communication with the OpenAI chat completions API.
//! One request in, one request out: the proxy never retries, the caller
//! owns retry policy.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::models::chat::UpstreamRequest;

/// Errors from the upstream call path
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No API key configured. Nothing was sent upstream.
    #[error("no API key configured")]
    MissingKey,

    /// Upstream answered with a JSON error body, suitable for relay
    #[error("upstream API error (status {status})")]
    Api {
        /// Upstream HTTP status
        status: u16,
        /// Parsed JSON error body
        body: Value,
    },

    /// Upstream answered with a body that does not parse as JSON
    #[error("opaque upstream error (status {status})")]
    Opaque {
        /// Upstream HTTP status
        status: u16,
        /// Raw body text, for server-side logs only
        detail: String,
    },

    /// The request never completed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Completion backends the proxy can forward to
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one chat completion request and return the raw response body
    async fn create_completion(&self, request: UpstreamRequest) -> Result<Value, UpstreamError>;
}

/// OpenAI-backed completion provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    config: UpstreamConfig,
}

impl OpenAIProvider {
    /// Create a new provider instance
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent("fitproxy/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the chat completions URL, tolerating a trailing slash on the base
    fn build_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn create_completion(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        // Without a key nothing leaves the process
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingKey)?;

        debug!("Sending upstream chat completion request");

        let response = self
            .client
            .post(self.build_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let completion = response.json::<Value>().await?;
            debug!("Upstream request completed successfully");
            Ok(completion)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // A JSON error body can be relayed as-is, anything else stays opaque
            match serde_json::from_str::<Value>(&error_text) {
                Ok(body) => Err(UpstreamError::Api {
                    status: status.as_u16(),
                    body,
                }),
                Err(_) => Err(UpstreamError::Opaque {
                    status: status.as_u16(),
                    detail: error_text,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionDefaults;

    fn create_test_config(api_key: Option<&str>) -> UpstreamConfig {
        UpstreamConfig {
            api_key: api_key.map(|k| k.to_string()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: 30,
            defaults: CompletionDefaults {
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
            },
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new(create_test_config(Some("sk-test-key")));
        assert!(provider.is_ok());
    }

    #[test]
    fn test_build_url_handles_trailing_slash() {
        let mut config = create_test_config(Some("sk-test-key"));
        config.base_url = "https://api.openai.com/v1/".to_string();
        let provider = OpenAIProvider::new(config).unwrap();

        assert_eq!(
            provider.build_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_network_io() {
        // Unroutable base URL, the call must fail before reaching it
        let mut config = create_test_config(None);
        config.base_url = "http://127.0.0.1:9".to_string();
        let provider = OpenAIProvider::new(config).unwrap();

        let request = UpstreamRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![],
            temperature: 0.7,
            response_format: None,
        };

        let error = provider.create_completion(request).await.unwrap_err();
        assert!(matches!(error, UpstreamError::MissingKey));
    }
}
