//! In-process call helper
//!
//! Typed client for the proxy's completion endpoint. Server-side app code
//! uses it the same way browser code uses fetch: it posts one of the two
//! accepted request shapes and never sees the upstream API key.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;
use crate::models::chat::{RawRequest, ResponseFormat, StructuredRequest};

/// Path the proxy serves completions on
pub const PROXY_PATH: &str = "/api/openai";

/// Errors surfaced by the call helper
#[derive(Error, Debug)]
pub enum EstimateError {
    /// The proxy answered with an error status
    #[error("proxy error (status {status}): {message}")]
    Api {
        /// Proxy HTTP status
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// The request never completed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the proxy's completion endpoint
#[derive(Debug, Clone)]
pub struct EstimateClient {
    client: Client,
    base_url: String,
}

impl EstimateClient {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("fitproxy-client/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from application settings. Uses the configured app
    /// base URL when present, otherwise this server's own listen address.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = match &settings.client.base_url {
            Some(url) => url.clone(),
            None => format!("http://{}:{}", settings.server.host, settings.server.port),
        };
        Self::new(base_url)
    }

    /// Base URL this client posts to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a structured {system, user} estimate request
    pub async fn estimate(&self, request: &StructuredRequest) -> Result<Value, EstimateError> {
        self.post(request).await
    }

    /// Send a raw pass-through completion request
    pub async fn complete(&self, request: &RawRequest) -> Result<Value, EstimateError> {
        self.post(request).await
    }

    /// Convenience wrapper for JSON-mode estimates: one system prompt, one
    /// user payload, response forced to a JSON object.
    pub async fn estimate_json(
        &self,
        system: impl Into<String>,
        user: Value,
    ) -> Result<Value, EstimateError> {
        let request = StructuredRequest {
            system: system.into(),
            user,
            response_format: Some(ResponseFormat::JsonObject),
        };
        self.post(&request).await
    }

    async fn post<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Value, EstimateError> {
        let url = format!("{}{}", self.base_url, PROXY_PATH);

        debug!("Posting completion request to {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json::<Value>().await?)
        } else {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .map(error_message)
                .unwrap_or_else(|| "unknown proxy error".to_string());
            Err(EstimateError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Flatten the `error` field of a proxy response into display text.
/// Handles both the proxy's own `{"error": "..."}` shape and relayed
/// OpenAI bodies where `error` is an object with a `message`.
fn error_message(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        other => other
            .get("message")
            .and_then(Value::as_str)
            .map(|s| s.to_string())
            .unwrap_or_else(|| other.to_string()),
    }
}
