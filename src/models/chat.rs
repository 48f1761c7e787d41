//! Chat request data models
//!
//! Defines the two request shapes the proxy accepts and the single
//! normalized shape it sends upstream. Classification happens once, at
//! the edge: the presence of a `messages` key decides which shape a body
//! claims, and a body never switches shape after that.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CompletionDefaults;

/// Chat message in the OpenAI wire format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Build a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Build a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response format a structured request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Force the model to emit a JSON object
    JsonObject,
    /// Plain text output
    Text,
}

/// Response format in the OpenAI wire shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseFormatObject {
    /// Format type
    #[serde(rename = "type")]
    pub format_type: String,
}

impl From<ResponseFormat> for ResponseFormatObject {
    fn from(format: ResponseFormat) -> Self {
        let format_type = match format {
            ResponseFormat::JsonObject => "json_object",
            ResponseFormat::Text => "text",
        };
        Self {
            format_type: format_type.to_string(),
        }
    }
}

/// Structured two-part request: one system prompt plus one user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRequest {
    /// System prompt
    pub system: String,
    /// User payload, a plain string or any JSON value
    pub user: Value,
    /// Requested response format (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Raw pass-through request already in the OpenAI message shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRequest {
    /// Message list, forwarded as-is
    pub messages: Vec<ChatMessage>,
    /// Model override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Temperature override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A client request in one of the two accepted shapes
#[derive(Debug, Clone)]
pub enum ProxyRequest {
    /// Structured {system, user} form
    Structured(StructuredRequest),
    /// Raw OpenAI-style form
    Raw(RawRequest),
}

impl ProxyRequest {
    /// Classify a JSON body and parse it into the shape it claims.
    ///
    /// A body with a `messages` key is raw and must carry an array there;
    /// any other `messages` value is rejected rather than re-read as the
    /// structured form. A body without `messages` must parse as
    /// `{system, user}`.
    pub fn from_value(body: Value) -> Result<Self, String> {
        match body.get("messages") {
            Some(Value::Array(_)) => serde_json::from_value::<RawRequest>(body)
                .map(ProxyRequest::Raw)
                .map_err(|_| "messages must be role/content pairs".to_string()),
            Some(_) => Err("messages must be an array".to_string()),
            None => serde_json::from_value::<StructuredRequest>(body)
                .map(ProxyRequest::Structured)
                .map_err(|_| "messages must be an array".to_string()),
        }
    }

    /// Normalize into the upstream wire shape, merging the app defaults
    /// for anything the caller omitted.
    pub fn resolve(self, defaults: &CompletionDefaults) -> UpstreamRequest {
        match self {
            ProxyRequest::Structured(request) => UpstreamRequest {
                model: defaults.model.clone(),
                messages: vec![
                    ChatMessage::system(request.system),
                    ChatMessage::user(user_text(&request.user)),
                ],
                temperature: defaults.temperature,
                response_format: request.response_format.map(Into::into),
            },
            ProxyRequest::Raw(request) => UpstreamRequest {
                model: request.model.unwrap_or_else(|| defaults.model.clone()),
                messages: request.messages,
                temperature: request.temperature.unwrap_or(defaults.temperature),
                response_format: None,
            },
        }
    }
}

/// Render the structured user payload as message text. Strings pass
/// through untouched, everything else becomes compact JSON.
fn user_text(user: &Value) -> String {
    match user {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Fully resolved request in the OpenAI chat completions wire shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamRequest {
    /// Model name
    pub model: String,
    /// Message list
    pub messages: Vec<ChatMessage>,
    /// Temperature parameter
    pub temperature: f32,
    /// Response format (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormatObject>,
}
