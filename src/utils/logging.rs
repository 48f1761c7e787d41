//! Logging utilities
//!
//! Shared logging helpers for request summaries. Prompts can be long and
//! may carry workout notes the user typed, so log lines carry truncated
//! previews rather than full payloads.

use crate::models::chat::{ChatMessage, UpstreamRequest};

/// Set to true to include full request payloads in debug logs.
/// Default is false to reduce log verbosity.
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length. Counts characters,
/// not bytes, so multibyte content cannot split a boundary.
pub(crate) fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let prefix: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", prefix, total - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered version of a chat message for logging
fn filter_message(message: &ChatMessage) -> serde_json::Value {
    // System prompts repeat on every request, truncate them harder
    let max_len = if message.role == "system" { 100 } else { 200 };
    serde_json::json!({
        "role": message.role,
        "content": truncate_content(&message.content, max_len),
    })
}

/// Create a filtered summary of an upstream request for logging.
/// Keeps the original structure but truncates verbose content.
pub fn create_request_log_summary(request: &UpstreamRequest) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        serde_json::to_value(request).unwrap_or(serde_json::json!({"error": "serialize failed"}))
    } else {
        let filtered_messages: Vec<serde_json::Value> =
            request.messages.iter().map(filter_message).collect();

        serde_json::json!({
            "model": request.model,
            "temperature": request.temperature,
            "response_format": request.response_format,
            "message_count": request.messages.len(),
            "messages": filtered_messages,
        })
    }
}
