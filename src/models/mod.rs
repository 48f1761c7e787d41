//! Data models module
//!
//! Defines the chat request shapes the proxy accepts and the quota state
//! that drives the badge fragment.

pub mod chat;
pub mod quota;

pub use chat::{
    ChatMessage, ProxyRequest, RawRequest, ResponseFormat, ResponseFormatObject, StructuredRequest,
    UpstreamRequest,
};
pub use quota::QuotaState;
