//! Service layer module
//!
//! Contains the upstream completion provider and the in-process call helper

pub mod estimate;
pub mod upstream;

pub use estimate::{EstimateClient, EstimateError, PROXY_PATH};
pub use upstream::{CompletionProvider, OpenAIProvider, UpstreamError};
