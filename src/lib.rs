//! Fitness AI proxy library
//!
//! Fronts the OpenAI chat completions API for the fitness app: the server
//! holds the upstream key, applies app-wide model and temperature defaults,
//! and relays upstream responses verbatim. Also renders the AI-quota badge
//! fragment shown in the app's account header.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{build_router, create_router, AppState};
pub use models::{ProxyRequest, QuotaState, UpstreamRequest};
pub use services::{CompletionProvider, EstimateClient, OpenAIProvider};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
