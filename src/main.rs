//! Fitness AI proxy server
//!
//! HTTP service that fronts the OpenAI chat completions API for the
//! fitness app. The server holds the upstream key, applies app-wide
//! completion defaults, and serves the AI-quota badge fragment.

use anyhow::{Context, Result};
use tracing::info;

use fitproxy::config::Settings;
use fitproxy::handlers::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Load settings from environment
    let settings = Settings::new().context("Failed to load server settings")?;
    info!("Server settings loaded");

    // Report key presence as a boolean only, the value stays out of logs
    info!(
        "Upstream API key configured: {}",
        settings.upstream_configured()
    );

    // Build server address before the settings move into the router
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Create router
    let app = create_router(settings).await?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 Fitness AI proxy server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Completion endpoint: http://{}/api/openai", addr);
    info!("🏷️ Quota badge fragment: http://{}/fragments/quota-badge", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging() {
    // Get log level from environment variable, default to info
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Check if JSON format should be used
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}
