//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod badge;
pub mod health;
pub mod proxy;

use crate::config::Settings;
use crate::middleware::request_logging;
use crate::services::{CompletionProvider, OpenAIProvider};
use anyhow::Result;
use axum::http::HeaderValue;
use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub provider: Arc<dyn CompletionProvider>,
}

/// Create application router backed by the real OpenAI provider
pub async fn create_router(settings: Settings) -> Result<Router> {
    let provider = Arc::new(OpenAIProvider::new(settings.upstream.clone())?);
    Ok(build_router(settings, provider))
}

/// Assemble the application router around any completion provider
pub fn build_router(settings: Settings, provider: Arc<dyn CompletionProvider>) -> Router {
    let max_request_size = settings.request.max_request_size;
    let cors = cors_layer(&settings.security.allowed_origins);

    // Create application state
    let app_state = Arc::new(AppState { settings, provider });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_request_size))
        .layer(cors);

    // Create routes. The completion endpoint is POST-only, every other
    // method lands on the fallback.
    Router::new()
        .route(
            "/api/openai",
            post(proxy::completions).fallback(proxy::method_not_allowed),
        )
        .route("/fragments/quota-badge", get(badge::quota_badge))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .layer(middleware::from_fn(request_logging))
        .with_state(app_state)
        .layer(middleware_stack)
}

/// Build the CORS layer from the configured origin list
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
