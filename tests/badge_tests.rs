//! Quota badge fragment endpoint tests
//!
//! Drives GET /fragments/quota-badge through the full router and checks
//! the rendered HTML against the badge rules.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fitproxy::config::{
    ClientConfig, CompletionDefaults, LoggingConfig, RequestConfig, SecurityConfig, ServerConfig,
    Settings, UpstreamConfig,
};
use fitproxy::handlers::create_router;
use tower::ServiceExt;

fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8082,
        },
        upstream: UpstreamConfig {
            api_key: Some("sk-test-key".to_string()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: 5,
            defaults: CompletionDefaults {
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
            },
        },
        client: ClientConfig { base_url: None },
        request: RequestConfig {
            max_request_size: 1_048_576,
        },
        security: SecurityConfig {
            allowed_origins: vec!["*".to_string()],
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

async fn badge_app() -> Router {
    create_router(test_settings())
        .await
        .expect("Failed to create router")
}

async fn get_fragment(app: Router, query: &str) -> (StatusCode, String) {
    let uri = if query.is_empty() {
        "/fragments/quota-badge".to_string()
    } else {
        format!("/fragments/quota-badge?{}", query)
    };

    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_free_user_badge_fragment() {
    let (status, body) = get_fragment(badge_app().await, "remaining=3&limit=30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "<span class=\"quota-badge quota-badge--md\">Free: 3/30</span>"
    );
}

#[tokio::test]
async fn test_fragment_content_type_is_html() {
    let app = badge_app().await;
    let request = Request::builder()
        .uri("/fragments/quota-badge?remaining=3&limit=30")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_zero_limit_fragment_is_empty() {
    let (status, body) = get_fragment(badge_app().await, "remaining=5&limit=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

#[tokio::test]
async fn test_missing_params_fragment_is_empty() {
    // All params default, so limit is 0 and the badge is suppressed
    let (status, body) = get_fragment(badge_app().await, "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

#[tokio::test]
async fn test_pro_fragment_shows_unlimited() {
    let (status, body) =
        get_fragment(badge_app().await, "remaining=0&limit=100&isPro=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "<span class=\"quota-badge quota-badge--md quota-badge--pro\">Unlimited</span>"
    );
}

#[tokio::test]
async fn test_exhausted_fragment_is_muted_not_empty() {
    let (status, body) = get_fragment(badge_app().await, "remaining=0&limit=30").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("quota-badge--exhausted"));
    assert!(body.contains("Free: 0/30"));
}

#[tokio::test]
async fn test_negative_remaining_fragment() {
    let (status, body) = get_fragment(badge_app().await, "remaining=-2&limit=30").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("quota-badge--exhausted"));
    assert!(body.contains("Free: -2/30"));
}

#[tokio::test]
async fn test_small_size_fragment() {
    let (status, body) = get_fragment(badge_app().await, "remaining=3&limit=30&size=sm").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("quota-badge--sm"));
}

#[tokio::test]
async fn test_custom_label_fragment() {
    let (status, body) =
        get_fragment(badge_app().await, "remaining=1&limit=5&label=Team%20plan").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Team plan: 1/5"));
}

#[tokio::test]
async fn test_label_is_escaped_in_fragment() {
    let (status, body) = get_fragment(
        badge_app().await,
        "remaining=1&limit=2&label=%3Cb%3EX%3C%2Fb%3E",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("&lt;b&gt;X&lt;/b&gt;: 1/2"));
    assert!(!body.contains("<b>"));
}

#[tokio::test]
async fn test_unknown_size_is_rejected() {
    let (status, _body) = get_fragment(badge_app().await, "remaining=3&limit=30&size=xl").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
