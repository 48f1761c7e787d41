//! Quota badge fragment handlers
//!
//! Renders the AI-quota badge shown in the app's account header. The
//! badge is a pure function of the quota state the caller supplies; the
//! proxy itself never meters usage.

use crate::models::quota::QuotaState;
use axum::{extract::Query, response::Html};
use serde::Deserialize;

/// Badge display size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeSize {
    /// Compact variant for dense headers
    Sm,
    /// Standard variant
    #[default]
    Md,
}

impl BadgeSize {
    fn as_str(&self) -> &'static str {
        match self {
            BadgeSize::Sm => "sm",
            BadgeSize::Md => "md",
        }
    }
}

/// A renderable quota badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaBadge {
    /// Text shown inside the badge
    pub text: String,
    /// Display size
    pub size: BadgeSize,
    /// Pro styling, replaces the count entirely
    pub pro: bool,
    /// Muted styling for exhausted quota
    pub exhausted: bool,
}

impl QuotaBadge {
    /// CSS class list for the badge element
    fn class_attr(&self) -> String {
        let mut classes = format!("quota-badge quota-badge--{}", self.size.as_str());
        if self.pro {
            classes.push_str(" quota-badge--pro");
        }
        if self.exhausted {
            classes.push_str(" quota-badge--exhausted");
        }
        classes
    }

    /// Render the badge as an HTML span
    pub fn to_html(&self) -> String {
        format!(
            "<span class=\"{}\">{}</span>",
            self.class_attr(),
            escape_html(&self.text)
        )
    }
}

/// Decide what the badge shows for a given quota state.
///
/// Returns None when quota does not apply (zero limit), so callers render
/// nothing at all. Pro users always see the unlimited variant, even at
/// zero remaining. Everyone else sees "{label}: {remaining}/{limit}",
/// muted but still visible once the allowance is used up.
pub fn render_quota_badge(state: &QuotaState, size: BadgeSize) -> Option<QuotaBadge> {
    if state.limit == 0 {
        return None;
    }

    if state.is_pro {
        return Some(QuotaBadge {
            text: "Unlimited".to_string(),
            size,
            pro: true,
            exhausted: false,
        });
    }

    Some(QuotaBadge {
        text: format!("{}: {}/{}", state.label, state.remaining, state.limit),
        size,
        pro: false,
        exhausted: state.is_exhausted(),
    })
}

/// Minimal HTML escaping for text interpolated into the fragment
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Query parameters for the badge fragment endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeParams {
    #[serde(default)]
    remaining: i32,
    #[serde(default)]
    limit: i32,
    #[serde(default)]
    is_pro: bool,
    #[serde(default = "crate::models::quota::default_label")]
    label: String,
    #[serde(default)]
    size: BadgeSize,
}

impl BadgeParams {
    fn into_state(self) -> (QuotaState, BadgeSize) {
        (
            QuotaState {
                remaining: self.remaining,
                limit: self.limit,
                is_pro: self.is_pro,
                label: self.label,
            },
            self.size,
        )
    }
}

/// Render the quota badge fragment
///
/// GET /fragments/quota-badge
///
/// Answers an HTML fragment, empty when the badge is suppressed.
pub async fn quota_badge(Query(params): Query<BadgeParams>) -> Html<String> {
    let (state, size) = params.into_state();
    let html = match render_quota_badge(&state, size) {
        Some(badge) => badge.to_html(),
        None => String::new(),
    };
    Html(html)
}
