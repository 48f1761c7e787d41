//! Quota badge data models
//!
//! The proxy does not meter usage itself. Quota accounting lives with the
//! app backend, which hands the badge a snapshot of what it knows.

use serde::{Deserialize, Serialize};

/// Snapshot of a user's AI estimate quota as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotaState {
    /// Estimates left in the current period. May go negative on overdraft.
    pub remaining: i32,
    /// Period allowance. Zero means quota does not apply to this user.
    pub limit: i32,
    /// Whether the user is on the pro plan
    pub is_pro: bool,
    /// Short plan label shown before the count
    pub label: String,
}

impl Default for QuotaState {
    fn default() -> Self {
        Self {
            remaining: 0,
            limit: 0,
            is_pro: false,
            label: default_label(),
        }
    }
}

/// Default plan label
pub(crate) fn default_label() -> String {
    "Free".to_string()
}

impl QuotaState {
    /// Whether the current period's allowance is used up
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }
}
