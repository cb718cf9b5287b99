// ── Banner domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A promotional banner shown in the storefront carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    /// Media path relative to the static-media base URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Optional click-through link.
    #[serde(default)]
    pub link: Option<String>,
    /// Start of the scheduling window.
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    /// End of the scheduling window.
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
