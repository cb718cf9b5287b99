// ── Product domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product within a storefront section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    /// Section/category key, e.g. `"cones"`.
    #[serde(default)]
    pub section: Option<String>,
    /// Media paths relative to the static-media base URL.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
