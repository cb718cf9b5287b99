// ── Customer domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered customer. Aggregates (`orders_count`, `total_spent`)
/// are computed backend-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub orders_count: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
