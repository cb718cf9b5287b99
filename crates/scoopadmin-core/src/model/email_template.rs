// ── Email template domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transactional email template (order confirmation, delivery
/// notice, ...). The body is backend-rendered HTML with placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: String,
    /// Unique template key, e.g. `"order-confirmed"`.
    pub name: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
