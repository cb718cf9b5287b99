// ── Company settings & dashboard summary ──

use serde::{Deserialize, Serialize};

/// The company-settings singleton (one record per deployment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub delivery_fee: f64,
}

/// Read-only aggregate for the dashboard screen. All numbers are
/// computed backend-side; this is pure consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub orders_today: u64,
    #[serde(default)]
    pub revenue_today: f64,
    #[serde(default)]
    pub pending_orders: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub total_products: u64,
}
