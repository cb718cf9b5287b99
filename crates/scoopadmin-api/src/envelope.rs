// Canonical response envelope.
//
// Every backend endpoint answers `{ success, data?, message?, error?,
// pagination? }`. Deviations are contract violations surfaced as
// deserialization errors -- never special-cased per resource.

use serde::{Deserialize, Serialize};

/// The `{ success, data, message, error, pagination }` wrapper.
///
/// Optional fields rely on serde's implicit missing-`Option` handling;
/// an explicit `#[serde(default)]` on `data` would force a `T: Default`
/// bound onto every payload type.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// The failure message for a `success:false` envelope: `error`
    /// takes precedence over `message`.
    pub fn failure_message(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }
}

/// Pagination metadata attached to list responses.
///
/// `page` is 1-based; `total_pages == ceil(total / limit)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Build pagination metadata from raw counts.
    pub fn compute(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// One page of a list response, with the envelope already stripped.
#[derive(Debug, Clone)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn compute_rounds_total_pages_up() {
        assert_eq!(Pagination::compute(1, 10, 25).total_pages, 3);
        assert_eq!(Pagination::compute(1, 10, 30).total_pages, 3);
        assert_eq!(Pagination::compute(1, 10, 31).total_pages, 4);
        assert_eq!(Pagination::compute(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::compute(1, 1, 1).total_pages, 1);
    }

    #[test]
    fn failure_message_prefers_error_field() {
        let env: Envelope<()> = serde_json::from_str(
            r#"{"success":false,"error":"boom","message":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(env.failure_message().as_deref(), Some("boom"));
    }

    #[test]
    fn missing_success_field_reads_as_failure() {
        let env: Envelope<Vec<u8>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert!(!env.success);
    }

    #[test]
    fn payload_type_needs_no_default_impl() {
        // Compiles (and parses) for payload types without `Default`.
        struct Plain {
            #[allow(dead_code)]
            id: String,
        }
        impl<'de> serde::Deserialize<'de> for Plain {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                Ok(Self {
                    id: String::deserialize(d)?,
                })
            }
        }

        let env: Envelope<Plain> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.data.is_none());
    }
}
