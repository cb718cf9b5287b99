// List query parameters.
//
// Omitted or empty fields are never serialized: an empty search box
// means "no filter", not an explicit empty-string filter.

/// Query parameters for a list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// Resource-specific filters, e.g. `("status", "pending")` on orders.
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Flatten into query pairs, skipping unset and empty values.
    pub fn to_params(&self) -> Vec<(&str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() {
                params.push(("search", search.to_owned()));
            }
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                params.push((key.as_str(), value.clone()));
            }
        }
        params
    }
}
