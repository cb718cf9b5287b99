// ── List orchestration ──
//
// Pagination, search and per-page-size state for one list screen.
// The controller is pure: it turns user intents into the next
// `ListQuery` and leaves the actual fetch to the dispatcher, so every
// rule here is testable without a network.

use scoopadmin_api::{ListQuery, Pagination, ResourceKind};

use crate::events::DomainEvent;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-screen list state: current page, page size, search text and
/// extra filters for one resource kind.
#[derive(Debug, Clone)]
pub struct ListController {
    kind: ResourceKind,
    page: u32,
    limit: u32,
    search: String,
    filters: Vec<(String, String)>,
}

impl ListController {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            filters: Vec::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The query for the current state, ready for the dispatcher.
    pub fn query(&self) -> ListQuery {
        self.query_for_page(self.page)
    }

    fn query_for_page(&self, page: u32) -> ListQuery {
        let mut query = ListQuery::new().page(page).limit(self.limit);
        if !self.search.is_empty() {
            query = query.search(&self.search);
        }
        for (key, value) in &self.filters {
            query = query.filter(key, value);
        }
        query
    }

    /// Change the search text. Any change resets to page 1 so the
    /// narrowed result set is shown from its start.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Change the page size. Resets to page 1: the old offset is
    /// meaningless under a new page geometry.
    pub fn set_limit(&mut self, limit: u32) {
        let limit = limit.max(1);
        if limit != self.limit {
            self.limit = limit;
            self.page = 1;
        }
    }

    /// Set an extra filter, replacing any previous value for the key.
    /// Resets to page 1 like a search change.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        if let Some(entry) = self.filters.iter_mut().find(|(k, _)| *k == key) {
            if entry.1 == value {
                return;
            }
            entry.1 = value;
        } else {
            self.filters.push((key, value));
        }
        self.page = 1;
    }

    /// Jump to a page, clamped to `[1, total_pages]` when the last
    /// known pagination is available.
    pub fn set_page(&mut self, page: u32, pagination: Option<&Pagination>) {
        let mut page = page.max(1);
        if let Some(p) = pagination {
            page = page.min(p.total_pages.max(1));
        }
        self.page = page;
    }

    /// Advance one page. A no-op on the last page; returns whether the
    /// page actually changed.
    pub fn next_page(&mut self, pagination: Option<&Pagination>) -> bool {
        let last = pagination.map_or(u32::MAX, |p| p.total_pages.max(1));
        if self.page < last {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. A no-op on page 1; returns whether the page
    /// actually changed.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// React to a domain event. Returns the query to refetch with when
    /// the event concerns this controller's resource. New records sort
    /// first, so the refetch always targets page 1 (keeping the current
    /// page size, search and filters) to make the arrival visible.
    pub fn handle_event(&self, event: &DomainEvent) -> Option<ListQuery> {
        match event {
            DomainEvent::ResourceAdded { kind } if *kind == self.kind => {
                Some(self.query_for_page(1))
            }
            DomainEvent::ResourceAdded { .. } => None,
        }
    }
}

/// Human-readable range line for the table footer, e.g. `11-20 of 53`.
/// An empty result set renders as `0-0 of 0`.
pub fn range_text(pagination: &Pagination) -> String {
    if pagination.total == 0 {
        return "0-0 of 0".to_owned();
    }
    let start = u64::from(pagination.page.saturating_sub(1)) * u64::from(pagination.limit) + 1;
    let end = (start + u64::from(pagination.limit) - 1).min(pagination.total);
    format!("{start}-{end} of {}", pagination.total)
}
