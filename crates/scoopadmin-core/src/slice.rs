// ── Request-state slices ──
//
// Three slice kinds, each a pure state machine:
// Idle → Pending → (Fulfilled | Rejected), re-entrant. Transitions
// are driven by explicit events so they are testable without any
// rendering or network environment.
//
// Invariants:
// - a List slice keeps its previous `items` through Pending and
//   Rejected (the table never blanks on a failed refresh);
// - a Detail slice clears `data` the moment a new fetch starts, so a
//   stale record never flashes while the next one loads;
// - a Mutation slice never touches the List slice; resynchronization
//   is an explicit refetch composed at the call site.

use scoopadmin_api::Pagination;

// ── List ────────────────────────────────────────────────────────────

/// State of a paginated collection fetch.
#[derive(Debug, Clone)]
pub struct ListSlice<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
        }
    }
}

/// Transition events for a [`ListSlice`].
#[derive(Debug, Clone)]
pub enum ListEvent<T> {
    Pending,
    Fulfilled {
        items: Vec<T>,
        pagination: Pagination,
    },
    Rejected {
        error: String,
    },
}

impl<T> ListSlice<T> {
    /// Apply one transition event.
    pub fn apply(&mut self, event: ListEvent<T>) {
        match event {
            ListEvent::Pending => {
                self.loading = true;
                self.error = None;
            }
            ListEvent::Fulfilled { items, pagination } => {
                self.items = items;
                self.pagination = Some(pagination);
                self.loading = false;
                self.error = None;
            }
            ListEvent::Rejected { error } => {
                // Previous items stay visible behind the error panel.
                self.loading = false;
                self.error = Some(error);
            }
        }
    }

    /// User-driven dismissal of the error banner.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

// ── Detail ──────────────────────────────────────────────────────────

/// State of a single-record fetch (edit screens, detail panes).
#[derive(Debug, Clone)]
pub struct DetailSlice<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for DetailSlice<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Transition events for a [`DetailSlice`].
#[derive(Debug, Clone)]
pub enum DetailEvent<T> {
    Pending,
    Fulfilled { data: T },
    Rejected { error: String },
}

impl<T> DetailSlice<T> {
    pub fn apply(&mut self, event: DetailEvent<T>) {
        match event {
            DetailEvent::Pending => {
                // Clear the stale record before the new one lands.
                self.data = None;
                self.loading = true;
                self.error = None;
            }
            DetailEvent::Fulfilled { data } => {
                self.data = Some(data);
                self.loading = false;
                self.error = None;
            }
            DetailEvent::Rejected { error } => {
                self.data = None;
                self.loading = false;
                self.error = Some(error);
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

// ── Mutation ────────────────────────────────────────────────────────

/// State of a create/update/delete call. Independent of the list
/// slice by construction: there is no `items` here to corrupt.
#[derive(Debug, Clone, Default)]
pub struct MutationSlice {
    pub loading: bool,
    pub error: Option<String>,
    /// Id of the affected record on success (new id for create).
    pub result_id: Option<String>,
}

/// Transition events for a [`MutationSlice`].
#[derive(Debug, Clone)]
pub enum MutationEvent {
    Pending,
    Fulfilled { result_id: Option<String> },
    Rejected { error: String },
}

impl MutationSlice {
    pub fn apply(&mut self, event: MutationEvent) {
        match event {
            MutationEvent::Pending => {
                self.loading = true;
                self.error = None;
                self.result_id = None;
            }
            MutationEvent::Fulfilled { result_id } => {
                self.loading = false;
                self.error = None;
                self.result_id = result_id;
            }
            MutationEvent::Rejected { error } => {
                self.loading = false;
                self.error = Some(error);
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64) -> Pagination {
        Pagination::compute(1, 10, total)
    }

    #[test]
    fn list_pending_keeps_items_and_clears_error() {
        let mut slice: ListSlice<u32> = ListSlice::default();
        slice.apply(ListEvent::Fulfilled {
            items: vec![1, 2, 3],
            pagination: page(3),
        });
        slice.apply(ListEvent::Rejected {
            error: "boom".into(),
        });
        assert_eq!(slice.items, vec![1, 2, 3]);
        assert_eq!(slice.error.as_deref(), Some("boom"));

        slice.apply(ListEvent::Pending);
        assert!(slice.loading);
        assert!(slice.error.is_none());
        assert_eq!(slice.items, vec![1, 2, 3]);
    }

    #[test]
    fn list_rejected_keeps_previous_items() {
        let mut slice: ListSlice<u32> = ListSlice::default();
        slice.apply(ListEvent::Fulfilled {
            items: vec![7],
            pagination: page(1),
        });
        slice.apply(ListEvent::Pending);
        slice.apply(ListEvent::Rejected {
            error: "offline".into(),
        });
        assert_eq!(slice.items, vec![7]);
        assert!(!slice.loading);
    }

    #[test]
    fn identical_fulfillments_are_idempotent() {
        // The same query twice yields identical list state.
        let mut a: ListSlice<u32> = ListSlice::default();
        let mut b: ListSlice<u32> = ListSlice::default();
        for slice in [&mut a, &mut b] {
            slice.apply(ListEvent::Pending);
            slice.apply(ListEvent::Fulfilled {
                items: vec![1, 2],
                pagination: page(2),
            });
        }
        // apply the same fetch to `a` a second time
        a.apply(ListEvent::Pending);
        a.apply(ListEvent::Fulfilled {
            items: vec![1, 2],
            pagination: page(2),
        });
        assert_eq!(a.items, b.items);
        assert_eq!(a.pagination, b.pagination);
    }

    #[test]
    fn detail_pending_clears_stale_data() {
        // No stale-entity flash between fetches.
        let mut slice: DetailSlice<&str> = DetailSlice::default();
        slice.apply(DetailEvent::Fulfilled { data: "banner-1" });
        assert!(slice.data.is_some());

        slice.apply(DetailEvent::Pending);
        assert!(slice.data.is_none());
        assert!(slice.loading);
    }

    #[test]
    fn detail_rejected_has_no_data() {
        let mut slice: DetailSlice<&str> = DetailSlice::default();
        slice.apply(DetailEvent::Pending);
        slice.apply(DetailEvent::Rejected {
            error: "not found".into(),
        });
        assert!(slice.data.is_none());
        assert!(!slice.loading);
        assert_eq!(slice.error.as_deref(), Some("not found"));
    }

    #[test]
    fn mutation_cycle_is_reentrant() {
        let mut slice = MutationSlice::default();
        slice.apply(MutationEvent::Pending);
        slice.apply(MutationEvent::Rejected {
            error: "invalid".into(),
        });
        assert_eq!(slice.error.as_deref(), Some("invalid"));

        slice.apply(MutationEvent::Pending);
        assert!(slice.error.is_none());
        slice.apply(MutationEvent::Fulfilled {
            result_id: Some("42".into()),
        });
        assert!(!slice.loading);
        assert_eq!(slice.result_id.as_deref(), Some("42"));
    }
}
