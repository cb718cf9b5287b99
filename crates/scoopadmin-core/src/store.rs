// ── Central reactive request-state store ──
//
// One group of slices per resource, each slice held in a `watch`
// channel so observers get push-based change notification. Slices are
// disjoint per resource-kind and per slice-kind: updating one never
// contends with or corrupts another. The store lives for the whole
// process; slices are never destroyed, only transitioned.

use tokio::sync::watch;

use crate::model::{Banner, CompanySettings, Customer, EmailTemplate, Order, Product};
use crate::slice::{
    DetailEvent, DetailSlice, ListEvent, ListSlice, MutationEvent, MutationSlice,
};

// ── SliceCell ───────────────────────────────────────────────────────

/// A single slice behind a `watch` channel.
///
/// Reads are cheap clones of the current snapshot; writes go through
/// `send_modify`, which updates unconditionally even with zero
/// receivers (an unmounted screen just means nobody is listening --
/// the write itself is still valid).
pub struct SliceCell<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> SliceCell<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Current snapshot.
    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Subscribe to changes.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Mutate the slice in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }
}

impl<S: Clone + Default> Default for SliceCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

// ── Per-resource slice group ────────────────────────────────────────

/// The full slice group for one collection resource: list, detail,
/// and the three independent mutation slices.
pub struct ResourceSlices<T: Clone> {
    pub list: SliceCell<ListSlice<T>>,
    pub detail: SliceCell<DetailSlice<T>>,
    pub create: SliceCell<MutationSlice>,
    pub update: SliceCell<MutationSlice>,
    pub delete: SliceCell<MutationSlice>,
}

impl<T: Clone> Default for ResourceSlices<T> {
    fn default() -> Self {
        Self {
            list: SliceCell::default(),
            detail: SliceCell::default(),
            create: SliceCell::default(),
            update: SliceCell::default(),
            delete: SliceCell::default(),
        }
    }
}

impl<T: Clone> ResourceSlices<T> {
    pub fn apply_list(&self, event: ListEvent<T>) {
        self.list.update(|slice| slice.apply(event));
    }

    pub fn apply_detail(&self, event: DetailEvent<T>) {
        self.detail.update(|slice| slice.apply(event));
    }

    pub fn apply_create(&self, event: MutationEvent) {
        self.create.update(|slice| slice.apply(event));
    }

    pub fn apply_update(&self, event: MutationEvent) {
        self.update.update(|slice| slice.apply(event));
    }

    pub fn apply_delete(&self, event: MutationEvent) {
        self.delete.update(|slice| slice.apply(event));
    }
}

/// Slice group for the settings singleton (no list, no delete).
#[derive(Default)]
pub struct SettingsSlices {
    pub detail: SliceCell<DetailSlice<CompanySettings>>,
    pub update: SliceCell<MutationSlice>,
}

// ── AdminStore ──────────────────────────────────────────────────────

/// Process-wide request-state store, one slice group per resource.
#[derive(Default)]
pub struct AdminStore {
    pub banners: ResourceSlices<Banner>,
    pub email_templates: ResourceSlices<EmailTemplate>,
    pub orders: ResourceSlices<Order>,
    pub customers: ResourceSlices<Customer>,
    pub products: ResourceSlices<Product>,
    pub settings: SettingsSlices,
}

impl AdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoopadmin_api::Pagination;

    fn banner(id: &str) -> Banner {
        Banner {
            id: id.into(),
            title: format!("Banner {id}"),
            image: None,
            link: None,
            starts_at: None,
            ends_at: None,
            active: true,
            created_at: None,
        }
    }

    #[test]
    fn mutations_never_touch_list_items() {
        // Only a list fetch changes `items`.
        let store = AdminStore::new();
        store.banners.apply_list(ListEvent::Fulfilled {
            items: vec![banner("1"), banner("2")],
            pagination: Pagination::compute(1, 10, 2),
        });

        store.banners.apply_delete(MutationEvent::Pending);
        store.banners.apply_delete(MutationEvent::Fulfilled {
            result_id: Some("1".into()),
        });
        store.banners.apply_create(MutationEvent::Rejected {
            error: "invalid".into(),
        });

        let list = store.banners.list.get();
        assert_eq!(list.items.len(), 2);
        assert!(list.error.is_none());

        let delete = store.banners.delete.get();
        assert!(!delete.loading);
        assert!(delete.error.is_none());
    }

    #[test]
    fn slices_are_independent_across_resources() {
        let store = AdminStore::new();
        store.orders.apply_list(ListEvent::Pending);
        assert!(store.orders.list.get().loading);
        assert!(!store.products.list.get().loading);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = AdminStore::new();
        let mut rx = store.customers.list.subscribe();

        store.customers.apply_list(ListEvent::<Customer>::Pending);
        rx.changed().await.expect("sender alive");
        assert!(rx.borrow_and_update().loading);
    }
}
