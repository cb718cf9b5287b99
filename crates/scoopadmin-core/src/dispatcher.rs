// ── Dispatcher ──
//
// Ties repository calls to slice transitions: Pending on dispatch,
// Fulfilled/Rejected on resolution, with a toast notification for
// every mutation outcome. List/detail failures surface through slice
// state only (the screen renders an error panel, not a toast).
//
// Ordering is deliberately last-write-wins: superseded requests are
// not cancelled and responses carry no sequence tag, so the most
// recently *resolved* response determines the final slice state. The
// race is documented and covered by a latency-controlled test.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::debug;

use scoopadmin_api::{ApiClient, ListQuery, MutationBody, ResourceKind};

use crate::error::CoreError;
use crate::model::{CompanySettings, DashboardSummary};
use crate::slice::{DetailEvent, ListEvent, MutationEvent};
use crate::store::{AdminStore, ResourceSlices};

const NOTIFICATION_CHANNEL_SIZE: usize = 64;

// ── Notifications ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient user-facing message (toast).
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

// ── Dispatcher ──────────────────────────────────────────────────────

/// Routes operations to the API client and records every outcome in
/// the store. Cheaply cloneable.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<ApiClient>,
    store: Arc<AdminStore>,
    notify_tx: broadcast::Sender<Notification>,
}

impl Dispatcher {
    pub fn new(client: Arc<ApiClient>, store: Arc<AdminStore>) -> Self {
        let (notify_tx, _) = broadcast::channel(NOTIFICATION_CHANNEL_SIZE);
        Self {
            client,
            store,
            notify_tx,
        }
    }

    pub fn store(&self) -> &Arc<AdminStore> {
        &self.store
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Subscribe to the toast stream.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }

    pub(crate) fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        // No subscribers is fine; the send just drops.
        let _ = self.notify_tx.send(Notification {
            level,
            message: message.into(),
        });
    }

    // ── List ─────────────────────────────────────────────────────────

    /// Fetch one page of a resource list into its List slice.
    pub async fn fetch_list(&self, kind: ResourceKind, query: &ListQuery) -> Result<(), CoreError> {
        match kind {
            ResourceKind::Banners => self.run_list(kind, &self.store.banners, query).await,
            ResourceKind::EmailTemplates => {
                self.run_list(kind, &self.store.email_templates, query).await
            }
            ResourceKind::Orders => self.run_list(kind, &self.store.orders, query).await,
            ResourceKind::Customers => self.run_list(kind, &self.store.customers, query).await,
            ResourceKind::Products => self.run_list(kind, &self.store.products, query).await,
        }
    }

    async fn run_list<T>(
        &self,
        kind: ResourceKind,
        slices: &ResourceSlices<T>,
        query: &ListQuery,
    ) -> Result<(), CoreError>
    where
        T: DeserializeOwned + Clone,
    {
        debug!(resource = %kind, ?query, "dispatching list fetch");
        slices.apply_list(ListEvent::Pending);

        match self.client.list::<T>(kind, query).await {
            Ok(page) => {
                slices.apply_list(ListEvent::Fulfilled {
                    items: page.items,
                    pagination: page.pagination,
                });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                slices.apply_list(ListEvent::Rejected {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    // ── Detail ───────────────────────────────────────────────────────

    /// Fetch a single record into its Detail slice.
    pub async fn fetch_detail(&self, kind: ResourceKind, id: &str) -> Result<(), CoreError> {
        match kind {
            ResourceKind::Banners => self.run_detail(kind, &self.store.banners, id).await,
            ResourceKind::EmailTemplates => {
                self.run_detail(kind, &self.store.email_templates, id).await
            }
            ResourceKind::Orders => self.run_detail(kind, &self.store.orders, id).await,
            ResourceKind::Customers => self.run_detail(kind, &self.store.customers, id).await,
            ResourceKind::Products => self.run_detail(kind, &self.store.products, id).await,
        }
    }

    async fn run_detail<T>(
        &self,
        kind: ResourceKind,
        slices: &ResourceSlices<T>,
        id: &str,
    ) -> Result<(), CoreError>
    where
        T: DeserializeOwned + Clone,
    {
        debug!(resource = %kind, id, "dispatching detail fetch");
        slices.apply_detail(DetailEvent::Pending);

        match self.client.get_by_id::<T>(kind, id).await {
            Ok(data) => {
                slices.apply_detail(DetailEvent::Fulfilled { data });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                slices.apply_detail(DetailEvent::Rejected {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a record. Returns the backend-assigned id on success.
    pub async fn create(&self, kind: ResourceKind, body: MutationBody) -> Result<String, CoreError> {
        let slices = MutationTarget::create(&self.store, kind);
        slices.apply(MutationEvent::Pending);

        match self.client.create::<serde_json::Value>(kind, body).await {
            Ok(record) => {
                let id = extract_id(&record);
                slices.apply(MutationEvent::Fulfilled {
                    result_id: Some(id.clone()),
                });
                self.notify(
                    NotificationLevel::Success,
                    format!("{} created", kind.label()),
                );
                Ok(id)
            }
            Err(err) => {
                let err = CoreError::from(err);
                slices.apply(MutationEvent::Rejected {
                    error: err.to_string(),
                });
                self.notify(
                    NotificationLevel::Error,
                    format!("{} create failed: {err}", kind.label()),
                );
                Err(err)
            }
        }
    }

    /// Update a record. The body must carry the id.
    pub async fn update(&self, kind: ResourceKind, body: MutationBody) -> Result<(), CoreError> {
        let slices = MutationTarget::update(&self.store, kind);
        slices.apply(MutationEvent::Pending);

        match self.client.update(kind, body).await {
            Ok(_ack) => {
                slices.apply(MutationEvent::Fulfilled { result_id: None });
                self.notify(
                    NotificationLevel::Success,
                    format!("{} updated", kind.label()),
                );
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                slices.apply(MutationEvent::Rejected {
                    error: err.to_string(),
                });
                self.notify(
                    NotificationLevel::Error,
                    format!("{} update failed: {err}", kind.label()),
                );
                Err(err)
            }
        }
    }

    /// Delete a record by id.
    ///
    /// Does NOT refetch the list: the screen orchestrator composes the
    /// refetch after observing success, keeping the mutation testable
    /// in isolation.
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), CoreError> {
        let slices = MutationTarget::delete(&self.store, kind);
        slices.apply(MutationEvent::Pending);

        match self.client.delete(kind, id).await {
            Ok(_ack) => {
                slices.apply(MutationEvent::Fulfilled {
                    result_id: Some(id.to_owned()),
                });
                self.notify(
                    NotificationLevel::Success,
                    format!("{} deleted", kind.label()),
                );
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                slices.apply(MutationEvent::Rejected {
                    error: err.to_string(),
                });
                self.notify(
                    NotificationLevel::Error,
                    format!("{} delete failed: {err}", kind.label()),
                );
                Err(err)
            }
        }
    }

    // ── Settings & dashboard ─────────────────────────────────────────

    /// Fetch the settings singleton into its Detail slice.
    pub async fn fetch_settings(&self) -> Result<(), CoreError> {
        let cell = &self.store.settings.detail;
        cell.update(|slice| slice.apply(DetailEvent::Pending));

        match self.client.settings_get::<CompanySettings>().await {
            Ok(data) => {
                cell.update(|slice| slice.apply(DetailEvent::Fulfilled { data }));
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                cell.update(|slice| {
                    slice.apply(DetailEvent::Rejected {
                        error: err.to_string(),
                    });
                });
                Err(err)
            }
        }
    }

    /// Update the settings singleton.
    pub async fn update_settings(&self, settings: &CompanySettings) -> Result<(), CoreError> {
        let cell = &self.store.settings.update;
        cell.update(|slice| slice.apply(MutationEvent::Pending));

        match self.client.settings_update(settings).await {
            Ok(_ack) => {
                cell.update(|slice| slice.apply(MutationEvent::Fulfilled { result_id: None }));
                self.notify(NotificationLevel::Success, "Settings updated");
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                cell.update(|slice| {
                    slice.apply(MutationEvent::Rejected {
                        error: err.to_string(),
                    });
                });
                self.notify(
                    NotificationLevel::Error,
                    format!("Settings update failed: {err}"),
                );
                Err(err)
            }
        }
    }

    /// Fetch the dashboard summary. Read-only; no slice, returned
    /// directly to the caller.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, CoreError> {
        Ok(self.client.dashboard_summary::<DashboardSummary>().await?)
    }
}

// ── Mutation slice routing ──────────────────────────────────────────

/// A type-erased handle to one mutation slice, so the routing match
/// is written once per mutation kind instead of once per resource.
struct MutationTarget<'a> {
    apply: Box<dyn Fn(MutationEvent) + 'a>,
}

impl<'a> MutationTarget<'a> {
    fn create(store: &'a AdminStore, kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Banners => Self::wrap(move |e| store.banners.apply_create(e)),
            ResourceKind::EmailTemplates => {
                Self::wrap(move |e| store.email_templates.apply_create(e))
            }
            ResourceKind::Orders => Self::wrap(move |e| store.orders.apply_create(e)),
            ResourceKind::Customers => Self::wrap(move |e| store.customers.apply_create(e)),
            ResourceKind::Products => Self::wrap(move |e| store.products.apply_create(e)),
        }
    }

    fn update(store: &'a AdminStore, kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Banners => Self::wrap(move |e| store.banners.apply_update(e)),
            ResourceKind::EmailTemplates => {
                Self::wrap(move |e| store.email_templates.apply_update(e))
            }
            ResourceKind::Orders => Self::wrap(move |e| store.orders.apply_update(e)),
            ResourceKind::Customers => Self::wrap(move |e| store.customers.apply_update(e)),
            ResourceKind::Products => Self::wrap(move |e| store.products.apply_update(e)),
        }
    }

    fn delete(store: &'a AdminStore, kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Banners => Self::wrap(move |e| store.banners.apply_delete(e)),
            ResourceKind::EmailTemplates => {
                Self::wrap(move |e| store.email_templates.apply_delete(e))
            }
            ResourceKind::Orders => Self::wrap(move |e| store.orders.apply_delete(e)),
            ResourceKind::Customers => Self::wrap(move |e| store.customers.apply_delete(e)),
            ResourceKind::Products => Self::wrap(move |e| store.products.apply_delete(e)),
        }
    }

    fn wrap(f: impl Fn(MutationEvent) + 'a) -> Self {
        Self { apply: Box::new(f) }
    }

    fn apply(&self, event: MutationEvent) {
        (self.apply)(event);
    }
}

/// Pull the record id out of a create response. The backend sends ids
/// as strings, but numeric ids are tolerated.
fn extract_id(record: &serde_json::Value) -> String {
    match &record["id"] {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
