// scoopadmin-core: the resource list/CRUD orchestration core.
//
// Every admin screen follows the same shape: a paginated, searchable
// list fetched from the backend, plus create/update/delete mutations
// reconciled against it. This crate owns that shape once -- typed
// slices with pure reducer transitions, a dispatcher tying repository
// calls to slice events, the pagination/search orchestrator, the form
// flow, and the domain event bus fed by the push channel.

pub mod dispatcher;
pub mod error;
pub mod events;
pub mod form;
pub mod model;
pub mod orchestrator;
pub mod slice;
pub mod store;

pub use dispatcher::{Dispatcher, Notification, NotificationLevel};
pub use error::CoreError;
pub use events::{DomainEvent, EventBus, spawn_push_bridge};
pub use form::{
    BannerDraft, Draft, EmailTemplateDraft, FieldError, FormMode, ProductDraft, SubmitOutcome,
    ValidationErrors, submit,
};
pub use orchestrator::{ListController, range_text};
pub use slice::{DetailEvent, DetailSlice, ListEvent, ListSlice, MutationEvent, MutationSlice};
pub use store::{AdminStore, ResourceSlices, SettingsSlices, SliceCell};

pub use scoopadmin_api::{ListQuery, Pagination, ResourceKind};
