// scoopadmin-api: Async HTTP client for the Scoop Nation admin backend.
//
// Everything the backend returns follows one canonical envelope:
// `{ success, data?, message?, error?, pagination? }`. This crate owns
// the envelope contract, bearer-session handling (including the forced
// teardown on 401), the generic per-resource endpoints, and the
// real-time push feed.

pub mod client;
pub mod envelope;
pub mod error;
pub mod push;
pub mod query;
pub mod resource;
pub mod session;
pub mod transport;

pub use client::{AckMessage, ApiClient, LoginData};
pub use envelope::{PageOf, Pagination};
pub use error::Error;
pub use push::{PushEvent, PushHandle, ReconnectConfig, feed_url};
pub use query::ListQuery;
pub use resource::{Attachment, MutationBody, ResourceKind};
pub use session::{SessionStore, SessionUser};
pub use transport::{TlsMode, TransportConfig};
