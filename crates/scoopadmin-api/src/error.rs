use thiserror::Error;

/// Top-level error type for the `scoopadmin-api` crate.
///
/// Transport failures, non-2xx statuses, and `success:false` envelopes
/// are all normalized here; `scoopadmin-core` maps these into slice
/// state and user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the session token (HTTP 401). The stored
    /// session has already been torn down by the time this surfaces.
    #[error("Not authenticated -- session token missing or rejected")]
    Unauthorized,

    /// Login failed (wrong credentials, disabled account, etc.)
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Application ─────────────────────────────────────────────────
    /// The backend reported a failure: non-2xx status, or a 2xx body
    /// with `success:false`. The message comes from the envelope's
    /// `error`/`message` field, verbatim.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body did not match the envelope contract.
    /// Carries the raw body for debugging.
    #[error("Envelope contract violation: {message}")]
    Deserialization { message: String, body: String },

    // ── Session storage ─────────────────────────────────────────────
    /// Reading or writing the persisted session file failed.
    #[error("Session storage error: {message}")]
    Session { message: String },

    // ── Push feed ───────────────────────────────────────────────────
    /// Push feed connection failed.
    #[error("Push feed connection failed: {0}")]
    PushConnect(String),
}

impl Error {
    /// Returns `true` if this error forced a session teardown.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::PushConnect(_) => true,
            _ => false,
        }
    }
}
