// ── Core error types ──
//
// User-facing errors from scoopadmin-core. Consumers never see raw
// HTTP statuses or JSON parse failures; the `From<scoopadmin_api::Error>`
// impl translates transport-layer errors into domain variants. Slice
// state stores the rendered message (`error: Option<String>`), so the
// UI cannot distinguish transport from application failures -- an
// accepted limitation of the envelope contract.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Session missing or rejected; the token store has been cleared.
    #[error("Not signed in")]
    Unauthorized,

    /// Login rejected.
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    /// Backend-reported failure (non-2xx or `success:false`).
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// The requested record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Client-side form validation failed; no request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] crate::form::ValidationErrors),

    /// Configuration problem (bad URL, missing base).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Anything else from the API layer, already rendered.
    #[error("{0}")]
    Internal(String),
}

impl From<scoopadmin_api::Error> for CoreError {
    fn from(err: scoopadmin_api::Error) -> Self {
        use scoopadmin_api::Error as ApiError;
        match err {
            ApiError::Unauthorized => Self::Unauthorized,
            ApiError::LoginFailed { message } => Self::LoginFailed { message },
            ApiError::Api { status, message } => Self::Api {
                message,
                status: Some(status),
            },
            ApiError::Transport(e) => Self::Api {
                message: format!("network error: {e}"),
                status: None,
            },
            ApiError::InvalidUrl(e) => Self::Config {
                message: e.to_string(),
            },
            ApiError::Tls(msg) => Self::Config { message: msg },
            other => Self::Internal(other.to_string()),
        }
    }
}
