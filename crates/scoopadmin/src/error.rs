//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use scoopadmin_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Not signed in")]
    #[diagnostic(
        code(scoopadmin::not_signed_in),
        help("Sign in with: scoopadmin login --email <EMAIL>")
    )]
    NotSignedIn,

    #[error("Login failed: {message}")]
    #[diagnostic(
        code(scoopadmin::login_failed),
        help("Check the email and password and try again.")
    )]
    LoginFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource} '{id}' not found")]
    #[diagnostic(
        code(scoopadmin::not_found),
        help("Run: scoopadmin {list_command} to see available records")
    )]
    NotFound {
        resource: String,
        id: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend error: {message}")]
    #[diagnostic(code(scoopadmin::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid input: {reason}")]
    #[diagnostic(code(scoopadmin::validation))]
    Validation { reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(scoopadmin::config),
        help("Check the config file or SCOOPADMIN_* environment variables.")
    )]
    Config { message: String },

    // ── Push feed ────────────────────────────────────────────────────

    #[error("Push feed error: {message}")]
    #[diagnostic(
        code(scoopadmin::push),
        help("Check that the backend exposes the order feed and is reachable.")
    )]
    Push { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(scoopadmin::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotSignedIn | Self::LoginFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Api { status: None, .. } | Self::Push { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthorized => Self::NotSignedIn,

            CoreError::LoginFailed { message } => Self::LoginFailed { message },

            CoreError::Api { message, status } => Self::Api { message, status },

            CoreError::NotFound { resource, id } => {
                let list_command = format!("{} list", resource.to_lowercase());
                Self::NotFound {
                    resource,
                    id,
                    list_command,
                }
            }

            CoreError::Validation(errors) => Self::Validation {
                reason: errors.to_string(),
            },

            CoreError::Config { message } => Self::Config { message },

            CoreError::Internal(message) => Self::Api {
                message,
                status: None,
            },
        }
    }
}

impl From<scoopadmin_api::Error> for CliError {
    fn from(err: scoopadmin_api::Error) -> Self {
        Self::from(CoreError::from(err))
    }
}

impl From<scoopadmin_config::ConfigError> for CliError {
    fn from(err: scoopadmin_config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
