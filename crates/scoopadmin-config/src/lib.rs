//! Shared configuration for the Scoop Nation admin CLI.
//!
//! TOML file + `SCOOPADMIN_*` environment overrides, resolved through
//! XDG / platform conventions, plus translation into the transport
//! settings the API client needs.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scoopadmin_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL (e.g., "https://admin.scoopnation.example").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL for uploaded media. Defaults to `api_url` when unset.
    pub media_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS certificate verification (local/staging backends).
    #[serde(default)]
    pub insecure: bool,

    /// Session token file. Defaults to a per-user data path.
    pub session_file: Option<PathBuf>,

    /// Output defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            media_url: None,
            timeout: default_timeout(),
            insecure: false,
            session_file: None,
            defaults: Defaults::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Default list page size.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            limit: default_limit(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:4000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_limit() -> u32 {
    10
}

impl Config {
    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: if self.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: Duration::from_secs(self.timeout),
        }
    }

    /// Base URL for media paths, falling back to the API URL.
    pub fn media_base(&self) -> &str {
        self.media_url.as_deref().unwrap_or(&self.api_url)
    }

    /// Session token file, defaulting to the per-user data directory.
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| data_dir().join("session.json"))
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "scoopnation", "scoopadmin").map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "scoopnation", "scoopadmin").map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback(subdir: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(subdir);
    p.push("scoopadmin");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path + environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SCOOPADMIN_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}
