// Persisted bearer session.
//
// The admin token lives in a JSON file under the config directory and
// in memory as a `SecretString`. A 401 from any endpoint clears both
// -- the route-guard layer observes `is_authenticated()` flipping.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;

/// The signed-in admin, as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// On-disk session shape. The token is plaintext in a mode-restricted
/// file; the backend can revoke it server-side at any time.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    #[serde(default)]
    user: Option<SessionUser>,
}

struct SessionData {
    token: Option<SecretString>,
    user: Option<SessionUser>,
}

/// Token + user persistence with process-wide shared access.
pub struct SessionStore {
    path: PathBuf,
    data: RwLock<SessionData>,
}

impl SessionStore {
    /// Open the store, loading a persisted session if one exists.
    ///
    /// A malformed session file is treated as "signed out" and removed
    /// rather than propagated as an error.
    pub fn open(path: PathBuf) -> Self {
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<SessionFile>(&raw) {
                Ok(file) => {
                    debug!(path = %path.display(), "loaded persisted session");
                    SessionData {
                        token: Some(SecretString::from(file.token)),
                        user: file.user,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "session file unreadable, discarding");
                    let _ = fs::remove_file(&path);
                    SessionData {
                        token: None,
                        user: None,
                    }
                }
            },
            Err(_) => SessionData {
                token: None,
                user: None,
            },
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    /// Whether a session token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.data
            .read()
            .expect("session lock poisoned")
            .token
            .is_some()
    }

    /// The bearer token, if signed in. Cloning a `SecretString` is cheap.
    pub fn token(&self) -> Option<SecretString> {
        self.data
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    /// The signed-in user, if known.
    pub fn user(&self) -> Option<SessionUser> {
        self.data
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    /// Persist a new session (after login).
    pub fn store(&self, token: SecretString, user: Option<SessionUser>) -> Result<(), Error> {
        let file = SessionFile {
            token: token.expose_secret().to_owned(),
            user: user.clone(),
        };
        let raw = serde_json::to_string_pretty(&file).map_err(|e| Error::Session {
            message: format!("failed to serialize session: {e}"),
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Session {
                message: format!("failed to create session dir: {e}"),
            })?;
        }
        fs::write(&self.path, raw).map_err(|e| Error::Session {
            message: format!("failed to write session file: {e}"),
        })?;

        let mut data = self.data.write().expect("session lock poisoned");
        data.token = Some(token);
        data.user = user;
        Ok(())
    }

    /// Drop the in-memory token and remove the persisted file.
    ///
    /// Called on explicit logout and on any 401 response. Removing a
    /// file that is already gone is not an error.
    pub fn clear(&self) -> Result<(), Error> {
        {
            let mut data = self.data.write().expect("session lock poisoned");
            data.token = None;
            data.user = None;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Session {
                message: format!("failed to remove session file: {e}"),
            }),
        }
    }

    /// The backing file path (for diagnostics).
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
