//! Session persistence for portal clients.
//!
//! A trait-based abstraction so hosts can keep the signed-in session in a
//! platform-appropriate place: a config file for desktop tools, plain
//! memory for tests and short-lived processes, or something else entirely.
//!
//! Unlike a multi-server credential vault this is a single slot: the portal
//! client holds at most one session at a time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SimaLinkError};
use crate::models::User;

/// A persisted session: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    /// Bearer token presented on every authenticated request
    pub token: String,

    /// Optional refresh token issued alongside the bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// The signed-in user as last seen from the backend
    pub user: User,
}

/// Trait for session storage backends.
///
/// Implementations must treat the token as a secret: files need
/// restrictive permissions (0600 on Unix) and the token must never be
/// logged.
pub trait SessionStore: Send {
    /// Load the persisted session, if one exists.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<StoredSession>>;

    /// Persist a session, replacing any previous one.
    fn save(&mut self, session: &StoredSession) -> Result<()>;

    /// Remove the persisted session.
    ///
    /// Returns `Ok(())` even if nothing was stored.
    fn clear(&mut self) -> Result<()>;

    /// Check whether a session is stored.
    ///
    /// Default implementation calls `load()` and checks for Some.
    fn has_session(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }
}

/// In-memory session store for tests and temporary use.
///
/// Does NOT persist across restarts.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    session: Option<StoredSession>,
}

impl MemorySessionStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &StoredSession) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}

/// Top-level TOML structure of the session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    session: Option<StoredSession>,
}

/// File-based session store.
///
/// Persists the session as TOML with 0600 permissions on Unix.
///
/// # File Location
///
/// - Windows: `~/.sima/session.toml`
/// - Linux/macOS: `~/.config/sima/session.toml`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    /// Path to the session file
    file_path: PathBuf,

    /// In-memory copy of the persisted session
    cache: Option<StoredSession>,
}

impl FileSessionStore {
    /// Default session file path.
    /// - Windows: `~/.sima/session.toml`
    /// - Linux/macOS: `~/.config/sima/session.toml`
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".sima").join("session.toml")
            } else {
                PathBuf::from(".sima").join("session.toml")
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("sima").join("session.toml")
            } else if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("sima").join("session.toml")
            } else {
                PathBuf::from(".sima").join("session.toml")
            }
        }
    }

    /// Create a store at the default location.
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_path())
    }

    /// Create a store at a custom location.
    pub fn with_path(file_path: PathBuf) -> Result<Self> {
        let mut store = Self { file_path, cache: None };
        store.load_from_disk()?;
        Ok(store)
    }

    /// Get the file path used by this store.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_disk(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            // No file yet, start empty
            self.cache = None;
            return Ok(());
        }

        let contents = fs::read_to_string(&self.file_path).map_err(|e| {
            SimaLinkError::ConfigurationError(format!(
                "Cannot read session file '{}': {}",
                self.file_path.display(),
                e
            ))
        })?;

        let file: SessionFile = toml::from_str(&contents).map_err(|e| {
            SimaLinkError::ConfigurationError(format!(
                "Corrupted session file '{}': {}. Delete it and sign in again.",
                self.file_path.display(),
                e
            ))
        })?;

        self.cache = file.session;
        Ok(())
    }

    fn save_to_disk(&self) -> Result<()> {
        let file = SessionFile { session: self.cache.clone() };

        let contents = toml::to_string_pretty(&file).map_err(|e| {
            SimaLinkError::ConfigurationError(format!("Failed to serialize session: {}", e))
        })?;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SimaLinkError::ConfigurationError(format!(
                    "Failed to create session directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(&self.file_path, contents).map_err(|e| {
            SimaLinkError::ConfigurationError(format!(
                "Failed to write session file '{}': {}",
                self.file_path.display(),
                e
            ))
        })?;

        // Owner read/write only; the file holds a live token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file_path, permissions).map_err(|e| {
                SimaLinkError::ConfigurationError(format!(
                    "Failed to set permissions on '{}': {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.cache.clone())
    }

    fn save(&mut self, session: &StoredSession) -> Result<()> {
        self.cache = Some(session.clone());
        self.save_to_disk()
    }

    fn clear(&mut self) -> Result<()> {
        self.cache = None;
        self.save_to_disk()
    }
}
