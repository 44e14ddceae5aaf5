//! File-based session storage for the CLI.
//!
//! Persists the Bearer token and user info in TOML with restrictive file
//! permissions (0600 on Unix), so `trainify login` survives across
//! invocations until `trainify logout`.
//!
//! # File Location
//!
//! - Windows: `~/.trainify/credentials.toml`
//! - Linux/macOS: `~/.config/trainify/credentials.toml`
//!
//! # File Format
//!
//! ```toml
//! token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//!
//! [user]
//! id = "u1"
//! name = "Alice"
//! email = "alice@example.com"
//! ```

use std::fs;
use std::path::PathBuf;
use trainify_link::error::{Result, TrainifyError};
use trainify_link::session::{SessionStore, StoredSession};

/// File-backed [`SessionStore`].
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file_path: PathBuf,

    /// In-memory cache of the persisted session
    cache: Option<StoredSession>,
}

impl FileSessionStore {
    /// Default credentials file path.
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".trainify")
                .join("credentials.toml")
        }

        #[cfg(not(target_os = "windows"))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join("trainify")
                .join("credentials.toml")
        }
    }

    /// Open (or initialize) the store at the default location.
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_path())
    }

    /// Open (or initialize) the store at a custom location.
    pub fn with_path(file_path: PathBuf) -> Result<Self> {
        let mut store = Self {
            file_path,
            cache: None,
        };
        store.load_from_disk()?;
        Ok(store)
    }

    fn load_from_disk(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            self.cache = None;
            return Ok(());
        }

        let contents = fs::read_to_string(&self.file_path).map_err(|e| {
            TrainifyError::Configuration(format!(
                "Cannot read credentials file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        let session: StoredSession = toml::from_str(&contents).map_err(|e| {
            TrainifyError::Configuration(format!(
                "Corrupt credentials file {} ({}). Delete it and log in again.",
                self.file_path.display(),
                e
            ))
        })?;

        self.cache = Some(session);
        Ok(())
    }

    fn save_to_disk(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TrainifyError::Configuration(format!(
                    "Cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = toml::to_string_pretty(session)
            .map_err(|e| TrainifyError::Serialization(e.to_string()))?;

        fs::write(&self.file_path, contents).map_err(|e| {
            TrainifyError::Configuration(format!(
                "Cannot write credentials file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        // Owner read/write only; the file holds a live token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file_path, perms).map_err(|e| {
                TrainifyError::Configuration(format!(
                    "Cannot set permissions on {}: {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<StoredSession>> {
        Ok(self.cache.clone())
    }

    fn set(&mut self, session: &StoredSession) -> Result<()> {
        self.save_to_disk(session)?;
        self.cache = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).map_err(|e| {
                TrainifyError::Configuration(format!(
                    "Cannot remove credentials file {}: {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }
        self.cache = None;
        Ok(())
    }
}
