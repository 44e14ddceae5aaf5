//! Configuration file management.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! url = "http://localhost:4000/api"         # management API
//! python_url = "http://localhost:5001"      # inference API
//! timeout = 30
//!
//! [ui]
//! color = true
//! ```

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Server connection settings
    pub server: Option<ServerConfig>,

    /// UI preferences
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Management API base URL
    pub url: Option<String>,

    /// Inference API base URL (defaults to `url` when absent)
    pub python_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_color() -> bool {
    true
}

impl CliConfig {
    /// Default config file location:
    /// - Windows: `~/.trainify/config.toml`
    /// - Linux/macOS: `~/.config/trainify/config.toml`
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".trainify")
                .join("config.toml")
        }

        #[cfg(not(target_os = "windows"))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join("trainify")
                .join("config.toml")
        }
    }

    /// Load configuration from `path`.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Management API URL, if configured.
    pub fn server_url(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.url.as_deref())
    }

    /// Inference API URL, if configured.
    pub fn python_url(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.python_url.as_deref())
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.server
            .as_ref()
            .map(|s| s.timeout)
            .unwrap_or_else(default_timeout)
    }

    /// Whether colored output is enabled.
    pub fn color(&self) -> bool {
        self.ui.as_ref().map(|u| u.color).unwrap_or_else(default_color)
    }
}
