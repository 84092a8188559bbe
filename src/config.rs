//! Configuration for reaching the background service.
//!
//! The config file lives at `<config dir>/firebox/config.toml`. Every field is
//! optional; missing fields take the defaults below.
//!
//! # Environment Overrides
//!
//! - `FIREBOX_CONFIG_DIR` overrides the directory holding `config.toml`
//! - `FIREBOX_ENDPOINT` overrides [`ServiceConfig::endpoint`]

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Well-known name of the background service.
pub const SERVICE_NAME: &str = "com.example.firebox.service";

/// Object path of the service object.
pub const OBJECT_PATH: &str = "/com/example/firebox";

/// Interface carrying `GetStatus`, `Start`, `Stop` and `StatusChanged`.
pub const SERVICE_INTERFACE: &str = "com.example.firebox.Service";

/// Loopback port used where Unix sockets are unavailable.
pub const DEFAULT_TCP_PORT: u16 = 47631;

/// Client/service settings for the RPC boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Logical service identifier.
    pub service_name: String,
    /// Object identity within the service.
    pub object_path: String,
    /// Interface name the methods and signal belong to.
    pub interface: String,
    /// Transport endpoint: `unix:<path>` or `tcp:<host:port>`.
    pub endpoint: String,
    /// Upper bound on how long a single call may stay pending.
    pub call_timeout_ms: u64,
    /// Buffered `StatusChanged` events per subscriber before the oldest are dropped.
    pub event_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: SERVICE_NAME.to_owned(),
            object_path: OBJECT_PATH.to_owned(),
            interface: SERVICE_INTERFACE.to_owned(),
            endpoint: default_endpoint(),
            call_timeout_ms: 5_000,
            event_capacity: 64,
        }
    }
}

impl ServiceConfig {
    /// Load config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save config to a TOML file, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from [`Self::default_config_path`] when it exists, otherwise
    /// return defaults. A present but unreadable file is an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::default_config_path();
        if path.exists() {
            return Self::from_file(&path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Returns the default config file path: `<config dir>/firebox/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Call timeout as a [`Duration`]. Zero is clamped to one millisecond.
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms.max(1))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("FIREBOX_ENDPOINT") {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                self.endpoint = endpoint.to_owned();
            }
        }
    }
}

/// Directory holding `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("FIREBOX_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("firebox"))
        .unwrap_or_else(|| std::env::temp_dir().join("firebox-config"))
}

#[cfg(unix)]
fn default_endpoint() -> String {
    let runtime = dirs::runtime_dir().unwrap_or_else(std::env::temp_dir);
    format!(
        "unix:{}",
        runtime.join("firebox").join("service.sock").display()
    )
}

#[cfg(not(unix))]
fn default_endpoint() -> String {
    format!("tcp:127.0.0.1:{DEFAULT_TCP_PORT}")
}
