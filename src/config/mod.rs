use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding channels, favorites and the catalog version
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Insert the built-in sample channels when the catalog is empty
    #[serde(default = "default_seed_sample_channels")]
    pub seed_sample_channels: bool,
}

/// Static credentials guarding the admin routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Upper bound for playlist text read from files, URLs or request bodies
    #[serde(default = "default_max_playlist_bytes")]
    pub max_playlist_bytes: u64,
    /// Maximum number of channels the catalog may hold
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// How often the server checks the catalog file for writes made by
    /// other processes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Storage defaults
fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

fn default_seed_sample_channels() -> bool {
    DEFAULT_SEED_SAMPLE_CHANNELS
}

// Admin defaults
fn default_admin_username() -> String {
    DEFAULT_ADMIN_USERNAME.to_string()
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

// Import defaults
fn default_max_playlist_bytes() -> u64 {
    DEFAULT_MAX_PLAYLIST_BYTES
}

fn default_max_channels() -> usize {
    DEFAULT_MAX_CHANNELS
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

// Sync defaults
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            seed_sample_channels: default_seed_sample_channels(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_playlist_bytes: default_max_playlist_bytes(),
            max_channels: default_max_channels(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            storage: StorageConfig::default(),
            admin: AdminConfig::default(),
            import: ImportConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl ImportConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl AdminConfig {
    pub fn uses_default_credentials(&self) -> bool {
        self.username == DEFAULT_ADMIN_USERNAME && self.password == DEFAULT_ADMIN_PASSWORD
    }
}

impl Config {
    /// Load the file named by `CONFIG_FILE`, or `config.toml`
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        let config = Self::load_from_file(&config_file)?;
        info!("Configuration loaded from: {}", config_file);
        Ok(config)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.validate()?;
        if config.admin.uses_default_credentials() {
            warn!("Admin routes are using the default credentials; set [admin] in {}", config_file);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.admin.username.trim().is_empty() || self.admin.password.is_empty() {
            anyhow::bail!("[admin] username and password must not be empty");
        }
        if self.import.max_channels == 0 {
            anyhow::bail!("[import] max_channels must be greater than zero");
        }
        if self.import.max_playlist_bytes == 0 {
            anyhow::bail!("[import] max_playlist_bytes must be greater than zero");
        }
        Ok(())
    }
}
