/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Storage defaults
pub const DEFAULT_CATALOG_PATH: &str = "./data/catalog.json";
pub const DEFAULT_SEED_SAMPLE_CHANNELS: bool = true;

// Admin defaults (change these in config.toml before exposing the API)
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

// Import defaults
pub const DEFAULT_MAX_PLAYLIST_BYTES: u64 = 10 * 1024 * 1024; // 10MB
pub const DEFAULT_MAX_CHANNELS: usize = 1000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// Sync defaults
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
