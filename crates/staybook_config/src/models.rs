// --- File: crates/staybook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Static Booking Page ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StaticSiteConfig {
    /// Directory holding the booking UI, relative to the working directory.
    #[serde(default = "default_static_dir")]
    pub dir: String,
    /// File served for every non-API path that is not a static asset.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for StaticSiteConfig {
    fn default() -> Self {
        Self {
            dir: default_static_dir(),
            index_file: default_index_file(),
        }
    }
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_index_file() -> String {
    "index.html".to_string()
}

// --- Google Calendar Config ---
// Service account secrets come from `key_path` or from the
// GOOGLE_CLIENT_EMAIL / GOOGLE_PRIVATE_KEY env pair.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub key_path: Option<String>,
    pub calendar_id: Option<String>,
    /// IANA zone used for all-day events and for dating timed events.
    pub time_zone: Option<String>,
    /// How far ahead the booked-dates window reaches.
    pub window_months: Option<u32>,
    #[serde(default)]
    pub cache_occupancy: bool,
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub dir: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default = "default_true")]
    pub use_reserve: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub static_site: Option<StaticSiteConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

fn default_true() -> bool {
    true
}
