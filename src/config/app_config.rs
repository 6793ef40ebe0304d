use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::core::errors::{ActlogError, Result};

/// Top-level configuration read from `.actlog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub actlog: ActlogSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub host: HostSection,
}

impl AppConfig {
    /// Load the configuration from `{dir}/config.toml`.
    ///
    /// After parsing, validates the store and snapshot filenames to
    /// prevent path traversal from a tampered config file.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");
        if !config_path.exists() {
            return Err(ActlogError::InvalidConfig {
                detail: "config.toml not found. Run 'actlog install' first.".into(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| ActlogError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.actlog.format_version > CURRENT_FORMAT_VERSION {
            return Err(ActlogError::InvalidConfig {
                detail: format!(
                    "This log uses format version {}, but this build only supports up to {}.",
                    config.actlog.format_version, CURRENT_FORMAT_VERSION
                ),
            });
        }

        crate::cli::context::validate_simple_filename(&config.store.file, "store file")?;
        crate::cli::context::validate_simple_filename(&config.host.snapshot, "host snapshot")?;
        config.display.timezone()?;

        Ok(config)
    }
}

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Default contents written by `actlog install`.
pub const DEFAULT_CONFIG: &str = r#"[actlog]
version = "0.1.0"
format_version = 1

[store]
backend = "sqlite"
file = "activity.db"
busy_timeout_ms = 0

[display]
timezone = "America/Edmonton"

[host]
snapshot = "host.toml"
"#;

/// The `[actlog]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ActlogSection {
    pub version: String,
    #[serde(default = "default_format_version")]
    pub format_version: u32,
}

fn default_format_version() -> u32 {
    1
}

/// Which `LogStore` adapter backs the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Jsonl,
}

/// The `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    pub backend: StoreBackend,
    pub file: String,
    #[serde(default)]
    pub busy_timeout_ms: u64,
}

impl StoreSection {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            file: "activity.db".to_string(),
            busy_timeout_ms: 0,
        }
    }
}

/// The `[display]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySection {
    /// IANA zone timestamps are rendered in. Storage stays UTC.
    pub timezone: String,
}

impl DisplaySection {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ActlogError::InvalidConfig {
                detail: format!(
                    "Unknown display timezone '{}'. Expected an IANA name, e.g. America/Edmonton",
                    self.timezone
                ),
            })
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            timezone: "America/Edmonton".to_string(),
        }
    }
}

/// The `[host]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HostSection {
    pub snapshot: String,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            snapshot: "host.toml".to_string(),
        }
    }
}
