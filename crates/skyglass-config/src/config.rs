//! Application configuration (`config.toml`) and platform paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use skyglass_core::Location;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Tunables read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the WeatherAPI-compatible provider.
    pub api_base_url: String,
    /// Seconds between automatic refreshes.
    pub refresh_interval_secs: u64,
    /// Quiet period after the last keystroke before searching.
    pub search_debounce_ms: u64,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
    /// Number of forecast days to request.
    pub forecast_days: u8,
    /// Location shown on startup.
    pub default_location: Location,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.weatherapi.com/v1".to_string(),
            refresh_interval_secs: 10 * 60,
            search_debounce_ms: 500,
            request_timeout_secs: 10,
            forecast_days: 7,
            default_location: Location::new("New York", 40.71, -74.00),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::parse(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(contents)?;
        // Zero would spin the refresh and search loops.
        config.refresh_interval_secs = config.refresh_interval_secs.max(60);
        config.request_timeout_secs = config.request_timeout_secs.max(1);
        config.forecast_days = config.forecast_days.clamp(1, 14);
        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Where skyglass keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config_file: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
}

impl Paths {
    /// Platform-default locations.
    pub fn discover() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "skyglass").ok_or(ConfigError::NoProjectDirs)?;
        Ok(Self::in_dirs(dirs.config_dir(), dirs.data_dir()))
    }

    /// Locations under explicit config and data directories.
    pub fn in_dirs(config_dir: &Path, data_dir: &Path) -> Self {
        Self {
            config_file: config_dir.join("config.toml"),
            settings_file: config_dir.join("settings.json"),
            log_file: data_dir.join("skyglass.log"),
        }
    }
}
