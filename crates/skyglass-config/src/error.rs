use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing configuration and settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not encode setting '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No home directory found for config files")]
    NoProjectDirs,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
