//! Settings persistence and configuration for skyglass.
//!
//! User preferences go through the [`SettingsStore`] trait so the dashboard
//! can run against a JSON file in production and an in-memory map in tests.
//! Application tunables come from an optional `config.toml`.

mod config;
mod error;
mod settings;
mod store;

pub use config::{AppConfig, Paths};
pub use error::{ConfigError, ConfigResult};
pub use settings::{Settings, keys};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
