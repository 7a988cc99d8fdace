//! Typed user settings on top of a [`SettingsStore`].
//!
//! Every read falls back to a documented default when the stored value is
//! missing or malformed, so a damaged settings file never stops the app.

use serde::Serialize;
use serde::de::DeserializeOwned;
use skyglass_core::{Location, THEMES, Theme, ThemeMode, find_theme};
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::store::SettingsStore;

/// Storage keys.
pub mod keys {
    pub const FAVORITES: &str = "favorites";
    pub const DARK_MODE: &str = "dark_mode";
    pub const API_KEY: &str = "api_key";
    pub const EFFECTS_ENABLED: &str = "effects_enabled";
    pub const THEME_MODE: &str = "theme_mode";
    pub const MANUAL_THEME: &str = "manual_theme";
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub favorites: Vec<Location>,
    pub dark_mode: bool,
    pub api_key: Option<String>,
    pub effects_enabled: bool,
    pub theme_mode: ThemeMode,
    /// Theme pinned in manual mode.
    pub manual_theme: Option<&'static Theme>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            favorites: default_favorites(),
            dark_mode: false,
            api_key: None,
            effects_enabled: true,
            theme_mode: ThemeMode::Auto,
            manual_theme: None,
        }
    }
}

fn default_favorites() -> Vec<Location> {
    vec![Location::new("London, UK", 51.52, -0.11)]
}

impl Settings {
    /// Read every setting, substituting defaults for anything unusable.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();

        let api_key = read_json::<String, _>(store, keys::API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let manual_theme = read_json::<String, _>(store, keys::MANUAL_THEME).and_then(|name| {
            let theme = find_theme(&name);
            if theme.is_none() {
                warn!(theme = %name, "stored manual theme is not in the catalog");
            }
            theme
        });

        let mut settings = Self {
            favorites: read_json(store, keys::FAVORITES).unwrap_or(defaults.favorites),
            dark_mode: read_json(store, keys::DARK_MODE).unwrap_or(defaults.dark_mode),
            api_key,
            effects_enabled: read_json(store, keys::EFFECTS_ENABLED)
                .unwrap_or(defaults.effects_enabled),
            theme_mode: read_json(store, keys::THEME_MODE).unwrap_or(defaults.theme_mode),
            manual_theme,
        };
        settings.ensure_manual_theme();
        settings
    }

    /// Write every setting. Absent optional values are removed from the store.
    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) -> ConfigResult<()> {
        write_json(store, keys::FAVORITES, &self.favorites)?;
        write_json(store, keys::DARK_MODE, &self.dark_mode)?;
        write_json(store, keys::EFFECTS_ENABLED, &self.effects_enabled)?;
        write_json(store, keys::THEME_MODE, &self.theme_mode)?;

        match &self.api_key {
            Some(key) => write_json(store, keys::API_KEY, key)?,
            None => store.remove(keys::API_KEY)?,
        }
        match self.manual_theme {
            Some(theme) => write_json(store, keys::MANUAL_THEME, &theme.name)?,
            None => store.remove(keys::MANUAL_THEME)?,
        }
        Ok(())
    }

    /// Manual mode always has a pinned theme; the first catalog entry if none was chosen.
    pub fn ensure_manual_theme(&mut self) {
        if self.theme_mode == ThemeMode::Manual && self.manual_theme.is_none() {
            self.manual_theme = Some(&THEMES[0]);
        }
    }

    pub fn is_favorite(&self, location: &Location) -> bool {
        self.favorites.iter().any(|fav| fav.same_place(location))
    }

    /// Add a favorite unless one with the same name exists. Returns whether it was added.
    pub fn add_favorite(&mut self, location: Location) -> bool {
        if self.is_favorite(&location) {
            return false;
        }
        self.favorites.push(location);
        true
    }

    /// Remove every favorite sharing the location's name. Returns whether any was removed.
    pub fn remove_favorite(&mut self, location: &Location) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|fav| !fav.same_place(location));
        self.favorites.len() != before
    }
}

fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: SettingsStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "ignoring malformed stored setting");
            None
        }
    }
}

fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> ConfigResult<()>
where
    T: Serialize + ?Sized,
    S: SettingsStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| ConfigError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_empty_store_gives_defaults() {
        let settings = Settings::load(&MemoryStore::new());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.favorites[0].name, "London, UK");
        assert!(settings.effects_enabled);
        assert!(!settings.dark_mode);
        assert_eq!(settings.theme_mode, ThemeMode::Auto);
        assert!(settings.api_key.is_none());
        assert!(settings.manual_theme.is_none());
    }

    #[test]
    fn test_malformed_values_fall_back_individually() {
        let mut store = MemoryStore::new();
        store.set(keys::FAVORITES, "{broken".to_string()).unwrap();
        store.set(keys::DARK_MODE, "\"yes\"".to_string()).unwrap();
        store.set(keys::THEME_MODE, "\"sideways\"".to_string()).unwrap();
        store.set(keys::EFFECTS_ENABLED, "false".to_string()).unwrap();
        store.set(keys::MANUAL_THEME, "42".to_string()).unwrap();

        let settings = Settings::load(&store);
        assert_eq!(settings.favorites, default_favorites());
        assert!(!settings.dark_mode);
        assert_eq!(settings.theme_mode, ThemeMode::Auto);
        assert!(!settings.effects_enabled);
        assert!(settings.manual_theme.is_none());
    }

    #[test]
    fn test_roundtrip_through_store() {
        let mut store = MemoryStore::new();
        let mut settings = Settings {
            dark_mode: true,
            api_key: Some("secret".to_string()),
            effects_enabled: false,
            theme_mode: ThemeMode::Manual,
            manual_theme: find_theme("Ocean Deep"),
            ..Settings::default()
        };
        settings.add_favorite(Location::new("Seoul, Seoul", 37.57, 126.98));
        settings.save(&mut store).unwrap();

        assert_eq!(Settings::load(&store), settings);
        assert_eq!(store.get(keys::MANUAL_THEME).as_deref(), Some("\"Ocean Deep\""));
    }

    #[test]
    fn test_clearing_optionals_removes_keys() {
        let mut store = MemoryStore::new();
        store.set(keys::API_KEY, "\"old\"".to_string()).unwrap();
        store.set(keys::MANUAL_THEME, "\"Ocean Deep\"".to_string()).unwrap();

        Settings::default().save(&mut store).unwrap();
        assert_eq!(store.get(keys::API_KEY), None);
        assert_eq!(store.get(keys::MANUAL_THEME), None);
    }

    #[test]
    fn test_blank_api_key_reads_as_missing() {
        let mut store = MemoryStore::new();
        store.set(keys::API_KEY, "\"   \"".to_string()).unwrap();
        assert!(Settings::load(&store).api_key.is_none());
    }

    #[test]
    fn test_unknown_manual_theme_is_dropped() {
        let mut store = MemoryStore::new();
        store.set(keys::MANUAL_THEME, "\"Neon Swamp\"".to_string()).unwrap();
        assert!(Settings::load(&store).manual_theme.is_none());
    }

    #[test]
    fn test_manual_mode_pins_first_theme() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME_MODE, "\"manual\"".to_string()).unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.manual_theme.map(|t| t.name), Some("Sunny Day"));
    }

    #[test]
    fn test_favorites_are_identified_by_name() {
        let mut settings = Settings::default();
        assert!(!settings.add_favorite(Location::new("London, UK", 0.0, 0.0)));
        assert_eq!(settings.favorites.len(), 1);

        assert!(settings.add_favorite(Location::new("Paris, Ile-de-France", 48.87, 2.33)));
        assert!(settings.remove_favorite(&Location::new("London, UK", 10.0, 10.0)));
        assert_eq!(settings.favorites.len(), 1);
        assert_eq!(settings.favorites[0].name, "Paris, Ile-de-France");
        assert!(!settings.remove_favorite(&Location::new("Nowhere", 0.0, 0.0)));
    }
}
