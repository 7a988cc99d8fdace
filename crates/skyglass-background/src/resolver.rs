//! Theme resolution: which background to show and whether text must be dark.

use skyglass_core::{Gradient, Theme, ThemeMode, WeatherSnapshot, mentions_any};

/// Background used whenever the dark-mode toggle is on.
pub const DARK_MODE_BACKGROUND: Gradient = Gradient::new(0x0f172a, 0x1e1b4b, 0x000000);

/// Clear-sky background used before the first snapshot and for unmatched conditions.
pub const DEFAULT_BACKGROUND: Gradient = Gradient::new(0x60a5fa, 0x38bdf8, 0x67e8f9);

/// Everything the resolver looks at.
#[derive(Debug, Clone, Copy)]
pub struct ThemeInputs<'a> {
    pub mode: ThemeMode,
    pub manual_theme: Option<&'a Theme>,
    pub dark_mode: bool,
    pub snapshot: Option<&'a WeatherSnapshot>,
}

/// The resolved background and text contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub background: Gradient,
    pub dark_text: bool,
}

impl Resolution {
    const DEFAULT: Resolution = Resolution {
        background: DEFAULT_BACKGROUND,
        dark_text: false,
    };
}

/// A keyword rule in a sky table.
struct SkyRule {
    keywords: &'static [&'static str],
    background: Gradient,
    dark_text: bool,
}

/// Daytime rules in priority order.
const DAY_SKY: [SkyRule; 5] = [
    SkyRule {
        keywords: &["thunder"],
        background: Gradient::new(0x334155, 0x475569, 0x312e81),
        dark_text: false,
    },
    SkyRule {
        keywords: &["snow", "sleet"],
        background: Gradient::new(0xe2e8f0, 0xbae6fd, 0xbfdbfe),
        dark_text: true,
    },
    SkyRule {
        keywords: &["rain", "drizzle"],
        background: Gradient::new(0x0369a1, 0x475569, 0x4b5563),
        dark_text: false,
    },
    SkyRule {
        keywords: &["cloud", "overcast"],
        background: Gradient::new(0xd1d5db, 0xcbd5e1, 0x9ca3af),
        dark_text: true,
    },
    SkyRule {
        keywords: &["sun", "clear"],
        background: Gradient::new(0x3b82f6, 0x22d3ee, 0x7dd3fc),
        dark_text: false,
    },
];

/// Night rules in priority order. There is no sun rule; clear nights are starry.
const NIGHT_SKY: [SkyRule; 5] = [
    SkyRule {
        keywords: &["thunder"],
        background: Gradient::new(0x1e1b4b, 0x111827, 0x000000),
        dark_text: false,
    },
    SkyRule {
        keywords: &["snow", "sleet"],
        background: Gradient::new(0x1e293b, 0x164e63, 0x172554),
        dark_text: false,
    },
    SkyRule {
        keywords: &["rain", "drizzle"],
        background: Gradient::new(0x0f172a, 0x1e1b4b, 0x1e3a8a),
        dark_text: false,
    },
    SkyRule {
        keywords: &["cloud", "overcast"],
        background: Gradient::new(0x1e293b, 0x1f2937, 0x0f172a),
        dark_text: false,
    },
    SkyRule {
        keywords: &["clear"],
        background: Gradient::new(0x1e1b4b, 0x0f172a, 0x000000),
        dark_text: false,
    },
];

/// Resolve the active background.
///
/// Precedence: a pinned manual theme, then the dark-mode toggle, then the
/// clear-sky default while no snapshot exists, then the weather itself.
pub fn resolve_theme(inputs: &ThemeInputs<'_>) -> Resolution {
    if inputs.mode == ThemeMode::Manual
        && let Some(theme) = inputs.manual_theme
    {
        return Resolution {
            background: theme.background,
            dark_text: theme.dark_text,
        };
    }

    if inputs.dark_mode {
        return Resolution {
            background: DARK_MODE_BACKGROUND,
            dark_text: false,
        };
    }

    match inputs.snapshot {
        Some(snapshot) => sky_for(&snapshot.current.condition, snapshot.current.is_day),
        None => Resolution::DEFAULT,
    }
}

/// Weather-derived background for a condition text.
pub fn sky_for(condition: &str, is_day: bool) -> Resolution {
    let cond = condition.to_lowercase();
    let table: &[SkyRule] = if is_day { &DAY_SKY } else { &NIGHT_SKY };

    table
        .iter()
        .find(|rule| mentions_any(&cond, rule.keywords))
        .map(|rule| Resolution {
            background: rule.background,
            dark_text: rule.dark_text,
        })
        .unwrap_or(Resolution::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyglass_core::{
        Astro, CurrentConditions, Location, Pollutants, THEMES, find_theme,
    };

    fn snapshot(condition: &str, is_day: bool) -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location::new("Test, Place", 0.0, 0.0),
            current: CurrentConditions {
                temp_c: 10,
                feels_like_c: 8,
                humidity: 70,
                wind_kph: 12.0,
                wind_degree: 200.0,
                uv: 1.0,
                condition: condition.to_string(),
                is_day,
                aqi: 1,
                pollutants: Pollutants::default(),
            },
            daily: Vec::new(),
            hourly: Vec::new(),
            astro: Astro::default(),
            alerts: Vec::new(),
        }
    }

    fn auto<'a>(snapshot: Option<&'a WeatherSnapshot>) -> ThemeInputs<'a> {
        ThemeInputs {
            mode: ThemeMode::Auto,
            manual_theme: None,
            dark_mode: false,
            snapshot,
        }
    }

    #[test]
    fn test_manual_theme_wins_over_everything() {
        let storm = snapshot("Thunderstorm", false);
        let pinned = find_theme("Minty Fresh").unwrap();
        let inputs = ThemeInputs {
            mode: ThemeMode::Manual,
            manual_theme: Some(pinned),
            dark_mode: true,
            snapshot: Some(&storm),
        };

        let resolved = resolve_theme(&inputs);
        assert_eq!(resolved.background, pinned.background);
        assert!(resolved.dark_text);
    }

    #[test]
    fn test_manual_mode_without_pin_falls_through() {
        let inputs = ThemeInputs {
            mode: ThemeMode::Manual,
            manual_theme: None,
            dark_mode: true,
            snapshot: None,
        };
        assert_eq!(resolve_theme(&inputs).background, DARK_MODE_BACKGROUND);
    }

    #[test]
    fn test_pinned_theme_ignored_in_auto_mode() {
        let rain = snapshot("Heavy rain", true);
        let inputs = ThemeInputs {
            manual_theme: Some(&THEMES[4]),
            ..auto(Some(&rain))
        };
        assert_ne!(resolve_theme(&inputs).background, THEMES[4].background);
    }

    #[test]
    fn test_dark_mode_overrides_weather() {
        let snow = snapshot("Light snow", true);
        let inputs = ThemeInputs {
            dark_mode: true,
            ..auto(Some(&snow))
        };
        assert_eq!(
            resolve_theme(&inputs),
            Resolution {
                background: DARK_MODE_BACKGROUND,
                dark_text: false
            }
        );
    }

    #[test]
    fn test_no_snapshot_is_stable_default() {
        let first = resolve_theme(&auto(None));
        let second = resolve_theme(&auto(None));
        assert_eq!(first, second);
        assert_eq!(first.background, DEFAULT_BACKGROUND);
        assert!(!first.dark_text);
    }

    #[test]
    fn test_heavy_rain_by_day() {
        let rain = snapshot("Heavy rain", true);
        let resolved = resolve_theme(&auto(Some(&rain)));
        assert_eq!(resolved.background, DAY_SKY[2].background);
        assert!(!resolved.dark_text);
    }

    #[test]
    fn test_light_snow_by_day_uses_dark_text() {
        let snow = snapshot("Light snow", true);
        let resolved = resolve_theme(&auto(Some(&snow)));
        assert_eq!(resolved.background, DAY_SKY[1].background);
        assert!(resolved.dark_text);
    }

    #[test]
    fn test_thunder_checked_before_rain() {
        let resolved = sky_for("Patchy light rain with thunder", true);
        assert_eq!(resolved.background, DAY_SKY[0].background);
    }

    #[test]
    fn test_clear_night_is_starry() {
        let resolved = sky_for("Clear", false);
        assert_eq!(resolved.background, NIGHT_SKY[4].background);
        // Starry sky matches the catalog's "Starry Night" theme.
        assert_eq!(
            resolved.background,
            find_theme("Starry Night").unwrap().background
        );
    }

    #[test]
    fn test_sunny_at_night_has_no_rule() {
        assert_eq!(sky_for("Sunny", false), Resolution::DEFAULT);
    }

    #[test]
    fn test_dark_text_only_for_bright_daytime_skies() {
        assert!(sky_for("Partly cloudy", true).dark_text);
        assert!(sky_for("Overcast", true).dark_text);
        assert!(!sky_for("Light snow", false).dark_text);
        assert!(!sky_for("Mist", true).dark_text);
        assert!(!sky_for("Patchy rain nearby", true).dark_text);
    }

    #[test]
    fn test_unknown_condition_uses_default() {
        assert_eq!(sky_for("Volcanic ash", true), Resolution::DEFAULT);
        assert_eq!(sky_for("", false), Resolution::DEFAULT);
    }
}
