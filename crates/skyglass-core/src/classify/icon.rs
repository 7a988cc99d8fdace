//! Condition icons.

use super::mentions_any;

/// Icon category for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Thunder,
    Sun,
    Moon,
    Snow,
    Rain,
    Cloud,
}

impl WeatherIcon {
    /// Single-glyph rendering for terminal output.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Thunder => "⛈",
            Self::Sun => "☀",
            Self::Moon => "☾",
            Self::Snow => "❄",
            Self::Rain => "☂",
            Self::Cloud => "☁",
        }
    }
}

/// Pick the icon for a provider condition text.
///
/// Rules are checked in priority order and the first match wins; thunder
/// comes first because storm descriptions often mention rain as well.
/// Unmatched text falls back to [`WeatherIcon::Sun`].
pub fn select_weather_icon(condition: &str, is_day: bool) -> WeatherIcon {
    let cond = condition.to_lowercase();

    if mentions_any(&cond, &["thunder"]) {
        WeatherIcon::Thunder
    } else if cond.contains("sun") || (cond.contains("clear") && is_day) {
        WeatherIcon::Sun
    } else if cond.contains("clear") {
        WeatherIcon::Moon
    } else if mentions_any(&cond, &["snow", "sleet"]) {
        WeatherIcon::Snow
    } else if mentions_any(&cond, &["rain", "drizzle"]) {
        WeatherIcon::Rain
    } else if mentions_any(&cond, &["cloud", "overcast", "mist"]) {
        WeatherIcon::Cloud
    } else {
        WeatherIcon::Sun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thunder_beats_rain() {
        assert_eq!(
            select_weather_icon("Moderate or heavy rain with thunder", true),
            WeatherIcon::Thunder
        );
        assert_eq!(
            select_weather_icon("Thundery outbreaks possible", false),
            WeatherIcon::Thunder
        );
    }

    #[test]
    fn test_clear_depends_on_daylight() {
        assert_eq!(select_weather_icon("Clear", true), WeatherIcon::Sun);
        assert_eq!(select_weather_icon("Clear", false), WeatherIcon::Moon);
        // "Sunny" is a sun icon even after dark.
        assert_eq!(select_weather_icon("Sunny", false), WeatherIcon::Sun);
    }

    #[test]
    fn test_precipitation_and_cloud() {
        assert_eq!(select_weather_icon("Light sleet", true), WeatherIcon::Snow);
        assert_eq!(select_weather_icon("Patchy light drizzle", true), WeatherIcon::Rain);
        assert_eq!(select_weather_icon("OVERCAST", true), WeatherIcon::Cloud);
        assert_eq!(select_weather_icon("Mist", false), WeatherIcon::Cloud);
    }

    #[test]
    fn test_unmatched_falls_back_to_sun() {
        assert_eq!(select_weather_icon("", false), WeatherIcon::Sun);
        assert_eq!(select_weather_icon("Blowing dust", true), WeatherIcon::Sun);
    }
}
