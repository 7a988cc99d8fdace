//! Classification of raw weather values into display categories.
//!
//! Every function here is total: malformed input (negative AQI, NaN
//! concentrations, out-of-range degrees, unknown condition text) resolves to
//! a defined fallback instead of failing.

mod aqi;
mod icon;
mod pollutant;
mod wind;

pub use aqi::{AqiInfo, AqiTier, classify_aqi};
pub use icon::{WeatherIcon, select_weather_icon};
pub use pollutant::{Pollutant, PollutantInfo, classify_pollutant};
pub use wind::compass_direction;

/// Whether a lower-cased condition text contains any of the keywords.
pub fn mentions_any(condition: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| condition.contains(k))
}

/// Short sun-protection advice for a UV index.
pub fn uv_advisory(uv: f64) -> &'static str {
    if uv > 5.0 {
        "High Protection"
    } else {
        "Low Protection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_any() {
        assert!(mentions_any("patchy light drizzle", &["rain", "drizzle"]));
        assert!(!mentions_any("overcast", &["rain", "drizzle"]));
        assert!(!mentions_any("", &["rain"]));
    }

    #[test]
    fn test_uv_advisory() {
        assert_eq!(uv_advisory(5.0), "Low Protection");
        assert_eq!(uv_advisory(5.1), "High Protection");
        assert_eq!(uv_advisory(f64::NAN), "Low Protection");
    }
}
