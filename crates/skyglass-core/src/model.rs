//! Weather data model.
//!
//! A [`WeatherSnapshot`] is built once per successful fetch and replaced
//! wholesale by the next one; nothing patches it in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A place the dashboard can show weather for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable name, e.g. "Seoul, Seoul" or "London, City of London, United Kingdom".
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Whether two locations are the same favorite.
    ///
    /// Identity is the display name; two entries with the same name but
    /// different coordinates count as one place.
    pub fn same_place(&self, other: &Location) -> bool {
        self.name == other.name
    }
}

/// Pollutant concentrations in µg/m³ (CO as reported by the provider).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: f64,
    pub o3: f64,
    pub no2: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

/// Current conditions at the selected location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius, rounded.
    pub temp_c: i32,
    /// Feels-like temperature in Celsius, rounded.
    pub feels_like_c: i32,
    /// Relative humidity, 0-100.
    pub humidity: u8,
    /// Wind speed in km/h.
    pub wind_kph: f64,
    /// Wind direction, degrees clockwise from north.
    pub wind_degree: f64,
    /// UV index.
    pub uv: f64,
    /// Free-text provider condition, e.g. "Partly cloudy".
    pub condition: String,
    /// Whether the sun is up at the location.
    pub is_day: bool,
    /// US EPA index as reported by the provider; 0 when unavailable.
    pub aqi: i32,
    pub pollutants: Pollutants,
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp_c: i32,
    pub max_temp_c: i32,
    pub condition: String,
}

/// One hour of today's forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Display label such as "3 PM".
    pub label: String,
    pub temp_c: i32,
    pub condition: String,
    /// Chance of precipitation, 0-100.
    pub precip_chance: u8,
    /// Whether the sun is up during this hour.
    pub is_day: bool,
}

/// Sunrise and sunset as provider-formatted local times ("06:42 AM").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

/// A complete fetch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub daily: Vec<ForecastDay>,
    pub hourly: Vec<HourlyPoint>,
    pub astro: Astro,
    /// Alert headlines, most relevant first.
    pub alerts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_place_compares_names_only() {
        let a = Location::new("Springfield", 39.78, -89.65);
        let b = Location::new("Springfield", 37.21, -93.29);
        let c = Location::new("Springfield, IL", 39.78, -89.65);

        assert!(a.same_place(&b));
        assert!(!a.same_place(&c));
    }

    #[test]
    fn test_location_serializes_as_flat_object() {
        let loc = Location::new("London, UK", 51.52, -0.11);
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, r#"{"name":"London, UK","lat":51.52,"lon":-0.11}"#);
    }
}
