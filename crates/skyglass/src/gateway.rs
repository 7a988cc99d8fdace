//! Weather data fetching from a WeatherAPI.com-compatible provider.
//!
//! The [`WeatherGateway`] trait is the only place the dashboard touches the
//! network. [`WeatherApiClient`] implements it with blocking `ureq` calls;
//! the dashboard runs those on worker threads.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use skyglass_core::{
    Astro, CurrentConditions, ForecastDay, HourlyPoint, Location, Pollutants, WeatherSnapshot,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Queries shorter than this never reach the provider.
pub const MIN_QUERY_CHARS: usize = 3;

/// Display name for a location found by IP lookup.
pub const CURRENT_LOCATION: &str = "Current Location";

const RADAR_ZOOM: u8 = 8;

/// Why a weather fetch failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider rejected the API key.
    #[error("[{status}] {message}")]
    Auth { status: u16, message: String },

    /// Anything else: network trouble, provider errors, unreadable responses.
    #[error("{message}")]
    Transient { message: String },
}

impl GatewayError {
    fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: &str) -> Self {
        match status {
            401 | 403 => Self::Auth {
                status,
                message: message.to_string(),
            },
            _ => Self::transient(format!("[{status}] {message}")),
        }
    }
}

/// Source of weather snapshots and location suggestions.
pub trait WeatherGateway: Send + Sync {
    /// Fetch a complete snapshot for `location`.
    fn fetch(&self, location: &Location, api_key: &str) -> Result<WeatherSnapshot, GatewayError>;

    /// Find where this machine is, from its public IP address.
    fn locate(&self, api_key: &str) -> Result<Location, GatewayError>;

    /// Look up locations matching `query`. Never fails; errors yield no results.
    fn search(&self, query: &str, api_key: &str) -> Vec<Location>;
}

/// Blocking client for the WeatherAPI.com REST API.
#[derive(Debug)]
pub struct WeatherApiClient {
    agent: ureq::Agent,
    base_url: String,
    forecast_days: u8,
}

impl WeatherApiClient {
    pub fn new(base_url: &str, timeout: Duration, forecast_days: u8) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            forecast_days,
        }
    }
}

impl WeatherGateway for WeatherApiClient {
    fn fetch(&self, location: &Location, api_key: &str) -> Result<WeatherSnapshot, GatewayError> {
        debug!(location = %location.name, "fetching forecast");
        let url = format!("{}/forecast.json", self.base_url);

        let request = self
            .agent
            .get(&url)
            .query("key", api_key)
            .query("q", format!("{},{}", location.lat, location.lon))
            .query("days", self.forecast_days.to_string())
            .query("aqi", "yes")
            .query("alerts", "yes")
            .call();
        let body: ForecastResponse = read_json(request, "Failed to fetch weather data.")?;
        adapt_forecast(body)
    }

    fn locate(&self, api_key: &str) -> Result<Location, GatewayError> {
        debug!("looking up location by IP");
        let url = format!("{}/ip.json", self.base_url);
        let request = self
            .agent
            .get(&url)
            .query("key", api_key)
            .query("q", "auto:ip")
            .call();
        let body: ApiIpLookup = read_json(request, "Unable to retrieve location.")?;
        Ok(Location::new(CURRENT_LOCATION, body.lat, body.lon))
    }

    fn search(&self, query: &str, api_key: &str) -> Vec<Location> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let url = format!("{}/search.json", self.base_url);
        let result = self
            .agent
            .get(&url)
            .query("key", api_key)
            .query("q", query)
            .call();

        let mut response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = response.status().as_u16(), "location search rejected");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "location search failed");
                return Vec::new();
            }
        };

        match response.body_mut().read_json::<Vec<ApiSearchResult>>() {
            Ok(results) => results.into_iter().map(adapt_search_result).collect(),
            Err(e) => {
                warn!(error = %e, "unreadable search response");
                Vec::new()
            }
        }
    }
}

/// Read a JSON body, turning non-success statuses into [`GatewayError`]s
/// carrying the provider's message when it sent one.
fn read_json<T: DeserializeOwned>(
    result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    fallback: &str,
) -> Result<T, GatewayError> {
    let mut response = result.map_err(|e| GatewayError::transient(format!("HTTP error: {e}")))?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        let message = response
            .body_mut()
            .read_json::<ApiErrorResponse>()
            .map(|body| body.error.message)
            .unwrap_or_else(|_| fallback.to_string());
        return Err(GatewayError::from_status(status, &message));
    }

    response
        .body_mut()
        .read_json()
        .map_err(|e| GatewayError::transient(format!("JSON parse error: {e}")))
}

/// RainViewer radar map centred on `location`.
pub fn radar_url(location: &Location, dark: bool) -> String {
    // RainViewer color schemes: 2 is dark, 3 is light.
    let scheme = if dark { 2 } else { 3 };
    format!(
        "https://www.rainviewer.com/map.html?loc={:.4},{:.4},{RADAR_ZOOM}&o=80&c={scheme}&t=1&l=1,1,0,2,0,0&s=1",
        location.lat, location.lon
    )
}

/// WeatherAPI `forecast.json` response (only the fields we use).
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: ApiLocation,
    current: ApiCurrent,
    forecast: ApiForecast,
    #[serde(default)]
    alerts: ApiAlerts,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
    #[serde(default)]
    region: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_kph: f64,
    wind_degree: f64,
    uv: f64,
    condition: ApiCondition,
    is_day: u8,
    #[serde(default)]
    air_quality: Option<ApiAirQuality>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiAirQuality {
    #[serde(rename = "us-epa-index")]
    us_epa_index: Option<i32>,
    co: Option<f64>,
    o3: Option<f64>,
    no2: Option<f64>,
    so2: Option<f64>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastDay {
    date: NaiveDate,
    day: ApiDay,
    astro: ApiAstro,
    #[serde(default)]
    hour: Vec<ApiHour>,
}

#[derive(Debug, Deserialize)]
struct ApiDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: ApiCondition,
}

#[derive(Debug, Deserialize)]
struct ApiAstro {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct ApiHour {
    /// Local time, "2024-06-01 15:00".
    time: String,
    temp_c: f64,
    condition: ApiCondition,
    #[serde(default)]
    chance_of_rain: f64,
    #[serde(default)]
    is_day: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiAlerts {
    #[serde(default)]
    alert: Vec<ApiAlert>,
}

#[derive(Debug, Deserialize)]
struct ApiAlert {
    headline: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// WeatherAPI `ip.json` response.
#[derive(Debug, Deserialize)]
struct ApiIpLookup {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSearchResult {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
}

/// Convert a provider response into a [`WeatherSnapshot`].
fn adapt_forecast(response: ForecastResponse) -> Result<WeatherSnapshot, GatewayError> {
    let ForecastResponse {
        location,
        current,
        forecast,
        alerts,
    } = response;

    let today = forecast
        .forecastday
        .first()
        .ok_or_else(|| GatewayError::transient("No forecast days in response"))?;

    let hourly = today
        .hour
        .iter()
        .map(|hour| HourlyPoint {
            label: hour_label(&hour.time),
            temp_c: round_temp(hour.temp_c),
            condition: hour.condition.text.clone(),
            precip_chance: percent(hour.chance_of_rain),
            is_day: hour.is_day.is_none_or(|d| d == 1),
        })
        .collect();

    let astro = Astro {
        sunrise: today.astro.sunrise.clone(),
        sunset: today.astro.sunset.clone(),
    };

    let daily = forecast
        .forecastday
        .iter()
        .map(|day| ForecastDay {
            date: day.date,
            min_temp_c: round_temp(day.day.mintemp_c),
            max_temp_c: round_temp(day.day.maxtemp_c),
            condition: day.day.condition.text.clone(),
        })
        .collect();

    let air = current.air_quality.unwrap_or_default();
    let pollutants = Pollutants {
        co: air.co.unwrap_or(0.0),
        o3: air.o3.unwrap_or(0.0),
        no2: air.no2.unwrap_or(0.0),
        so2: air.so2.unwrap_or(0.0),
        pm2_5: air.pm2_5.unwrap_or(0.0),
        pm10: air.pm10.unwrap_or(0.0),
    };

    Ok(WeatherSnapshot {
        location: Location::new(
            join_name(&[location.name.as_str(), location.region.as_str()]),
            location.lat,
            location.lon,
        ),
        current: CurrentConditions {
            temp_c: round_temp(current.temp_c),
            feels_like_c: round_temp(current.feelslike_c),
            humidity: percent(current.humidity),
            wind_kph: current.wind_kph,
            wind_degree: current.wind_degree,
            uv: current.uv,
            condition: current.condition.text,
            is_day: current.is_day == 1,
            aqi: air.us_epa_index.unwrap_or(0),
            pollutants,
        },
        daily,
        hourly,
        astro,
        alerts: alerts.alert.into_iter().map(|a| a.headline).collect(),
    })
}

fn adapt_search_result(result: ApiSearchResult) -> Location {
    Location::new(
        join_name(&[result.name.as_str(), result.region.as_str(), result.country.as_str()]),
        result.lat,
        result.lon,
    )
}

/// Join non-empty name parts with ", ".
fn join_name(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn round_temp(value: f64) -> i32 {
    value.round() as i32
}

fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// "2024-06-01 15:00" -> "3 PM". Unparseable times are shown as given.
fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .map(|t| t.format("%-I %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}
