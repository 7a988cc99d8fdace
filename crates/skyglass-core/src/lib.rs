//! Core types shared across the skyglass crates.
//!
//! This crate holds the weather data model produced by the gateway, the
//! fixed theme catalog, and the classification library that turns raw
//! provider values into display categories (AQI tiers, pollutant severity,
//! compass points and condition icons). Everything here is pure.

pub mod classify;
mod model;
mod theme;

pub use classify::{
    AqiInfo, AqiTier, Pollutant, PollutantInfo, WeatherIcon, classify_aqi, classify_pollutant,
    compass_direction, mentions_any, select_weather_icon, uv_advisory,
};
pub use model::{
    Astro, CurrentConditions, ForecastDay, HourlyPoint, Location, Pollutants, WeatherSnapshot,
};
pub use theme::{Gradient, Rgb, THEMES, Theme, ThemeMode, find_theme};
