//! Weather-aware backgrounds for the skyglass dashboard.
//!
//! This crate resolves which background to show ([`resolve_theme`]), keeps
//! the two cross-fading layers that display it ([`BackgroundLayers`]), picks
//! a decorative overlay for the current condition ([`select_effect`]) and
//! renders all of it into a terminal frame ([`BackgroundState`]).

mod chars;
mod color;
mod effects;
mod layers;
mod resolver;
mod state;

pub use color::to_color;
pub use effects::{Glyph, WeatherEffect, select_effect};
pub use layers::{BackgroundLayers, FADE_DURATION, Layer};
pub use resolver::{
    DARK_MODE_BACKGROUND, DEFAULT_BACKGROUND, Resolution, ThemeInputs, resolve_theme, sky_for,
};
pub use state::BackgroundState;
