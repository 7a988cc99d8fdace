//! Decorative weather effects drawn over the background gradient.
//!
//! Precipitation effects keep per-column state between frames; sky effects
//! are computed from position and time only.

pub(crate) mod precipitation;
pub(crate) mod sky;

use skyglass_core::{Rgb, mentions_any};

/// An animated overlay chosen from the current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEffect {
    /// Slanted rain with lightning flashes.
    Thunderstorm,
    Snow,
    Rain,
    /// Drifting clouds, darker after sunset.
    Clouds { dark: bool },
    SunRays,
    /// Aurora curtains with the odd shooting star.
    Aurora,
}

/// Pick the overlay for a condition.
///
/// Weather effects always show; the purely decorative sun rays and aurora
/// only show when effects are enabled.
pub fn select_effect(condition: &str, is_day: bool, effects_enabled: bool) -> Option<WeatherEffect> {
    let cond = condition.to_lowercase();

    if mentions_any(&cond, &["thunder"]) {
        return Some(WeatherEffect::Thunderstorm);
    }
    if mentions_any(&cond, &["snow", "sleet", "blizzard"]) {
        return Some(WeatherEffect::Snow);
    }
    if mentions_any(&cond, &["rain", "drizzle", "shower"]) {
        return Some(WeatherEffect::Rain);
    }
    if mentions_any(&cond, &["cloud", "overcast", "fog", "mist"]) {
        return Some(WeatherEffect::Clouds { dark: !is_day });
    }

    if effects_enabled {
        if is_day && mentions_any(&cond, &["sun", "clear"]) {
            return Some(WeatherEffect::SunRays);
        }
        if !is_day && cond.contains("clear") {
            return Some(WeatherEffect::Aurora);
        }
    }

    None
}

/// A single foreground character of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb,
}

impl Glyph {
    pub(crate) fn new(ch: char, color: Rgb) -> Self {
        Self { ch, color }
    }
}
