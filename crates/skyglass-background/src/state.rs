//! Background rendering: cross-faded gradient layers plus the effect overlay.

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use skyglass_core::Rgb;

use crate::color::to_color;
use crate::effects::precipitation::{
    RainColumn, SnowColumn, StormState, init_rain, init_snow, init_storm, rain_glyph, snow_glyph,
    storm_glyph, update_rain, update_snow, update_storm,
};
use crate::effects::sky::{aurora_glyph, cloud_glyph, sun_glyph};
use crate::effects::{Glyph, WeatherEffect};
use crate::layers::{BackgroundLayers, FADE_DURATION, Layer};

/// Page color underneath both layers.
const BASE: Rgb = Rgb(0, 0, 0);

/// Renderer state that persists between frames.
#[derive(Debug)]
pub struct BackgroundState {
    /// Rendered opacity of layer A, moving towards its target.
    opacity_a: f32,
    /// Rendered opacity of layer B, moving towards its target.
    opacity_b: f32,
    /// Effect the animation state below was built for.
    effect: Option<WeatherEffect>,
    rain: Vec<RainColumn>,
    snow: Vec<SnowColumn>,
    storm: Option<StormState>,
    last_width: u16,
    last_height: u16,
    /// Last update time in milliseconds.
    last_update_ms: u64,
    /// Seed captured at initialization for randomness.
    init_seed: u64,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundState {
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let init_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        Self {
            opacity_a: 1.0,
            opacity_b: 0.0,
            effect: None,
            rain: Vec::new(),
            snow: Vec::new(),
            storm: None,
            last_width: 0,
            last_height: 0,
            last_update_ms: 0,
            init_seed,
        }
    }

    /// Currently rendered opacity of a layer.
    pub fn layer_opacity(&self, layer: Layer) -> f32 {
        match layer {
            Layer::A => self.opacity_a,
            Layer::B => self.opacity_b,
        }
    }

    /// Move both layer opacities towards their targets.
    ///
    /// Each layer fades from wherever it currently is, so a flip that lands
    /// mid-fade reverses smoothly instead of jumping.
    pub fn advance_fade(&mut self, layers: &BackgroundLayers, delta_ms: u64) {
        let step = delta_ms as f32 / FADE_DURATION.as_millis() as f32;
        let approach = |current: f32, target: f32| {
            if current < target {
                (current + step).min(target)
            } else {
                (current - step).max(target)
            }
        };
        self.opacity_a = approach(self.opacity_a, layers.opacity(Layer::A));
        self.opacity_b = approach(self.opacity_b, layers.opacity(Layer::B));
    }

    /// Composite background color of a cell. Layer B stacks above layer A.
    pub fn background_at(
        &self,
        layers: &BackgroundLayers,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Rgb {
        let t = (x as f32 / width.max(1) as f32 + y as f32 / height.max(1) as f32) / 2.0;
        let a = layers.background(Layer::A).sample(t);
        let b = layers.background(Layer::B).sample(t);
        BASE.lerp(a, self.opacity_a).lerp(b, self.opacity_b)
    }

    /// Render the background and effect overlay to the whole frame.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        layers: &BackgroundLayers,
        effect: Option<WeatherEffect>,
        elapsed_ms: u64,
    ) {
        let area = frame.area();
        let width = area.width;
        let height = area.height;

        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;
        self.advance_fade(layers, delta_ms);

        let dimensions_changed = width != self.last_width || height != self.last_height;
        if dimensions_changed || effect != self.effect {
            self.reset_effect(effect, width, height);
        }
        self.update_effect(elapsed_ms, delta_ms, height);

        let lines: Vec<Line> = (0..height)
            .map(|y| {
                let spans: Vec<Span> = (0..width)
                    .map(|x| {
                        let bg = to_color(self.background_at(layers, x, y, width, height));
                        match self.effect_glyph(x, y, width, height, elapsed_ms) {
                            Some(glyph) => Span::styled(
                                glyph.ch.to_string(),
                                Style::new().fg(to_color(glyph.color)).bg(bg),
                            ),
                            None => Span::styled(" ", Style::new().bg(bg)),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Rebuild stateful animation columns for a new effect or terminal size.
    fn reset_effect(&mut self, effect: Option<WeatherEffect>, width: u16, height: u16) {
        self.rain.clear();
        self.snow.clear();
        self.storm = None;

        match effect {
            Some(WeatherEffect::Rain) => self.rain = init_rain(width, height, self.init_seed),
            Some(WeatherEffect::Snow) => self.snow = init_snow(width, height, self.init_seed),
            Some(WeatherEffect::Thunderstorm) => {
                self.storm = Some(init_storm(width, height, self.init_seed))
            }
            _ => {}
        }

        self.effect = effect;
        self.last_width = width;
        self.last_height = height;
    }

    fn update_effect(&mut self, elapsed_ms: u64, delta_ms: u64, height: u16) {
        match self.effect {
            Some(WeatherEffect::Rain) => update_rain(&mut self.rain, delta_ms, height),
            Some(WeatherEffect::Snow) => update_snow(&mut self.snow, delta_ms, height),
            Some(WeatherEffect::Thunderstorm) => {
                if let Some(storm) = self.storm.as_mut() {
                    update_storm(storm, elapsed_ms, delta_ms, height);
                }
            }
            _ => {}
        }
    }

    fn effect_glyph(&self, x: u16, y: u16, width: u16, height: u16, elapsed_ms: u64) -> Option<Glyph> {
        match self.effect? {
            WeatherEffect::Rain => rain_glyph(&self.rain, x, y),
            WeatherEffect::Snow => snow_glyph(&self.snow, x, y, elapsed_ms),
            WeatherEffect::Thunderstorm => storm_glyph(self.storm.as_ref()?, x, y),
            WeatherEffect::Clouds { dark } => cloud_glyph(x, y, width, height, elapsed_ms, dark),
            WeatherEffect::SunRays => sun_glyph(x, y, width, height, elapsed_ms),
            WeatherEffect::Aurora => aurora_glyph(x, y, width, height, elapsed_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyglass_core::Gradient;

    const DAY: Gradient = Gradient::new(0x3b82f6, 0x22d3ee, 0x7dd3fc);
    const NIGHT: Gradient = Gradient::new(0x1e1b4b, 0x0f172a, 0x000000);

    #[test]
    fn test_settled_state_shows_visible_layer() {
        let state = BackgroundState::new();
        let layers = BackgroundLayers::new(DAY);
        assert_eq!(state.background_at(&layers, 0, 0, 10, 10), DAY.from);
    }

    #[test]
    fn test_fade_takes_full_duration() {
        let mut state = BackgroundState::new();
        let mut layers = BackgroundLayers::new(DAY);
        layers.apply(NIGHT);

        state.advance_fade(&layers, 1000);
        assert!((state.layer_opacity(Layer::B) - 0.5).abs() < 1e-6);
        assert!((state.layer_opacity(Layer::A) - 0.5).abs() < 1e-6);

        state.advance_fade(&layers, 1000);
        assert_eq!(state.layer_opacity(Layer::B), 1.0);
        assert_eq!(state.layer_opacity(Layer::A), 0.0);
        assert_eq!(state.background_at(&layers, 0, 0, 10, 10), NIGHT.from);
    }

    #[test]
    fn test_flip_mid_fade_reverses_from_current_opacity() {
        let mut state = BackgroundState::new();
        let mut layers = BackgroundLayers::new(DAY);
        layers.apply(NIGHT);
        state.advance_fade(&layers, 500);
        assert!((state.layer_opacity(Layer::B) - 0.25).abs() < 1e-6);

        // Back to the day sky before the fade finished: A fades back in.
        layers.apply(DAY);
        state.advance_fade(&layers, 500);
        assert!((state.layer_opacity(Layer::A) - 1.0).abs() < 1e-6);
        assert!(state.layer_opacity(Layer::B).abs() < 1e-6);
    }

    #[test]
    fn test_effect_change_rebuilds_columns() {
        let mut state = BackgroundState::new();
        state.reset_effect(Some(WeatherEffect::Rain), 12, 8);
        assert_eq!(state.rain.len(), 12);
        assert!(state.snow.is_empty());

        state.reset_effect(Some(WeatherEffect::Thunderstorm), 12, 8);
        assert!(state.rain.is_empty());
        assert!(state.storm.is_some());

        state.reset_effect(None, 12, 8);
        assert!(state.storm.is_none());
        assert!(state.effect_glyph(0, 0, 12, 8, 0).is_none());
    }
}
