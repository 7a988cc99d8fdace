//! Two-layer cross-fade state machine.
//!
//! Exactly one layer is visible at a time. A new background is written to
//! the hidden layer and the layers swap roles; the renderer fades between
//! them over [`FADE_DURATION`]. The machine itself has no "transitioning"
//! state, it only tracks which layer holds which background.

use std::time::Duration;

use skyglass_core::Gradient;
use tracing::debug;

/// How long the renderer takes to cross-fade after a flip.
pub const FADE_DURATION: Duration = Duration::from_millis(2000);

/// One of the two background layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    A,
    B,
}

impl Layer {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundLayers {
    a: Gradient,
    b: Gradient,
    active: Layer,
    /// Number of flips so far; lets the renderer spot a new transition.
    flips: u64,
}

impl BackgroundLayers {
    /// Both layers start on `initial`, with A visible.
    pub fn new(initial: Gradient) -> Self {
        Self {
            a: initial,
            b: initial,
            active: Layer::A,
            flips: 0,
        }
    }

    pub fn active(&self) -> Layer {
        self.active
    }

    pub fn flips(&self) -> u64 {
        self.flips
    }

    /// Background assigned to a layer.
    pub fn background(&self, layer: Layer) -> Gradient {
        match layer {
            Layer::A => self.a,
            Layer::B => self.b,
        }
    }

    /// Background of the visible layer (the target of any fade in progress).
    pub fn visible(&self) -> Gradient {
        self.background(self.active)
    }

    /// Background of the hidden layer (the one fading out).
    pub fn hidden(&self) -> Gradient {
        self.background(self.active.other())
    }

    /// Target opacity of a layer: 1.0 when visible, 0.0 when hidden.
    pub fn opacity(&self, layer: Layer) -> f32 {
        if layer == self.active { 1.0 } else { 0.0 }
    }

    /// Show `background`, returning whether the layers flipped.
    ///
    /// Only the visible layer's background is compared, so a change that
    /// arrives mid-fade targets the other layer without disturbing either.
    pub fn apply(&mut self, background: Gradient) -> bool {
        if background == self.visible() {
            return false;
        }

        let incoming = self.active.other();
        match incoming {
            Layer::A => self.a = background,
            Layer::B => self.b = background,
        }
        self.active = incoming;
        self.flips += 1;
        debug!(layer = ?incoming, %background, "background layers flipped");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Gradient = Gradient::new(0x60a5fa, 0x38bdf8, 0x67e8f9);
    const RAIN: Gradient = Gradient::new(0x0369a1, 0x475569, 0x4b5563);
    const SNOW: Gradient = Gradient::new(0xe2e8f0, 0xbae6fd, 0xbfdbfe);
    const STORM: Gradient = Gradient::new(0x334155, 0x475569, 0x312e81);

    #[test]
    fn test_starts_with_both_layers_on_initial() {
        let layers = BackgroundLayers::new(START);
        assert_eq!(layers.active(), Layer::A);
        assert_eq!(layers.visible(), START);
        assert_eq!(layers.hidden(), START);
        assert_eq!(layers.opacity(Layer::A), 1.0);
        assert_eq!(layers.opacity(Layer::B), 0.0);
    }

    #[test]
    fn test_change_writes_hidden_layer_and_flips() {
        let mut layers = BackgroundLayers::new(START);
        assert!(layers.apply(RAIN));
        assert_eq!(layers.active(), Layer::B);
        assert_eq!(layers.background(Layer::B), RAIN);
        assert_eq!(layers.background(Layer::A), START);
        assert_eq!(layers.flips(), 1);
    }

    #[test]
    fn test_repeated_identical_resolution_is_noop() {
        let mut layers = BackgroundLayers::new(START);
        layers.apply(RAIN);
        let before = layers.clone();

        assert!(!layers.apply(RAIN));
        assert!(!layers.apply(RAIN));
        assert_eq!(layers, before);
    }

    #[test]
    fn test_initial_background_is_noop() {
        let mut layers = BackgroundLayers::new(START);
        assert!(!layers.apply(START));
        assert_eq!(layers.flips(), 0);
    }

    #[test]
    fn test_rapid_changes_keep_last_two() {
        let mut layers = BackgroundLayers::new(START);
        layers.apply(RAIN);
        layers.apply(SNOW);
        layers.apply(STORM);

        assert_eq!(layers.visible(), STORM);
        assert_eq!(layers.hidden(), SNOW);
        assert_eq!(layers.flips(), 3);
    }

    #[test]
    fn test_returning_to_hidden_background_still_flips() {
        let mut layers = BackgroundLayers::new(START);
        layers.apply(RAIN);
        // START is still on the hidden layer; switching back fades it in again.
        assert!(layers.apply(START));
        assert_eq!(layers.visible(), START);
        assert_eq!(layers.hidden(), RAIN);
    }
}
