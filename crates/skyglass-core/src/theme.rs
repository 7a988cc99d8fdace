//! Colors, gradients and the fixed theme catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Linear blend towards `other`; `t` is clamped to 0.0-1.0.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A three-stop diagonal gradient, top-left to bottom-right.
///
/// Two gradients are the same background exactly when their stops match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gradient {
    pub from: Rgb,
    pub via: Rgb,
    pub to: Rgb,
}

impl Gradient {
    pub const fn new(from: u32, via: u32, to: u32) -> Self {
        Self {
            from: Rgb::from_hex(from),
            via: Rgb::from_hex(via),
            to: Rgb::from_hex(to),
        }
    }

    /// Color at position `t` (0.0 = `from`, 0.5 = `via`, 1.0 = `to`).
    pub fn sample(&self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            self.from.lerp(self.via, t * 2.0)
        } else {
            self.via.lerp(self.to, (t - 0.5) * 2.0)
        }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} → {}", self.from, self.via, self.to)
    }
}

/// A named background with its text-contrast flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Gradient,
    /// Whether text on this background must be dark to stay readable.
    pub dark_text: bool,
}

impl Theme {
    /// The catalog entry after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let idx = THEMES.iter().position(|t| t.name == self.name).unwrap_or(0);
        &THEMES[(idx + 1) % THEMES.len()]
    }
}

/// Every theme a user can pin in manual mode.
pub static THEMES: [Theme; 9] = [
    Theme {
        name: "Sunny Day",
        background: Gradient::new(0x60a5fa, 0x38bdf8, 0x67e8f9),
        dark_text: false,
    },
    Theme {
        name: "Misty Morning",
        background: Gradient::new(0xcbd5e1, 0xd1d5db, 0x94a3b8),
        dark_text: true,
    },
    Theme {
        name: "Stormy Sky",
        background: Gradient::new(0x1e293b, 0x334155, 0x312e81),
        dark_text: false,
    },
    Theme {
        name: "Starry Night",
        background: Gradient::new(0x1e1b4b, 0x0f172a, 0x000000),
        dark_text: false,
    },
    Theme {
        name: "Crimson Sunset",
        background: Gradient::new(0xf97316, 0xef4444, 0xdb2777),
        dark_text: false,
    },
    Theme {
        name: "Aurora Borealis",
        background: Gradient::new(0x115e59, 0x065f46, 0x312e81),
        dark_text: false,
    },
    Theme {
        name: "Cyberpunk City",
        background: Gradient::new(0x701a75, 0x4c1d95, 0x1e3a8a),
        dark_text: false,
    },
    Theme {
        name: "Ocean Deep",
        background: Gradient::new(0x1e3a8a, 0x075985, 0x0f172a),
        dark_text: false,
    },
    Theme {
        name: "Minty Fresh",
        background: Gradient::new(0x6ee7b7, 0x99f6e4, 0xa5f3fc),
        dark_text: true,
    },
];

/// Look up a catalog theme by its exact name.
pub fn find_theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

/// Whether the background follows the weather or a pinned theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Manual,
}

impl ThemeMode {
    /// Switch to the other mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Manual => "Manual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex(0x60a5fa), Rgb(0x60, 0xa5, 0xfa));
        assert_eq!(Rgb::from_hex(0x000000).to_string(), "#000000");
    }

    #[test]
    fn test_gradient_sample_endpoints() {
        let g = Gradient::new(0x000000, 0x808080, 0xffffff);
        assert_eq!(g.sample(0.0), Rgb(0, 0, 0));
        assert_eq!(g.sample(0.5), Rgb(0x80, 0x80, 0x80));
        assert_eq!(g.sample(1.0), Rgb(0xff, 0xff, 0xff));
        // Out-of-range positions clamp.
        assert_eq!(g.sample(-3.0), Rgb(0, 0, 0));
        assert_eq!(g.sample(7.0), Rgb(0xff, 0xff, 0xff));
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, a) in THEMES.iter().enumerate() {
            for b in &THEMES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_theme_next_wraps() {
        assert_eq!(THEMES[0].next().name, "Misty Morning");
        assert_eq!(THEMES[8].next().name, "Sunny Day");
    }

    #[test]
    fn test_find_theme() {
        assert_eq!(find_theme("Ocean Deep").map(|t| t.dark_text), Some(false));
        assert!(find_theme("ocean deep").is_none());
    }

    #[test]
    fn test_theme_mode_serde() {
        assert_eq!(serde_json::to_string(&ThemeMode::Manual).unwrap(), "\"manual\"");
        let mode: ThemeMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(mode, ThemeMode::Auto);
        assert_eq!(ThemeMode::Auto.toggle(), ThemeMode::Manual);
    }
}
