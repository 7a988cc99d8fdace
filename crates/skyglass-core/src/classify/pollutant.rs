//! Pollutant severity bars.

use crate::theme::Rgb;

/// Pollutants shown with a severity bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm2_5,
    Ozone,
    NitrogenDioxide,
}

/// One color per severity band, mildest first.
const SEVERITY_COLORS: [Rgb; 5] = [
    Rgb::from_hex(0x4ade80),
    Rgb::from_hex(0xfacc15),
    Rgb::from_hex(0xfb923c),
    Rgb::from_hex(0xef4444),
    Rgb::from_hex(0xa855f7),
];

/// The open top band ends at this multiple of the highest threshold.
const TOP_BAND_STRETCH: f64 = 1.5;

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Self::Pm2_5, Self::Ozone, Self::NitrogenDioxide];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Pm2_5 => "PM₂.₅",
            Self::Ozone => "Ozone",
            Self::NitrogenDioxide => "NO₂",
        }
    }

    /// Upper bounds (µg/m³) of the Good, Moderate, Unhealthy (SG) and
    /// Unhealthy bands.
    pub fn thresholds(self) -> [f64; 4] {
        match self {
            Self::Pm2_5 => [12.0, 35.0, 55.0, 150.0],
            Self::Ozone => [100.0, 160.0, 220.0, 265.0],
            Self::NitrogenDioxide => [100.0, 200.0, 400.0, 600.0],
        }
    }
}

/// Severity of one pollutant reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutantInfo {
    pub name: &'static str,
    /// Zero-based severity band, 0..=4.
    pub band: usize,
    /// Position within the band, 0.0..=100.0.
    pub percent: f64,
    pub color: Rgb,
}

/// Place a concentration within its severity band.
///
/// A value sitting exactly on a threshold belongs to the lower band and
/// reads as 100% of it. Negative and NaN concentrations read as zero.
pub fn classify_pollutant(kind: Pollutant, value: f64) -> PollutantInfo {
    let value = if value.is_nan() { 0.0 } else { value.max(0.0) };
    let thresholds = kind.thresholds();

    let band = thresholds.iter().take_while(|&&t| value > t).count();
    let floor = if band == 0 { 0.0 } else { thresholds[band - 1] };
    let ceiling = thresholds
        .get(band)
        .copied()
        .unwrap_or(thresholds[thresholds.len() - 1] * TOP_BAND_STRETCH);

    let percent = ((value - floor) / (ceiling - floor) * 100.0).clamp(0.0, 100.0);

    PollutantInfo {
        name: kind.display_name(),
        band,
        percent,
        color: SEVERITY_COLORS[band.min(SEVERITY_COLORS.len() - 1)],
    }
}
