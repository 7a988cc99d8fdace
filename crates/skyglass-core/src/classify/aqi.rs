//! US EPA air quality index tiers.

use crate::theme::Rgb;

/// Health tier for an AQI index.
///
/// Variants are ordered by severity, with `Unknown` below every real tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AqiTier {
    Unknown,
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Ceiling index (inclusive) of each closed band, ascending.
/// Anything above the last ceiling is [`AqiTier::Hazardous`].
const AQI_BANDS: [(i32, AqiTier); 5] = [
    (1, AqiTier::Good),
    (2, AqiTier::Moderate),
    (3, AqiTier::UnhealthyForSensitive),
    (4, AqiTier::Unhealthy),
    (5, AqiTier::VeryUnhealthy),
];

impl AqiTier {
    /// Tier for a provider index. Indices below 1 are `Unknown`.
    pub fn from_index(index: i32) -> Self {
        if index < 1 {
            return Self::Unknown;
        }
        AQI_BANDS
            .iter()
            .find(|(ceiling, _)| index <= *ceiling)
            .map(|(_, tier)| *tier)
            .unwrap_or(Self::Hazardous)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy (SG)",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unknown => "Unknown",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Good => Rgb::from_hex(0x4ade80),
            Self::Moderate => Rgb::from_hex(0xfacc15),
            Self::UnhealthyForSensitive => Rgb::from_hex(0xfb923c),
            Self::Unhealthy => Rgb::from_hex(0xef4444),
            Self::VeryUnhealthy => Rgb::from_hex(0xa855f7),
            Self::Hazardous => Rgb::from_hex(0xbe123c),
            Self::Unknown => Rgb::from_hex(0x9ca3af),
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            Self::Good => "Air quality is excellent.",
            Self::Moderate => "Acceptable for most individuals.",
            Self::UnhealthyForSensitive => "Sensitive groups may be affected.",
            Self::Unhealthy => "Health effects can be felt.",
            Self::VeryUnhealthy => "Health alert: risk for everyone.",
            Self::Hazardous => "Serious risk of health effects.",
            Self::Unknown => "AQI data not available.",
        }
    }
}

/// Display descriptor for an AQI reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiInfo {
    pub tier: AqiTier,
    pub label: &'static str,
    pub color: Rgb,
    pub advisory: &'static str,
}

/// Classify an AQI index into its tier, label, color and advisory.
pub fn classify_aqi(index: i32) -> AqiInfo {
    let tier = AqiTier::from_index(index);
    AqiInfo {
        tier,
        label: tier.label(),
        color: tier.color(),
        advisory: tier.advisory(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_documented_tiers() {
        let expected = [
            (1, "Good"),
            (2, "Moderate"),
            (3, "Unhealthy (SG)"),
            (4, "Unhealthy"),
            (5, "Very Unhealthy"),
            (6, "Hazardous"),
        ];
        for (index, label) in expected {
            assert_eq!(classify_aqi(index).label, label, "index {index}");
        }
    }

    #[test]
    fn test_open_top_band() {
        assert_eq!(classify_aqi(6).tier, AqiTier::Hazardous);
        assert_eq!(classify_aqi(100).tier, AqiTier::Hazardous);
        assert_eq!(classify_aqi(i32::MAX).tier, AqiTier::Hazardous);
    }

    #[test]
    fn test_unknown_below_scale() {
        for index in [0, -1, i32::MIN] {
            let info = classify_aqi(index);
            assert_eq!(info.tier, AqiTier::Unknown);
            assert_eq!(info.advisory, "AQI data not available.");
        }
    }

    proptest! {
        #[test]
        fn test_tier_is_monotonic(a in 1i32..10_000, b in 1i32..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(AqiTier::from_index(lo) <= AqiTier::from_index(hi));
        }

        #[test]
        fn test_positive_index_is_never_unknown(index in 1i32..=i32::MAX) {
            prop_assert_ne!(AqiTier::from_index(index), AqiTier::Unknown);
        }
    }
}
