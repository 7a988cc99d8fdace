//! Wind direction as a compass point.

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_DEGREES: f64 = 360.0 / COMPASS_POINTS.len() as f64;

/// Nearest of the 16 compass points for a bearing in degrees clockwise from north.
///
/// Bearings outside 0..360 are wrapped first. A bearing exactly between two
/// points rounds clockwise, so 11.25° is "NNE". Non-finite input is "N".
pub fn compass_direction(degree: f64) -> &'static str {
    if !degree.is_finite() {
        return COMPASS_POINTS[0];
    }
    let degree = degree.rem_euclid(360.0);
    let sector = (degree / SECTOR_DEGREES).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cardinal_points() {
        assert_eq!(compass_direction(0.0), "N");
        assert_eq!(compass_direction(90.0), "E");
        assert_eq!(compass_direction(180.0), "S");
        assert_eq!(compass_direction(270.0), "W");
    }

    #[test]
    fn test_full_circle_wraps_to_north() {
        assert_eq!(compass_direction(360.0), "N");
        assert_eq!(compass_direction(355.0), "N");
        assert_eq!(compass_direction(720.0), "N");
    }

    #[test]
    fn test_sector_tie_rounds_clockwise() {
        assert_eq!(compass_direction(11.24), "N");
        assert_eq!(compass_direction(11.25), "NNE");
        assert_eq!(compass_direction(348.75), "N");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(compass_direction(-90.0), "W");
        assert_eq!(compass_direction(f64::NAN), "N");
        assert_eq!(compass_direction(f64::NEG_INFINITY), "N");
    }

    proptest! {
        #[test]
        fn test_periodic_in_360(d in -1.0e6f64..1.0e6) {
            prop_assert_eq!(compass_direction(d), compass_direction(d.rem_euclid(360.0)));
        }

        #[test]
        fn test_whole_turns_do_not_change_direction(d in 0.0f64..360.0, turns in -5i32..5) {
            let shifted = d + 360.0 * turns as f64;
            // Exact sector ties can flip under float error, so skip them.
            let frac = (d / 22.5).fract();
            prop_assume!((frac - 0.5).abs() > 1e-6);
            prop_assert_eq!(compass_direction(d), compass_direction(shifted));
        }
    }
}
