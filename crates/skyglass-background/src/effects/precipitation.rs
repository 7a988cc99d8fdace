//! Rain, snow and thunderstorm animations (stateful).

use skyglass_core::Rgb;

use super::Glyph;
use crate::chars::{RAIN_CHARS, SNOW_CHARS, STORM_RAIN_CHARS};

// ========== RAIN ==========

/// State for a single rain column.
#[derive(Debug, Clone)]
pub struct RainColumn {
    /// Current y position of the drop.
    pub y: f32,
    /// Speed multiplier for this column.
    pub speed: f32,
    /// Character seed for variety.
    pub char_seed: usize,
    /// Intensity (0=light, 1=medium, 2=heavy).
    pub intensity: u8,
}

/// Initialize rain columns for the given dimensions.
pub fn init_rain(width: u16, height: u16, init_seed: u64) -> Vec<RainColumn> {
    (0..width)
        .map(|x| {
            let mixed = (x as usize).wrapping_mul(29).wrapping_add(init_seed as usize);
            let stagger = (mixed.wrapping_mul(13) % (height.max(1) as usize * 2)) as f32;
            RainColumn {
                y: -stagger,
                speed: 0.8 + (mixed.wrapping_mul(17) % 10) as f32 / 25.0,
                char_seed: mixed.wrapping_mul(23),
                intensity: (mixed.wrapping_mul(7) % 3) as u8,
            }
        })
        .collect()
}

/// Advance rain columns by `delta_ms`.
pub fn update_rain(columns: &mut [RainColumn], delta_ms: u64, height: u16) {
    let delta_y = delta_ms as f32 / 40.0;

    for col in columns {
        col.y += delta_y * col.speed;
        if col.y > height as f32 + 1.0 {
            col.y = -1.0;
            col.char_seed = col.char_seed.wrapping_add(1);
        }
    }
}

/// Rain glyph at a cell, if a drop is there.
pub fn rain_glyph(columns: &[RainColumn], x: u16, y: u16) -> Option<Glyph> {
    let col = columns.get(x as usize)?;
    if (y as f32 - col.y).abs() >= 0.6 {
        return None;
    }

    let ch = RAIN_CHARS[col.char_seed % RAIN_CHARS.len()];
    // Pale blue streaks that read on both light and dark skies.
    let color = match col.intensity {
        0 => Rgb(191, 219, 254),
        1 => Rgb(147, 197, 253),
        _ => Rgb(96, 165, 250),
    };
    Some(Glyph::new(ch, color))
}

// ========== SNOW ==========

/// State for a single snowfall column.
#[derive(Debug, Clone)]
pub struct SnowColumn {
    /// Current y position of the flake.
    pub y: f32,
    /// Speed multiplier for this column.
    pub speed: f32,
    /// Horizontal drift phase offset.
    pub drift_phase: f32,
    /// Size category (0=small, 1=medium, 2=large).
    pub size: u8,
    /// Seed for character generation.
    pub char_seed: usize,
}

/// Initialize snowfall columns for the given dimensions.
pub fn init_snow(width: u16, height: u16, init_seed: u64) -> Vec<SnowColumn> {
    (0..width)
        .map(|x| {
            let mixed = (x as usize).wrapping_mul(31).wrapping_add(init_seed as usize);
            let stagger =
                (mixed.wrapping_mul(11).wrapping_add(7) % (height.max(1) as usize * 3)) as f32;
            SnowColumn {
                y: -stagger,
                speed: 0.2 + (mixed.wrapping_mul(17) % 10) as f32 / 20.0,
                drift_phase: (mixed.wrapping_mul(23) % 100) as f32 / 100.0,
                size: (mixed.wrapping_mul(13) % 3) as u8,
                char_seed: mixed.wrapping_mul(19),
            }
        })
        .collect()
}

/// Advance snowfall columns by `delta_ms`.
pub fn update_snow(columns: &mut [SnowColumn], delta_ms: u64, height: u16) {
    let delta_y = delta_ms as f32 / 80.0;

    for col in columns {
        col.y += delta_y * col.speed;
        if col.y > height as f32 + 2.0 {
            col.y = -2.0;
            col.char_seed = col.char_seed.wrapping_add(1);
        }
    }
}

/// Snowflake glyph at a cell, if a flake is there.
pub fn snow_glyph(columns: &[SnowColumn], x: u16, y: u16, elapsed_ms: u64) -> Option<Glyph> {
    let col = columns.get(x as usize)?;

    let drift = ((elapsed_ms as f32 / 3000.0 + col.drift_phase) * std::f32::consts::TAU).sin() * 1.5;
    let flake_y = col.y + drift * 0.1;
    if (y as f32 - flake_y).abs() >= 0.8 {
        return None;
    }

    // Small flakes use the first three chars, large ones the last three.
    let idx = col.size as usize * 3 + col.char_seed % 3;
    let ch = SNOW_CHARS[idx % SNOW_CHARS.len()];
    let color = match col.size {
        0 => Rgb(203, 213, 225),
        1 => Rgb(226, 232, 240),
        _ => Rgb(255, 255, 255),
    };
    Some(Glyph::new(ch, color))
}

// ========== THUNDERSTORM ==========

/// Rain plus lightning.
#[derive(Debug, Clone)]
pub struct StormState {
    pub rain: Vec<RainColumn>,
    /// Time of the last flash.
    pub last_flash_ms: u64,
    /// Duration of the current flash (0 = no flash).
    pub flash_duration_ms: u64,
    /// Gap before the next flash.
    pub next_flash_in_ms: u64,
    /// Flash intensity, 0.0-1.0.
    pub flash_intensity: f32,
    pub seed: u64,
}

/// Lightning gaps fall between these bounds.
const FLASH_GAP_MS: (u64, u64) = (1500, 6000);

pub fn init_storm(width: u16, height: u16, init_seed: u64) -> StormState {
    StormState {
        rain: init_rain(width, height, init_seed),
        last_flash_ms: 0,
        flash_duration_ms: 0,
        next_flash_in_ms: 1000 + init_seed % 3000,
        flash_intensity: 0.0,
        seed: init_seed,
    }
}

/// Advance storm rain and the lightning cycle.
pub fn update_storm(state: &mut StormState, elapsed_ms: u64, delta_ms: u64, height: u16) {
    update_rain(&mut state.rain, delta_ms, height);

    let since_flash = elapsed_ms.saturating_sub(state.last_flash_ms);

    if state.flash_duration_ms > 0 {
        if since_flash > state.flash_duration_ms {
            state.flash_duration_ms = 0;
            state.flash_intensity = 0.0;
            let (min_gap, max_gap) = FLASH_GAP_MS;
            state.next_flash_in_ms = min_gap + state.seed.wrapping_mul(17) % (max_gap - min_gap);
            state.seed = state.seed.wrapping_add(elapsed_ms);
        } else {
            let progress = since_flash as f32 / state.flash_duration_ms as f32;
            state.flash_intensity = (1.0 - progress).max(0.0);
        }
    } else if since_flash > state.next_flash_in_ms {
        state.last_flash_ms = elapsed_ms;
        state.flash_duration_ms = 100 + state.seed % 150;
        state.flash_intensity = 1.0;
    }
}

/// Storm glyph at a cell: a slanted rain streak, or sparse glow during a flash.
pub fn storm_glyph(state: &StormState, x: u16, y: u16) -> Option<Glyph> {
    let col = state.rain.get(x as usize)?;
    let y_f = y as f32;
    let distance = (y_f - col.y).abs();

    const TRAIL: f32 = 2.5;
    if distance < TRAIL && y_f >= col.y {
        let ch = STORM_RAIN_CHARS[col.char_seed % STORM_RAIN_CHARS.len()];
        let fade = 1.0 - (distance / TRAIL) * 0.6;
        let base = Rgb(148, 163, 184);
        let boost = (state.flash_intensity * 100.0 * fade) as u8;
        let color = Rgb(
            ((base.0 as f32 * fade) as u8).saturating_add(boost),
            ((base.1 as f32 * fade) as u8).saturating_add(boost),
            ((base.2 as f32 * fade) as u8).saturating_add(boost),
        );
        return Some(Glyph::new(ch, color));
    }

    if state.flash_intensity > 0.3 {
        let seed = (x as usize).wrapping_mul(17).wrapping_add(y as usize * 31);
        if seed % 8 < 3 {
            let b = 150 + (state.flash_intensity * 100.0) as u8;
            return Some(Glyph::new('·', Rgb(b, b, 255)));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_columns_match_width() {
        let cols = init_rain(40, 10, 7);
        assert_eq!(cols.len(), 40);
        assert!(cols.iter().all(|c| c.y <= 0.0));
    }

    #[test]
    fn test_rain_wraps_to_top() {
        let mut cols = init_rain(1, 5, 0);
        cols[0].y = 5.5;
        update_rain(&mut cols, 400, 5);
        assert_eq!(cols[0].y, -1.0);
    }

    #[test]
    fn test_rain_glyph_only_at_drop() {
        let mut cols = init_rain(1, 10, 0);
        cols[0].y = 3.0;
        assert!(rain_glyph(&cols, 0, 3).is_some());
        assert!(rain_glyph(&cols, 0, 6).is_none());
        assert!(rain_glyph(&cols, 5, 3).is_none());
    }

    #[test]
    fn test_zero_height_does_not_panic() {
        assert_eq!(init_snow(3, 0, 1).len(), 3);
        assert_eq!(init_rain(3, 0, 1).len(), 3);
    }

    #[test]
    fn test_storm_flash_cycle() {
        let mut storm = init_storm(4, 10, 0);
        // First gap is 1000ms for seed 0.
        update_storm(&mut storm, 1001, 16, 10);
        assert_eq!(storm.flash_intensity, 1.0);
        assert_eq!(storm.flash_duration_ms, 100);

        update_storm(&mut storm, 1051, 50, 10);
        assert!(storm.flash_intensity > 0.0 && storm.flash_intensity < 1.0);

        update_storm(&mut storm, 1300, 249, 10);
        assert_eq!(storm.flash_intensity, 0.0);
        assert_eq!(storm.flash_duration_ms, 0);
        assert!(storm.next_flash_in_ms >= FLASH_GAP_MS.0);
    }
}
