//! Clouds, sun rays and aurora (stateless, computed from position and time).

use std::f32::consts::{PI, TAU};

use skyglass_core::Rgb;

use super::Glyph;
use crate::chars::{CLOUD_CHARS, STAR_CHARS, SUN_CHARS};
use crate::color::hsl_to_rgb;

const CLOUD_DRIFT_PERIOD_MS: u64 = 90_000;
const SUN_SHIMMER_PERIOD_MS: u64 = 12_000;
const AURORA_WAVE_PERIOD_MS: u64 = 20_000;
const SHOOTING_STAR_PERIOD_MS: u64 = 7_000;

// ========== CLOUDS ==========

fn cloud_density(x: f32, y: f32, frequency: f32, phase: f32) -> f32 {
    let wave1 = ((x * frequency + phase) * TAU).sin();
    let wave2 = ((y * frequency * 0.5 + phase + 1.0) * TAU).cos();
    let wave3 = (((x + y) * frequency * 0.3 + phase) * TAU).sin();

    ((wave1 + wave2 + wave3) / 3.0 + 1.0) / 2.0
}

/// Drifting cloud banks, denser towards the top of the screen.
pub fn cloud_glyph(x: u16, y: u16, width: u16, height: u16, elapsed_ms: u64, dark: bool) -> Option<Glyph> {
    let x_norm = x as f32 / width.max(1) as f32;
    let y_norm = y as f32 / height.max(1) as f32;
    let drift = (elapsed_ms % CLOUD_DRIFT_PERIOD_MS) as f32 / CLOUD_DRIFT_PERIOD_MS as f32;

    let near = cloud_density(x_norm + drift * 0.5, y_norm, 3.0, 0.0);
    let far = cloud_density(x_norm - drift * 0.3, y_norm, 5.0, 0.3);
    let density = (near * 0.6 + far * 0.4) * (1.0 - y_norm.powf(0.7));

    if density < 0.3 {
        return None;
    }

    let ch = if density > 0.7 {
        CLOUD_CHARS[1]
    } else if density > 0.5 {
        CLOUD_CHARS[0]
    } else {
        CLOUD_CHARS[3]
    };

    let color = if dark {
        let g = (51.0 + density * 40.0) as u8;
        Rgb(g, g + 4, g + 14)
    } else {
        let g = (215.0 + density * 40.0) as u8;
        Rgb(g, g, g)
    };
    Some(Glyph::new(ch, color))
}

// ========== SUN RAYS ==========

/// Rays from a sun in the top-right corner.
pub fn sun_glyph(x: u16, y: u16, width: u16, height: u16, elapsed_ms: u64) -> Option<Glyph> {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;

    let dx = x as f32 - w * 0.85;
    // Terminal cells are about twice as tall as they are wide.
    let dy = (y as f32 - h * 0.15) * 2.0;
    let distance = (dx * dx + dy * dy).sqrt();

    let radius = w.min(h) * 0.08;
    if distance < radius {
        let core = 1.0 - distance / radius;
        return Some(Glyph::new('●', Rgb(255, (220.0 + core * 35.0) as u8, 120)));
    }

    let phase = (elapsed_ms % SUN_SHIMMER_PERIOD_MS) as f32 / SUN_SHIMMER_PERIOD_MS as f32;
    let ray = ((dy.atan2(dx) + phase * TAU) * 12.0).sin().abs();
    let falloff = 1.0 - (distance / (w.max(h) * 0.6)).min(1.0);
    let intensity = ray * falloff;

    if falloff > 0.05 && ray > 0.6 && intensity > 0.3 {
        let idx = ((intensity * 5.0) as usize).min(SUN_CHARS.len() - 1);
        let g = (200.0 + intensity * 50.0) as u8;
        return Some(Glyph::new(SUN_CHARS[idx], Rgb(254, g, 138)));
    }

    None
}

// ========== AURORA ==========

/// Aurora curtains in the upper sky with occasional shooting stars.
pub fn aurora_glyph(x: u16, y: u16, width: u16, height: u16, elapsed_ms: u64) -> Option<Glyph> {
    if let Some(star) = shooting_star_glyph(x, y, width, height, elapsed_ms) {
        return Some(star);
    }

    let x_norm = x as f32 / width.max(1) as f32;
    let y_norm = y as f32 / height.max(1) as f32;
    let phase = (elapsed_ms % AURORA_WAVE_PERIOD_MS) as f32 / AURORA_WAVE_PERIOD_MS as f32;

    let wave1 = ((x_norm * 3.0 + phase * TAU).sin() + 1.0) / 2.0;
    let wave2 = ((x_norm * 5.0 - phase * 1.5 * PI + 1.0).sin() + 1.0) / 2.0;
    let wave3 = ((x_norm * 2.0 + phase * PI + 2.0).sin() + 1.0) / 2.0;
    let vertical = 1.0 - y_norm.powf(0.5);
    let intensity = (wave1 * 0.5 + wave2 * 0.3 + wave3 * 0.2) * vertical;

    let ch = if intensity > 0.7 {
        '▓'
    } else if intensity > 0.5 {
        '▒'
    } else if intensity > 0.3 {
        '░'
    } else {
        return twinkle_glyph(x, y, elapsed_ms);
    };

    // Hue drifts from green through cyan to indigo.
    let hue = 140.0 + ((elapsed_ms as f32 / 10_000.0 + x_norm * 0.5) % 1.0) * 110.0;
    let color = hsl_to_rgb(hue, 0.7, 0.2 + vertical * 0.3);
    Some(Glyph::new(ch, color))
}

/// Sparse twinkling stars.
fn twinkle_glyph(x: u16, y: u16, elapsed_ms: u64) -> Option<Glyph> {
    let frame = (elapsed_ms / 1500) as usize;
    let seed = (x as usize)
        .wrapping_mul(31)
        .wrapping_add((y as usize).wrapping_mul(17))
        .wrapping_add(frame);

    if seed % 100 >= 2 {
        return None;
    }
    let b = [120u8, 170, 220][seed % 3];
    Some(Glyph::new(STAR_CHARS[seed % STAR_CHARS.len()], Rgb(b, b, b.saturating_add(30))))
}

/// A short streak crossing the top third of the sky once per period.
fn shooting_star_glyph(x: u16, y: u16, width: u16, height: u16, elapsed_ms: u64) -> Option<Glyph> {
    let cycle = elapsed_ms / SHOOTING_STAR_PERIOD_MS;
    let t = (elapsed_ms % SHOOTING_STAR_PERIOD_MS) as f32 / 800.0;
    if t > 1.0 {
        return None;
    }

    let w = width.max(1) as f32;
    let start_x = ((cycle.wrapping_mul(37) % 60) as f32 / 100.0 + 0.2) * w;
    let start_y = (cycle.wrapping_mul(13) % (height.max(3) as u64 / 3).max(1)) as f32;

    let head_x = start_x - t * w * 0.3;
    let head_y = start_y + t * w * 0.3 * 0.25;
    let dx = x as f32 - head_x;
    let dy = y as f32 - head_y;

    // Trail stretches up and to the right of the head.
    if (0.0..6.0).contains(&dx) && (dy + dx * 0.25).abs() < 0.5 {
        let fade = 1.0 - dx / 6.0;
        let b = (120.0 + fade * 135.0) as u8;
        return Some(Glyph::new(if dx < 1.0 { '✦' } else { '─' }, Rgb(b, b, b)));
    }
    None
}
