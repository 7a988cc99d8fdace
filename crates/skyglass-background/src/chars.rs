//! Character sets for weather effects.

pub const RAIN_CHARS: &[char] = &['│', '╎', '┆', '|', '\''];

pub const STORM_RAIN_CHARS: &[char] = &['╱', '/', '⟋', '│'];

pub const SNOW_CHARS: &[char] = &['·', '•', '*', '❄', '❅', '❆', '✦', '✧', '°'];

pub const CLOUD_CHARS: &[char] = &['░', '▒', '▓', '·', '•'];

pub const SUN_CHARS: &[char] = &['·', '∙', '•', '*', '✦', '☼'];

pub const STAR_CHARS: &[char] = &['.', '*', '+', '·', '✦', '✧'];
