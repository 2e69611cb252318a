//! Theme colors derived from a single seed.
//!
//! The UI styles itself through CSS variables in `h s% l%` form. Tones are an
//! HSL approximation of the Material light and dark schemes: hue from the
//! seed, saturation scaled per role, lightness fixed per tone.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seed used until the user picks one (redwood)
pub const DEFAULT_THEME_SEED: &str = "#A35C4E";

/// A color in hue/saturation/lightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in whole degrees, `0..360`
    pub h: i32,
    /// Saturation percentage, one decimal
    pub s: f64,
    /// Lightness percentage, one decimal
    pub l: f64,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_channels(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match digits.len() {
        3 => {
            let mut doubled = digits.chars().map(|c| format!("{c}{c}"));
            Some((
                channel(&doubled.next()?)?,
                channel(&doubled.next()?)?,
                channel(&doubled.next()?)?,
            ))
        }
        6 => Some((
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Converts `#rrggbb` or `#rgb` to HSL. Anything else is black.
#[must_use]
pub fn hex_to_hsl(hex: &str) -> Hsl {
    let (r, g, b) = parse_channels(hex.trim()).unwrap_or((0, 0, 0));
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;

    let sector = if delta <= 0.0 {
        0.0
    } else if (cmax - r).abs() < f64::EPSILON {
        ((g - b) / delta) % 6.0
    } else if (cmax - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    // Half-up rounding on the degree value, then wrap negatives
    #[allow(clippy::cast_possible_truncation)]
    let mut h = (sector * 60.0 + 0.5).floor() as i32;
    if h < 0 {
        h += 360;
    }

    let l = (cmax + cmin) / 2.0;
    let s = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl {
        h,
        s: round_one_decimal(s * 100.0),
        l: round_one_decimal(l * 100.0),
    }
}

#[derive(Clone, Copy)]
enum Role {
    Primary,
    Secondary,
    Neutral,
    NeutralVariant,
}

impl Role {
    const fn saturation_factor(self) -> f64 {
        match self {
            Self::Primary => 1.0,
            Self::Secondary => 0.35,
            Self::Neutral => 0.08,
            Self::NeutralVariant => 0.16,
        }
    }
}

// (variable, role, light tone, dark tone)
const SCHEME: [(&str, Role, f64, f64); 14] = [
    ("--p", Role::Primary, 40.0, 80.0),
    ("--op", Role::Primary, 100.0, 20.0),
    ("--pc", Role::Primary, 90.0, 30.0),
    ("--opc", Role::Primary, 10.0, 90.0),
    ("--bg", Role::Neutral, 99.0, 6.0),
    ("--obg", Role::Neutral, 10.0, 90.0),
    ("--s", Role::Neutral, 98.0, 6.0),
    ("--os", Role::Neutral, 10.0, 90.0),
    ("--sv", Role::NeutralVariant, 90.0, 30.0),
    ("--osv", Role::NeutralVariant, 30.0, 80.0),
    ("--sec", Role::Secondary, 40.0, 80.0),
    ("--on-sec", Role::Secondary, 100.0, 20.0),
    ("--sec-c", Role::Secondary, 90.0, 30.0),
    ("--on-sec-c", Role::Secondary, 10.0, 90.0),
];

/// Display preferences the UI keeps alongside the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Hex seed color for the theme
    pub theme_seed: String,
    /// Dark scheme selected
    pub dark_mode: bool,
    /// Local sign-in placeholder; nothing is authenticated
    pub signed_in: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme_seed: DEFAULT_THEME_SEED.to_string(),
            dark_mode: false,
            signed_in: false,
        }
    }
}

impl UiPreferences {
    /// CSS variable name and value pairs for the current seed and mode.
    #[must_use]
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let seed = hex_to_hsl(&self.theme_seed);

        SCHEME
            .iter()
            .map(|&(name, role, light, dark)| {
                let tone = Hsl {
                    h: seed.h,
                    s: round_one_decimal(seed.s * role.saturation_factor()),
                    l: if self.dark_mode { dark } else { light },
                };
                (name, tone.to_string())
            })
            .collect()
    }
}
