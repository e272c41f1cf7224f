//! Body colours.
//!
//! Stellar bodies share one fixed palette. Orbital bodies are tinted by age
//! along the "cool" ramp: a long cubehelix interpolation from
//! (260°, 0.75, 0.35) to (80°, 1.50, 0.80), running blue (fresh) through
//! purple to pale green (a year or older).
//!
//! On the wire and in configuration a colour is a `#rrggbb` string.

use serde::{Deserialize, Serialize};

/// RGBA colour (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same colour with alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else yields `None`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?.as_bytes();
        if !hex.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        match hex.len() {
            3 => Some(Self::rgb(
                hex_digit(hex[0]) * 17,
                hex_digit(hex[1]) * 17,
                hex_digit(hex[2]) * 17,
            )),
            6 => Some(Self::rgb(
                hex_digit(hex[0]) << 4 | hex_digit(hex[1]),
                hex_digit(hex[2]) << 4 | hex_digit(hex[3]),
                hex_digit(hex[4]) << 4 | hex_digit(hex[5]),
            )),
            8 => Some(Self {
                a: hex_digit(hex[6]) << 4 | hex_digit(hex[7]),
                ..Self::from_hex(&s[..7])?
            }),
            _ => None,
        }
    }

    /// `#rrggbb`, with an alpha pair appended only when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Component-wise linear blend, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s).ok_or_else(|| format!("invalid colour {s:?}, expected #rrggbb"))
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

/// Hex character → 4-bit value without an if/else chain. Callers have
/// already checked `is_ascii_hexdigit`.
#[inline(always)]
fn hex_digit(b: u8) -> u8 {
    let is_digit = (b.wrapping_sub(b'0') < 10) as u8;
    let is_lower = (b.wrapping_sub(b'a') < 6) as u8;
    let is_upper = (b.wrapping_sub(b'A') < 6) as u8;

    let digit_val = b.wrapping_sub(b'0');
    let lower_val = b.wrapping_sub(b'a').wrapping_add(10);
    let upper_val = b.wrapping_sub(b'A').wrapping_add(10);

    is_digit * digit_val + is_lower * lower_val + is_upper * upper_val
}

// ─── Fixed palette ───────────────────────────────────────────────────────────

/// Stellar body fill ("sun yellow").
pub const STAR_COLOR: Rgba = Rgba::rgb(0xf3, 0x9c, 0x12);
/// Stellar glow.
pub const STAR_GLOW: Rgba = Rgba::rgb(0xe6, 0x7e, 0x22);
/// Root core fill.
pub const CORE_COLOR: Rgba = Rgba::BLACK;
/// Root accretion ring.
pub const CORE_RING: Rgba = Rgba::rgb(0xed, 0x1c, 0x24);
/// Deep-space backdrop.
pub const SPACE: Rgba = Rgba::rgb(4, 5, 12);
/// Universe boundary ring and its warning label.
pub const WARNING_RED: Rgba = Rgba::rgb(255, 0, 0);

// ─── Cool ramp ───────────────────────────────────────────────────────────────

const CUBEHELIX_A: f64 = -0.14861;
const CUBEHELIX_B: f64 = 1.78277;
const CUBEHELIX_C: f64 = -0.29227;
const CUBEHELIX_D: f64 = -0.90649;
const CUBEHELIX_E: f64 = 1.97294;

/// Cubehelix (hue in degrees, saturation, lightness) → sRGB.
fn cubehelix(h: f64, s: f64, l: f64) -> Rgba {
    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    let channel = |v: f64| (255.0 * v).round().clamp(0.0, 255.0) as u8;
    Rgba::rgb(
        channel(l + a * (CUBEHELIX_A * cos_h + CUBEHELIX_B * sin_h)),
        channel(l + a * (CUBEHELIX_C * cos_h + CUBEHELIX_D * sin_h)),
        channel(l + a * (CUBEHELIX_E * cos_h)),
    )
}

/// Sample the cool ramp at `t` in `[0, 1]` (clamped).
pub fn cool(t: f64) -> Rgba {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    // Long interpolation: hue runs 260° → 80° without taking the short way round.
    let h = 260.0 + (80.0 - 260.0) * t;
    let s = 0.75 + (1.50 - 0.75) * t;
    let l = 0.35 + (0.80 - 0.35) * t;
    cubehelix(h, s, l)
}
