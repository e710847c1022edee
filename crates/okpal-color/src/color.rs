// SPDX-License-Identifier: MIT
//
// Display-space color records and the cylindrical/print models derived
// from them.
//
// `Rgb` is the canonical value: hex strings parse into it, and HSL, HSV and
// CMYK are computed from it on demand. Angles wrap into [0, 360), percentage
// fields clamp into [0, 100], and every division is guarded so the
// conversions are total.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color, the only format that reaches a screen directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Build from unit floats, clamping and rounding each channel.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    /// Canonical `#RRGGBB` spelling (uppercase).
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    #[must_use]
    pub fn to_cmyk(self) -> Cmyk {
        rgb_to_cmyk(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Hsl / Hsv / Cmyk ────────────────────────────────────────────────────────

/// Hue in degrees [0, 360); saturation and lightness in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Construct with the hue wrapped and the percentages clamped.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_percent(s),
            l: clamp_percent(l),
        }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }
}

/// Hue in degrees [0, 360); saturation and value in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[must_use]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_percent(s),
            v: clamp_percent(v),
        }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }
}

/// Ink coverage per channel, each in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    #[must_use]
    pub fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self {
            c: clamp_percent(c),
            m: clamp_percent(m),
            y: clamp_percent(y),
            k: clamp_percent(k),
        }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        cmyk_to_rgb(self)
    }
}

// ─── Scalar helpers ──────────────────────────────────────────────────────────

/// Wrap an angle into [0, 360). Non-finite input maps to 0.
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if h >= 360.0 { 0.0 } else { h }
}

/// Shortest arc between two hue angles, in [0, 180].
#[inline]
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Clamp into [0, 100]. NaN maps to 0.
#[inline]
#[must_use]
pub fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

/// Unit float to byte, rounded to nearest.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    // Clamped into 0..=255 first.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Parse `#RGB` or `#RRGGBB` (the `#` is optional, digits are
/// case-insensitive). Three-digit input doubles each channel.
///
/// Returns `None` for any other length or a non-hex character.
#[must_use]
pub fn hex_to_rgb(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

/// Format as `#RRGGBB`.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Parse and re-spell a hex color in canonical `#RRGGBB` form.
#[must_use]
pub fn normalize_hex(s: &str) -> Option<String> {
    hex_to_rgb(s).map(rgb_to_hex)
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── HSL / HSV ───────────────────────────────────────────────────────────────

/// Hue of an RGB triple from its max channel and spread. Zero spread is
/// achromatic and reports hue 0.
fn channel_hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta <= 0.0 {
        return 0.0;
    }
    let h = if (max - r).abs() < f64::EPSILON {
        ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    normalize_hue(h * 60.0)
}

#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    let s = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - 2.0f64.mul_add(l, -1.0).abs())
    };

    Hsl {
        h: channel_hue(r, g, b, max, delta),
        s: clamp_percent(s * 100.0),
        l: clamp_percent(l * 100.0),
    }
}

#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = normalize_hue(hsl.h);
    let s = clamp_percent(hsl.s) / 100.0;
    let l = clamp_percent(hsl.l) / 100.0;

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let (r, g, b) = sector_rgb(h, c);
    let m = l - c / 2.0;
    Rgb::from_unit(r + m, g + m, b + m)
}

#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = rgb.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max <= 0.0 { 0.0 } else { delta / max };

    Hsv {
        h: channel_hue(r, g, b, max, delta),
        s: clamp_percent(s * 100.0),
        v: clamp_percent(max * 100.0),
    }
}

#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = normalize_hue(hsv.h);
    let s = clamp_percent(hsv.s) / 100.0;
    let v = clamp_percent(hsv.v) / 100.0;

    let c = v * s;
    let (r, g, b) = sector_rgb(h, c);
    let m = v - c;
    Rgb::from_unit(r + m, g + m, b + m)
}

/// The chroma-only RGB triple for hue `h` (degrees) and chroma `c`.
fn sector_rgb(h: f64, c: f64) -> (f64, f64, f64) {
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    match hp {
        hp if hp < 1.0 => (c, x, 0.0),
        hp if hp < 2.0 => (x, c, 0.0),
        hp if hp < 3.0 => (0.0, c, x),
        hp if hp < 4.0 => (0.0, x, c),
        hp if hp < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    }
}

// ─── CMYK ────────────────────────────────────────────────────────────────────

/// `k = 1 − max(r, g, b)`. Pure black reports c = m = y = 0.
#[must_use]
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let (r, g, b) = rgb.to_unit();
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk { c: 0.0, m: 0.0, y: 0.0, k: 100.0 };
    }
    let inv = 1.0 - k;
    Cmyk {
        c: clamp_percent((1.0 - r - k) / inv * 100.0),
        m: clamp_percent((1.0 - g - k) / inv * 100.0),
        y: clamp_percent((1.0 - b - k) / inv * 100.0),
        k: clamp_percent(k * 100.0),
    }
}

#[must_use]
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let c = clamp_percent(cmyk.c) / 100.0;
    let m = clamp_percent(cmyk.m) / 100.0;
    let y = clamp_percent(cmyk.y) / 100.0;
    let k = clamp_percent(cmyk.k) / 100.0;
    Rgb::from_unit((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
