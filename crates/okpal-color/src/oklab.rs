// SPDX-License-Identifier: MIT
//
// OKLab and OKLCH — the perceptual spaces all palette generation runs in.
//
// Matrices and cube-root transfer from Björn Ottosson,
// https://bottosson.github.io/posts/oklab/
//
// Pipeline: RGB ↔ sRGB (0–1) ↔ Linear sRGB ↔ LMS ↔ OKLab ↔ OKLCH
//
// The matrix constants below are normative: other implementations of the
// same pipeline must agree with these to at least four decimal places.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, hue_distance, normalize_hue};

/// Chroma ceiling for synthesized colors. Nothing in sRGB needs more.
pub const MAX_SRGB_CHROMA: f64 = 0.37;

/// Chroma below this is treated as achromatic (hue undefined, reported as 0).
pub const ACHROMATIC_CHROMA: f64 = 1e-6;

// ─── Oklab ───────────────────────────────────────────────────────────────────

/// Cartesian perceptual color: lightness 0–1, `a`/`b` roughly ±0.4.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance in OKLab. Values below ~0.02 are generally
    /// imperceptible.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        oklab_to_oklch(self)
    }
}

// ─── Oklch ───────────────────────────────────────────────────────────────────

/// Polar OKLab: lightness 0–1, chroma 0–~0.37, hue in degrees [0, 360).
///
/// Lightness changes never shift perceived hue here, which is why every
/// generator in the engine works in this space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    /// Create with the hue wrapped into [0, 360). Lightness and chroma are
    /// stored as given; the gamut mapper handles anything out of range.
    #[inline]
    #[must_use]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h: normalize_hue(h) }
    }

    /// Replace lightness, clamped into `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub const fn set_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set chroma to an absolute value (clamped to [0, `MAX_SRGB_CHROMA`]).
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.clamp(0.0, MAX_SRGB_CHROMA),
            ..self
        }
    }

    /// Cap chroma at the sRGB-safe ceiling, leaving lower values alone.
    #[inline]
    #[must_use]
    pub const fn with_max_chroma(self) -> Self {
        Self {
            c: self.c.min(MAX_SRGB_CHROMA),
            ..self
        }
    }

    /// Rotate the hue by `degrees`, wrapping at 360.
    #[inline]
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }

    /// Whether this color has no visible chroma.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_CHROMA
    }

    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        oklch_to_oklab(self)
    }

    /// Gamut-mapped sRGB. See [`crate::gamut::oklch_to_rgb`].
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        crate::gamut::oklch_to_rgb(self)
    }

    /// Whether two colors agree within `eps` on every axis. Hue is ignored
    /// when either side is achromatic.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.l - other.l).abs() < eps
            && (self.c - other.c).abs() < eps
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_distance(self.h, other.h) < eps)
    }
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────
//
// IEC 61966-2-1 piecewise transfer function.

/// Convert a single linear sRGB component to encoded sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single encoded sRGB component to linear light (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The conversion goes through an intermediate LMS (Long, Medium, Short
// cone response) space.

/// Convert linear sRGB to OKLab.
#[inline]
#[must_use]
pub fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> Oklab {
    // Linear sRGB → LMS
    let l = 0.051_445_992_9f64.mul_add(b, 0.412_221_470_8f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6f64.mul_add(b, 0.211_903_498_2f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5f64.mul_add(b, 0.088_302_461_9f64.mul_add(r, 0.281_718_837_6 * g));

    // Cube root (LMS → OKLab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.004_072_046_8f64.mul_add(-s_, 0.210_454_255_3f64.mul_add(l_, 0.793_617_785 * m_)),
        a: 0.450_593_709_9f64.mul_add(s_, 1.977_998_495_1f64.mul_add(l_, -(2.428_592_205 * m_))),
        b: 0.808_675_766f64.mul_add(-s_, 0.025_904_037_1f64.mul_add(l_, 0.782_771_766_2 * m_)),
    }
}

/// Convert OKLab to linear sRGB. The result may fall outside [0, 1].
#[inline]
#[must_use]
pub fn oklab_to_linear_srgb(lab: Oklab) -> (f64, f64, f64) {
    let Oklab { l: l_ok, a, b } = lab;

    // OKLab → LMS (cube roots)
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// `C = hypot(a, b)`, `H = atan2(b, a)` in degrees, wrapped into [0, 360).
#[must_use]
pub fn oklab_to_oklch(lab: Oklab) -> Oklch {
    let c = lab.a.hypot(lab.b);
    let h = if c < ACHROMATIC_CHROMA {
        0.0 // no hue for grays
    } else {
        normalize_hue(lab.b.atan2(lab.a).to_degrees())
    };
    Oklch { l: lab.l, c, h }
}

#[must_use]
pub fn oklch_to_oklab(lch: Oklch) -> Oklab {
    let h_rad = lch.h.to_radians();
    Oklab {
        l: lch.l,
        a: lch.c * h_rad.cos(),
        b: lch.c * h_rad.sin(),
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

#[must_use]
pub fn rgb_to_oklab(rgb: Rgb) -> Oklab {
    let (r, g, b) = rgb.to_unit();
    linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

#[must_use]
pub fn rgb_to_oklch(rgb: Rgb) -> Oklch {
    oklab_to_oklch(rgb_to_oklab(rgb))
}

/// OKLab → encoded sRGB in unit range, without clamping. Used by the gamut
/// mapper to decide whether a color is displayable.
#[must_use]
pub fn oklab_to_srgb_unclamped(lab: Oklab) -> (f64, f64, f64) {
    let (r, g, b) = oklab_to_linear_srgb(lab);
    (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

/// OKLab → 8-bit sRGB, clamping each channel. Out-of-gamut input is clipped
/// per channel, which can shift hue; use the gamut mapper when that matters.
#[must_use]
pub fn oklab_to_rgb(lab: Oklab) -> Rgb {
    let (r, g, b) = oklab_to_srgb_unclamped(lab);
    Rgb::from_unit(r, g, b)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
