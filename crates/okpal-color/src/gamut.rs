// SPDX-License-Identifier: MIT
//
// Gamut mapping — OKLCH in, displayable sRGB out.
//
// OKLCH can describe colors no screen can show (high chroma at extreme
// lightness, mostly). The mapper keeps lightness and hue exactly as given
// and bisects chroma down to the largest value that still fits in sRGB.
// Per-channel clipping is never used for chromatic input because it
// shifts perceived hue.

use crate::color::{Rgb, normalize_hue};
use crate::oklab::{
    ACHROMATIC_CHROMA, Oklab, Oklch, oklab_to_rgb, oklab_to_srgb_unclamped, oklch_to_oklab,
};

/// Upper bound on bisection steps.
const MAX_ITERATIONS: usize = 32;

/// Bisection stops once the chroma interval is narrower than this.
const CHROMA_TOLERANCE: f64 = 1e-4;

/// Slack for float noise at the edges of the unit cube.
const GAMUT_EPSILON: f64 = 1e-7;

#[inline]
fn channel_in_gamut(v: f64) -> bool {
    (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v)
}

#[inline]
fn srgb_in_gamut((r, g, b): (f64, f64, f64)) -> bool {
    channel_in_gamut(r) && channel_in_gamut(g) && channel_in_gamut(b)
}

/// Replace NaN/∞ components so every input has a defined mapping.
fn sanitize(lch: Oklch) -> Oklch {
    let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
    Oklch {
        l: finite_or_zero(lch.l),
        c: finite_or_zero(lch.c).max(0.0),
        h: normalize_hue(lch.h),
    }
}

/// Whether an OKLCH color is representable in sRGB without clipping.
#[must_use]
pub fn in_gamut(lch: Oklch) -> bool {
    let lch = sanitize(lch);
    srgb_in_gamut(oklab_to_srgb_unclamped(oklch_to_oklab(lch)))
}

/// Map any OKLCH triple to a valid 8-bit sRGB color.
///
/// 1. Achromatic input becomes the gray of the same lightness.
/// 2. `L >= 1` is white, `L <= 0` is black.
/// 3. In-gamut input converts directly.
/// 4. Otherwise chroma is bisected over `[0, C]` (at most 32 steps, or until
///    the interval is below 1e-4) and the in-gamut low bound is returned.
///
/// Only chroma is ever reduced; `L` and `H` are never adjusted.
#[must_use]
pub fn oklch_to_rgb(lch: Oklch) -> Rgb {
    let Oklch { l, c, h } = sanitize(lch);

    if c < ACHROMATIC_CHROMA {
        return oklab_to_rgb(Oklab::new(l.clamp(0.0, 1.0), 0.0, 0.0));
    }
    if l >= 1.0 {
        return Rgb::WHITE;
    }
    if l <= 0.0 {
        return Rgb::BLACK;
    }

    let direct = oklab_to_srgb_unclamped(oklch_to_oklab(Oklch { l, c, h }));
    if srgb_in_gamut(direct) {
        return Rgb::from_unit(direct.0, direct.1, direct.2);
    }

    let lo = bisect_chroma(l, h, c);
    oklab_to_rgb(oklch_to_oklab(Oklch { l, c: lo, h }))
}

/// Largest chroma in `[0, 0.4]` that is displayable at lightness `l` and
/// hue `h`.
#[must_use]
pub fn max_chroma(l: f64, h: f64) -> f64 {
    if !l.is_finite() || l <= 0.0 || l >= 1.0 {
        return 0.0;
    }
    let h = normalize_hue(h);
    if in_gamut(Oklch { l, c: 0.4, h }) {
        return 0.4;
    }
    bisect_chroma(l, h, 0.4)
}

/// Binary search for the maximal in-gamut chroma in `[0, hi]`.
fn bisect_chroma(l: f64, h: f64, hi: f64) -> f64 {
    let mut lo = 0.0;
    let mut hi = hi;

    for _ in 0..MAX_ITERATIONS {
        if hi - lo < CHROMA_TOLERANCE {
            break;
        }
        let mid = (lo + hi) * 0.5;
        let candidate = oklab_to_srgb_unclamped(oklch_to_oklab(Oklch { l, c: mid, h }));
        if srgb_in_gamut(candidate) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    lo
}

// ─── Tests ───────────────────────────────────────────────────────────────────
