//! Tint/shade scales — an 11-step OKLCH ramp from one base color.
//!
//! Lightness follows a slightly eased curve from near-white to near-black.
//! Chroma follows a tent that peaks around step 400 so mid steps stay vivid
//! while both ends fade toward neutral. Hue is never touched, which is what
//! keeps the ramp from drifting the way HSL ramps do at the extremes.

use okpal_color::oklab::{MAX_SRGB_CHROMA, Oklch};
use serde::Serialize;
use tracing::debug;

use crate::stop::ColorStop;

/// Step labels, lightest first.
pub const SCALE_STEPS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Chroma cap applied to the input color before shaping.
const BASE_CHROMA_CAP: f64 = 0.32;

const LIGHTEST: f64 = 0.97;
const DARKEST: f64 = 0.10;
const LIGHTNESS_EASE: f64 = 0.85;

/// Where the chroma tent's boost is strongest.
const CHROMA_PEAK_T: f64 = 0.4;

/// One entry of a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleStep {
    pub step: u16,
    /// The designed color, before gamut mapping.
    pub oklch: Oklch,
    /// The displayable color.
    pub color: ColorStop,
}

/// Lightness for a normalized step position `t = step / 1000`.
#[must_use]
pub fn scale_lightness(t: f64) -> f64 {
    (DARKEST - LIGHTEST)
        .mul_add(t.powf(LIGHTNESS_EASE), LIGHTEST)
        .clamp(0.02, 0.98)
}

/// Chroma for a normalized step position, given the (capped) base chroma.
#[must_use]
pub fn scale_chroma(base_c: f64, t: f64) -> f64 {
    let tent = 4.0 * t * (1.0 - t);
    let factor = 0.3f64.mul_add(-(t - CHROMA_PEAK_T).abs(), 1.1);
    (base_c * tent * factor).clamp(0.0, MAX_SRGB_CHROMA)
}

/// Build the 11-step scale for a hex color. `None` when the hex is invalid.
#[must_use]
pub fn generate_scale(hex: &str) -> Option<[ScaleStep; 11]> {
    ColorStop::from_hex(hex).map(|base| generate_scale_from(&base))
}

/// Build the 11-step scale for an existing color.
#[must_use]
pub fn generate_scale_from(base: &ColorStop) -> [ScaleStep; 11] {
    let lch = base.oklch();
    let base_c = lch.c.min(BASE_CHROMA_CAP);
    debug!(hex = base.hex(), l = lch.l, c = base_c, h = lch.h, "generating scale");

    SCALE_STEPS.map(|step| {
        let t = f64::from(step) / 1000.0;
        let oklch = Oklch::new(scale_lightness(t), scale_chroma(base_c, t), lch.h);
        ScaleStep {
            step,
            oklch,
            color: ColorStop::from_oklch(oklch),
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
