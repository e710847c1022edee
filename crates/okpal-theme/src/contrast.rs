//! Accessibility metrics — WCAG contrast and perceptual distance.
//!
//! Contrast is judged in sRGB relative luminance (the WCAG definition), but
//! adjustments happen in OKLCH lightness, because OKLCH adjustments are
//! perceptually uniform and never drag the hue along.

use std::fmt;

use okpal_color::color::Rgb;
use okpal_color::oklab::{Oklch, rgb_to_oklab, srgb_to_linear};
use serde::{Deserialize, Serialize};

use crate::stop::ColorStop;

/// Minimum contrast for white text in [`text_color`].
pub const TEXT_CONTRAST_THRESHOLD: f64 = 4.5;

/// WCAG relative luminance: linearized channels weighted 0.2126 / 0.7152 /
/// 0.0722. Black is `0.0`, white is `1.0`.
#[must_use]
pub fn luminance(rgb: Rgb) -> f64 {
    let (r, g, b) = rgb.to_unit();
    let r_lin = srgb_to_linear(r);
    let g_lin = srgb_to_linear(g);
    let b_lin = srgb_to_linear(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// `(L1 + 0.05) / (L2 + 0.05)` with `L1` the brighter side, so the ratio is
/// symmetric and lies in `1.0..=21.0`.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

// ---------------------------------------------------------------------------
// WCAG levels
// ---------------------------------------------------------------------------

/// Conformance level reached by a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA Large")]
    AaLarge,
    Fail,
}

impl WcagLevel {
    /// `>= 7` AAA, `>= 4.5` AA, `>= 3` AA Large, otherwise Fail.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::AaLarge => "AA Large",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-function spelling of [`WcagLevel::from_ratio`].
#[must_use]
pub fn wcag_level(ratio: f64) -> WcagLevel {
    WcagLevel::from_ratio(ratio)
}

// ---------------------------------------------------------------------------
// Text color
// ---------------------------------------------------------------------------

/// White when white text reaches 4.5:1 on `bg`, black otherwise.
///
/// Black's own ratio is never consulted: on some midtones black would read
/// better, yet white is still returned as long as it clears the threshold.
/// Downstream visuals depend on this exact rule.
#[must_use]
pub fn text_color(bg: Rgb) -> Rgb {
    if contrast_ratio(bg, Rgb::WHITE) >= TEXT_CONTRAST_THRESHOLD {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

// ---------------------------------------------------------------------------
// Perceptual distance
// ---------------------------------------------------------------------------

/// Euclidean distance in OKLab. Values below ~0.02 are generally
/// indistinguishable.
#[must_use]
pub fn color_dist(a: Rgb, b: Rgb) -> f64 {
    rgb_to_oklab(a).distance(rgb_to_oklab(b))
}

/// Smallest pairwise OKLab distance in a palette. Higher is more varied;
/// palettes with fewer than two colors score `f64::INFINITY`.
#[must_use]
pub fn palette_uniqueness(stops: &[ColorStop]) -> f64 {
    let mut best = f64::INFINITY;
    for (i, a) in stops.iter().enumerate() {
        for b in &stops[i + 1..] {
            best = best.min(color_dist(a.rgb(), b.rgb()));
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Readability adjustment
// ---------------------------------------------------------------------------

/// Adjust a foreground's OKLCH lightness until it reaches `min_ratio` against
/// `bg`. Hue and chroma are kept.
///
/// Direction follows the background: on a dark background the foreground is
/// lightened, on a light one it is darkened. Uses binary search and returns
/// the candidate closest to the original lightness that passes. If even the
/// extreme lightness fails, that extreme is returned.
#[must_use]
pub fn ensure_contrast(fg: Oklch, bg: Rgb, min_ratio: f64) -> Oklch {
    if contrast_ratio(fg.to_rgb(), bg) >= min_ratio {
        return fg;
    }

    // Dark background: foreground should be lighter.
    // Light background: foreground should be darker.
    let lighten = luminance(bg) < 0.18;
    let (mut lo, mut hi) = if lighten {
        (fg.l.clamp(0.0, 1.0), 1.0)
    } else {
        (0.0, fg.l.clamp(0.0, 1.0))
    };

    let mut best = fg.set_lightness(if lighten { 1.0 } else { 0.0 });
    for _ in 0..32 {
        let mid = lo + (hi - lo) / 2.0;
        let candidate = fg.set_lightness(mid);
        let ratio = contrast_ratio(candidate.to_rgb(), bg);
        if ratio >= min_ratio {
            best = candidate;
            // Passing: move back toward the original lightness.
            if lighten {
                hi = mid;
            } else {
                lo = mid;
            }
        } else if lighten {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn luminance_endpoints() {
        assert!(close(luminance(Rgb::BLACK), 0.0, 1e-12));
        assert!(close(luminance(Rgb::WHITE), 1.0, 1e-9));
    }

    #[test]
    fn luminance_pure_channels() {
        assert!(close(luminance(Rgb::new(255, 0, 0)), 0.2126, 1e-9));
        assert!(close(luminance(Rgb::new(0, 255, 0)), 0.7152, 1e-9));
        assert!(close(luminance(Rgb::new(0, 0, 255)), 0.0722, 1e-9));
    }

    #[test]
    fn ratio_range() {
        assert!(close(contrast_ratio(Rgb::WHITE, Rgb::BLACK), 21.0, 1e-9));
        let c = Rgb::new(90, 120, 200);
        assert!(close(contrast_ratio(c, c), 1.0, 1e-12));
    }

    #[test]
    fn ratio_ignores_argument_order() {
        let a = Rgb::new(204, 51, 77);
        let b = Rgb::new(26, 26, 102);
        assert_eq!(contrast_ratio(a, b).to_bits(), contrast_ratio(b, a).to_bits());
    }

    #[test]
    fn wcag_boundaries() {
        assert_eq!(wcag_level(7.0), WcagLevel::Aaa);
        assert_eq!(wcag_level(4.5), WcagLevel::Aa);
        assert_eq!(wcag_level(3.0), WcagLevel::AaLarge);
        assert_eq!(wcag_level(2.99), WcagLevel::Fail);
        assert_eq!(wcag_level(21.0), WcagLevel::Aaa);
        assert_eq!(wcag_level(1.0), WcagLevel::Fail);
    }

    #[test]
    fn wcag_labels() {
        assert_eq!(WcagLevel::AaLarge.to_string(), "AA Large");
        assert_eq!(serde_json::to_string(&WcagLevel::Aaa).unwrap(), r#""AAA""#);
    }

    #[test]
    fn text_on_dark_is_white() {
        assert_eq!(text_color(Rgb::new(20, 20, 40)), Rgb::WHITE);
    }

    #[test]
    fn text_on_light_is_black() {
        assert_eq!(text_color(Rgb::new(250, 250, 240)), Rgb::BLACK);
    }

    #[test]
    fn text_prefers_white_once_it_clears_threshold() {
        // #767676 gives white ~4.54:1 while black reaches ~4.6:1.
        let bg = Rgb::new(0x76, 0x76, 0x76);
        assert!(contrast_ratio(bg, Rgb::WHITE) >= 4.5);
        assert!(contrast_ratio(bg, Rgb::BLACK) > contrast_ratio(bg, Rgb::WHITE));
        assert_eq!(text_color(bg), Rgb::WHITE);
    }

    #[test]
    fn oklab_distance() {
        let c = Rgb::new(59, 130, 246);
        assert!(close(color_dist(c, c), 0.0, 1e-12));
        assert!(color_dist(Rgb::BLACK, Rgb::WHITE) > 0.99);
    }

    #[test]
    fn uniqueness_is_min_pairwise_distance() {
        let stops: Vec<ColorStop> = [Rgb::BLACK, Rgb::WHITE, Rgb::new(10, 10, 10)]
            .into_iter()
            .map(ColorStop::from_rgb)
            .collect();
        let score = palette_uniqueness(&stops);
        assert!(close(score, color_dist(Rgb::BLACK, Rgb::new(10, 10, 10)), 1e-12));
        assert_eq!(palette_uniqueness(&stops[..1]), f64::INFINITY);
    }

    #[test]
    fn already_readable_is_unchanged() {
        let fg = Oklch::new(0.98, 0.0, 0.0);
        assert_eq!(ensure_contrast(fg, Rgb::BLACK, 5.5), fg);
    }

    #[test]
    fn dark_background_lightens() {
        let fg = Oklch::new(0.25, 0.05, 270.0);
        let bg = Rgb::new(18, 18, 24);
        let adjusted = ensure_contrast(fg, bg, 5.5);
        assert!(contrast_ratio(adjusted.to_rgb(), bg) >= 5.5);
        assert!(adjusted.l > fg.l, "should have lightened");
        assert!(close(adjusted.h, fg.h, 1e-9));
    }

    #[test]
    fn light_background_darkens() {
        let fg = Oklch::new(0.85, 0.05, 90.0);
        let bg = Rgb::new(250, 250, 250);
        let adjusted = ensure_contrast(fg, bg, 5.5);
        assert!(contrast_ratio(adjusted.to_rgb(), bg) >= 5.5);
        assert!(adjusted.l < fg.l, "should have darkened");
    }
}
