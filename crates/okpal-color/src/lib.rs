// SPDX-License-Identifier: MIT
//
// okpal-color — the conversion layer of the okpal palette engine.
//
// Every color the engine touches is stored canonically as 8-bit sRGB (or
// its hex spelling). Everything else is a pure function of that value:
//
//   hex ↔ RGB ↔ HSL / HSV / CMYK
//   RGB ↔ linear sRGB ↔ LMS ↔ OKLab ↔ OKLCH
//
// The only lossy direction is OKLCH → RGB, which goes through the gamut
// mapper: chroma is reduced by bisection until the color fits in sRGB,
// with lightness and hue held fixed.
//
// All conversions are total. Out-of-range inputs are clamped, never
// rejected; only hex parsing has a "no value" outcome.

// l, a, b, c, h are the conventional names.
#![allow(clippy::many_single_char_names)]
// la/lb, ca/cb and friends.
#![allow(clippy::similar_names)]

pub mod color;
pub mod gamut;
pub mod oklab;

pub use color::{Cmyk, Hsl, Hsv, Rgb, hex_to_rgb, normalize_hex, rgb_to_hex};
pub use gamut::{in_gamut, max_chroma, oklch_to_rgb};
pub use oklab::{Oklab, Oklch, oklab_to_oklch, oklab_to_rgb, rgb_to_oklab, rgb_to_oklch};
