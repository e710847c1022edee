//! Human-readable names for arbitrary colors.
//!
//! A color is named after the closest entry of a fixed reference table,
//! measured by OKLab distance, so "closest" matches what the eye sees
//! rather than raw RGB differences.

use okpal_color::color::Rgb;

use crate::contrast::color_dist;

/// Reference colors. Roughly evenly spread over hue, with light/dark
/// variants where common names exist.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("Black", Rgb::new(0x00, 0x00, 0x00)),
    ("Charcoal", Rgb::new(0x36, 0x45, 0x4f)),
    ("Slate", Rgb::new(0x70, 0x80, 0x90)),
    ("Gray", Rgb::new(0x80, 0x80, 0x80)),
    ("Silver", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("Ivory", Rgb::new(0xff, 0xff, 0xf0)),
    ("White", Rgb::new(0xff, 0xff, 0xff)),
    ("Maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("Crimson", Rgb::new(0xdc, 0x14, 0x3c)),
    ("Red", Rgb::new(0xff, 0x00, 0x00)),
    ("Coral", Rgb::new(0xff, 0x7f, 0x50)),
    ("Salmon", Rgb::new(0xfa, 0x80, 0x72)),
    ("Rust", Rgb::new(0xb7, 0x41, 0x0e)),
    ("Orange", Rgb::new(0xff, 0xa5, 0x00)),
    ("Amber", Rgb::new(0xff, 0xbf, 0x00)),
    ("Brown", Rgb::new(0x8b, 0x45, 0x13)),
    ("Tan", Rgb::new(0xd2, 0xb4, 0x8c)),
    ("Beige", Rgb::new(0xf5, 0xf5, 0xdc)),
    ("Gold", Rgb::new(0xff, 0xd7, 0x00)),
    ("Yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("Olive", Rgb::new(0x80, 0x80, 0x00)),
    ("Lime", Rgb::new(0x32, 0xcd, 0x32)),
    ("Green", Rgb::new(0x00, 0x80, 0x00)),
    ("Forest", Rgb::new(0x22, 0x8b, 0x22)),
    ("Mint", Rgb::new(0x98, 0xff, 0x98)),
    ("Sage", Rgb::new(0x9c, 0xaf, 0x88)),
    ("Emerald", Rgb::new(0x50, 0xc8, 0x78)),
    ("Teal", Rgb::new(0x00, 0x80, 0x80)),
    ("Turquoise", Rgb::new(0x40, 0xe0, 0xd0)),
    ("Cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("Sky", Rgb::new(0x87, 0xce, 0xeb)),
    ("Azure", Rgb::new(0x00, 0x7f, 0xff)),
    ("Blue", Rgb::new(0x00, 0x00, 0xff)),
    ("Cobalt", Rgb::new(0x00, 0x47, 0xab)),
    ("Navy", Rgb::new(0x00, 0x00, 0x80)),
    ("Indigo", Rgb::new(0x4b, 0x00, 0x82)),
    ("Violet", Rgb::new(0x8f, 0x00, 0xff)),
    ("Purple", Rgb::new(0x80, 0x00, 0x80)),
    ("Lavender", Rgb::new(0xe6, 0xe6, 0xfa)),
    ("Plum", Rgb::new(0xdd, 0xa0, 0xdd)),
    ("Magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("Pink", Rgb::new(0xff, 0xc0, 0xcb)),
    ("Rose", Rgb::new(0xff, 0x00, 0x7f)),
    ("Burgundy", Rgb::new(0x80, 0x00, 0x20)),
];

/// Name of the perceptually nearest reference color.
#[must_use]
pub fn nearest_name(rgb: Rgb) -> &'static str {
    let mut best = NAMED_COLORS[0].0;
    let mut best_dist = f64::MAX;

    for &(name, reference) in NAMED_COLORS {
        let dist = color_dist(rgb, reference);
        if dist < best_dist {
            best_dist = dist;
            best = name;
        }
    }

    best
}
