//! Canonical color records — the values every other module passes around.
//!
//! A [`ColorStop`] is built once from a single source value and never
//! mutated afterwards. Its hex, RGB and HSL always agree because the latter
//! two are derived from the same RGB at construction; every other space is
//! recomputed on demand so repeated edits never accumulate rounding drift.

use std::fmt;

use okpal_color::color::{Cmyk, Hsl, Hsv, Rgb, hex_to_rgb};
use okpal_color::oklab::{Oklab, Oklch, rgb_to_oklab, rgb_to_oklch};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// ColorStop
// ---------------------------------------------------------------------------

/// An immutable color: hex string plus the RGB and HSL derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
}

impl ColorStop {
    /// Build from 8-bit sRGB.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
            hsl: rgb.to_hsl(),
        }
    }

    /// Parse `#RGB` / `#RRGGBB`. Returns `None` when the string is not a hex
    /// color; callers keep their last valid value.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex_to_rgb(hex).map(Self::from_rgb)
    }

    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        Self::from_rgb(hsl.to_rgb())
    }

    #[must_use]
    pub fn from_hsv(hsv: Hsv) -> Self {
        Self::from_rgb(hsv.to_rgb())
    }

    #[must_use]
    pub fn from_cmyk(cmyk: Cmyk) -> Self {
        Self::from_rgb(cmyk.to_rgb())
    }

    /// Build from OKLCH through the gamut mapper.
    #[must_use]
    pub fn from_oklch(lch: Oklch) -> Self {
        Self::from_rgb(lch.to_rgb())
    }

    /// Canonical `#RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }

    #[must_use]
    pub const fn hsl(&self) -> Hsl {
        self.hsl
    }

    #[must_use]
    pub fn hsv(&self) -> Hsv {
        self.rgb.to_hsv()
    }

    #[must_use]
    pub fn cmyk(&self) -> Cmyk {
        self.rgb.to_cmyk()
    }

    #[must_use]
    pub fn oklab(&self) -> Oklab {
        rgb_to_oklab(self.rgb)
    }

    #[must_use]
    pub fn oklch(&self) -> Oklch {
        rgb_to_oklch(self.rgb)
    }
}

/// Free-function spelling of [`ColorStop::from_hex`].
#[must_use]
pub fn hex_to_stop(hex: &str) -> Option<ColorStop> {
    ColorStop::from_hex(hex)
}

impl From<Rgb> for ColorStop {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl Serialize for ColorStop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex)
    }
}

impl<'de> Deserialize<'de> for ColorStop {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// PaletteSlot
// ---------------------------------------------------------------------------

/// One position in a palette. Locked slots survive regeneration unchanged.
///
/// Serializes as `{ "hex": "#RRGGBB", "locked": bool, "name"?: string }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSlot {
    #[serde(rename = "hex")]
    pub color: ColorStop,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PaletteSlot {
    /// An unlocked, unnamed slot.
    #[must_use]
    pub const fn new(color: ColorStop) -> Self {
        Self {
            color,
            locked: false,
            name: None,
        }
    }

    #[must_use]
    pub fn locked(self, locked: bool) -> Self {
        Self { locked, ..self }
    }

    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
}

/// The bare colors of a palette, in slot order.
#[must_use]
pub fn palette_colors(slots: &[PaletteSlot]) -> Vec<ColorStop> {
    slots.iter().map(|slot| slot.color.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_hex_derives_rgb_and_hsl() {
        let stop = ColorStop::from_hex("#3b82f6").unwrap();
        assert_eq!(stop.hex(), "#3B82F6");
        assert_eq!(stop.rgb(), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(stop.hsl(), Rgb::new(0x3b, 0x82, 0xf6).to_hsl());
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(ColorStop::from_hex("#zzz").is_none());
        assert!(hex_to_stop("12345").is_none());
    }

    #[test]
    fn hsl_source_is_canonicalized_through_rgb() {
        let stop = ColorStop::from_hsl(Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(stop.hex(), "#FF0000");
    }

    #[test]
    fn oklch_source_is_gamut_mapped() {
        let stop = ColorStop::from_oklch(Oklch::new(0.7, 0.6, 140.0));
        let lch = stop.oklch();
        assert!(lch.c < 0.6);
    }

    #[test]
    fn slot_serializes_as_hex_record() {
        let slot = PaletteSlot::new(ColorStop::from_hex("#F97316").unwrap())
            .locked(true)
            .named("Brand");
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, r##"{"hex":"#F97316","locked":true,"name":"Brand"}"##);

        let back: PaletteSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn slot_defaults_when_fields_missing() {
        let slot: PaletteSlot = serde_json::from_str(r##"{"hex":"#abc"}"##).unwrap();
        assert_eq!(slot.color.hex(), "#AABBCC");
        assert!(!slot.locked);
        assert_eq!(slot.name, None);
    }

    #[test]
    fn slot_with_bad_hex_fails_to_deserialize() {
        let result: Result<PaletteSlot, _> = serde_json::from_str(r#"{"hex":"blue"}"#);
        assert!(result.is_err());
    }
}
