//! Utility colors — the six semantic roles every UI needs.
//!
//! Info, success, warning and error start from fixed anchor hues; neutral
//! and focus come from the palette's dominant color. Lightness and chroma
//! follow the palette's average so the roles sit naturally next to the
//! brand colors, and each anchor is nudged away from any palette hue it
//! would otherwise be confused with.

use okpal_color::color::{hue_distance, normalize_hue};
use okpal_color::oklab::{MAX_SRGB_CHROMA, Oklch};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::merge::merge_locked_by_key;
use crate::stop::{ColorStop, PaletteSlot};

/// Minimum hue separation between an anchored role and any palette hue.
pub const HUE_CLEARANCE: f64 = 18.0;

/// Palette colors below this chroma have no meaningful hue.
pub(crate) const CHROMATIC_THRESHOLD: f64 = 0.02;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// A semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilityRole {
    Info,
    Success,
    Warning,
    Error,
    Neutral,
    Focus,
}

impl UtilityRole {
    /// Every role, in display order.
    pub const ALL: [Self; 6] = [
        Self::Info,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Neutral,
        Self::Focus,
    ];

    /// Lowercase key, as used in CSS variables and JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Neutral => "neutral",
            Self::Focus => "focus",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Neutral => "Neutral",
            Self::Focus => "Focus",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Info => "Informational messages and highlights",
            Self::Success => "Confirmations and completed states",
            Self::Warning => "Cautions that need attention",
            Self::Error => "Errors and destructive actions",
            Self::Neutral => "Subdued UI chrome and secondary text",
            Self::Focus => "Focus rings and keyboard navigation",
        }
    }

    /// Fixed starting hue. `None` for the palette-derived roles.
    #[must_use]
    pub const fn anchor_hue(self) -> Option<f64> {
        match self {
            Self::Info => Some(231.0),
            Self::Success => Some(142.0),
            Self::Warning => Some(85.0),
            Self::Error => Some(25.0),
            Self::Neutral | Self::Focus => None,
        }
    }
}

impl std::fmt::Display for UtilityRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityColor {
    pub role: UtilityRole,
    #[serde(rename = "hex")]
    pub color: ColorStop,
    #[serde(default)]
    pub locked: bool,
    pub label: String,
    pub description: String,
}

impl UtilityColor {
    fn new(role: UtilityRole, color: ColorStop) -> Self {
        Self {
            role,
            color,
            locked: false,
            label: role.label().to_string(),
            description: role.description().to_string(),
        }
    }
}

/// One entry per role, in [`UtilityRole::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityColorSet {
    pub entries: Vec<UtilityColor>,
}

impl UtilityColorSet {
    #[must_use]
    pub fn get(&self, role: UtilityRole) -> Option<&UtilityColor> {
        self.entries.iter().find(|entry| entry.role == role)
    }

    /// Color for a role. Every derived set has all six roles.
    #[must_use]
    pub fn color(&self, role: UtilityRole) -> Option<&ColorStop> {
        self.get(role).map(|entry| &entry.color)
    }

    /// Copy with `role` locked or unlocked.
    #[must_use]
    pub fn with_locked(mut self, role: UtilityRole, locked: bool) -> Self {
        for entry in &mut self.entries {
            if entry.role == role {
                entry.locked = locked;
            }
        }
        self
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &UtilityColor> {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Palette statistics
// ---------------------------------------------------------------------------

/// What utility and token derivation need to know about a palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PaletteStats {
    pub avg_l: f64,
    pub avg_c: f64,
    /// The highest-chroma slot (first on ties). Mid gray for an empty palette.
    pub primary: Oklch,
    pub primary_index: Option<usize>,
}

impl PaletteStats {
    pub fn of(colors: &[Oklch]) -> Self {
        if colors.is_empty() {
            return Self {
                avg_l: 0.5,
                avg_c: 0.1,
                primary: Oklch::new(0.5, 0.0, 0.0),
                primary_index: None,
            };
        }

        let n = colors.len() as f64;
        let avg_l = colors.iter().map(|c| c.l).sum::<f64>() / n;
        let avg_c = colors.iter().map(|c| c.c).sum::<f64>() / n;

        let mut primary_index = 0;
        for (i, lch) in colors.iter().enumerate() {
            if lch.c > colors[primary_index].c {
                primary_index = i;
            }
        }

        Self {
            avg_l,
            avg_c,
            primary: colors[primary_index],
            primary_index: Some(primary_index),
        }
    }
}

/// Hues of the palette colors that have one.
pub(crate) fn chromatic_hues(colors: &[Oklch]) -> Vec<f64> {
    colors
        .iter()
        .filter(|lch| lch.c >= CHROMATIC_THRESHOLD)
        .map(|lch| lch.h)
        .collect()
}

/// Push `anchor` away from the nearest palette hue until they are at least
/// [`HUE_CLEARANCE`] degrees apart. Only the nearest hue is considered.
#[must_use]
pub fn nudge_hue(anchor: f64, palette_hues: &[f64]) -> f64 {
    let Some(&nearest) = palette_hues
        .iter()
        .min_by(|a, b| hue_distance(anchor, **a).total_cmp(&hue_distance(anchor, **b)))
    else {
        return normalize_hue(anchor);
    };

    let dist = hue_distance(anchor, nearest);
    if dist >= HUE_CLEARANCE {
        return normalize_hue(anchor);
    }

    // Signed difference in (-180, 180]; zero pushes clockwise.
    let mut diff = (anchor - nearest).rem_euclid(360.0);
    if diff > 180.0 {
        diff -= 360.0;
    }
    let direction: f64 = if diff < 0.0 { -1.0 } else { 1.0 };
    normalize_hue(direction.mul_add(HUE_CLEARANCE - dist, anchor))
}

/// Target lightness for the anchored roles.
fn target_lightness(avg_l: f64) -> f64 {
    let l: f64 = if avg_l > 0.65 {
        0.52
    } else if avg_l < 0.35 {
        0.58
    } else {
        0.55
    };
    l.clamp(0.46, 0.62)
}

/// Target chroma for the anchored roles.
fn target_chroma(avg_c: f64) -> f64 {
    avg_c.mul_add(0.8, 0.07).clamp(0.10, 0.22)
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive all six roles from a palette. Nothing is locked in the result.
#[must_use]
pub fn derive_utility_colors(palette: &[PaletteSlot]) -> UtilityColorSet {
    let colors: Vec<Oklch> = palette.iter().map(|slot| slot.color.oklch()).collect();
    let stats = PaletteStats::of(&colors);
    let hues = chromatic_hues(&colors);

    let target_l = target_lightness(stats.avg_l);
    let target_c = target_chroma(stats.avg_c);
    debug!(target_l, target_c, palette = palette.len(), "deriving utility colors");

    let entries = UtilityRole::ALL
        .iter()
        .map(|&role| {
            let lch = match role {
                UtilityRole::Neutral => Oklch::new(
                    target_l + 0.04,
                    (stats.primary.c * 0.08).clamp(0.01, 0.04),
                    stats.primary.h,
                ),
                UtilityRole::Focus => Oklch::new(
                    stats.primary.l.clamp(0.55, 0.72),
                    stats.primary.c,
                    stats.primary.h,
                )
                .with_max_chroma(),
                _ => {
                    let anchor = role.anchor_hue().unwrap_or_default();
                    let h = nudge_hue(anchor, &hues);
                    let (l, c) = match role {
                        UtilityRole::Warning => (target_l + 0.06, target_c * 1.2),
                        UtilityRole::Error => (target_l, target_c * 1.1),
                        _ => (target_l, target_c),
                    };
                    Oklch::new(l, c.min(MAX_SRGB_CHROMA), h)
                }
            };
            UtilityColor::new(role, ColorStop::from_oklch(lch))
        })
        .collect();

    UtilityColorSet { entries }
}

/// Re-derive from a changed palette, keeping every locked role of
/// `existing` exactly as it was.
#[must_use]
pub fn regenerate_utility_colors(
    existing: &UtilityColorSet,
    palette: &[PaletteSlot],
) -> UtilityColorSet {
    let fresh = derive_utility_colors(palette);
    let entries = merge_locked_by_key(
        &existing.entries,
        fresh.entries,
        |entry| entry.role,
        |entry| entry.locked,
    );

    UtilityColorSet { entries }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
