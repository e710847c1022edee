//! Theme tokens — a full light/dark design-token set from a palette.
//!
//! The set has a fixed shape that exporters rely on: 24 semantic tokens in
//! a fixed order, one utility entry per role, and the raw palette.
//!
//! Surfaces (background, card, muted, border, ...) are never pure gray.
//! They all come from one tinted-neutral builder that carries a faint
//! amount of the primary hue, so a theme reads as belonging to its brand
//! even where no brand color is visible.

use okpal_color::color::Rgb;
use okpal_color::oklab::Oklch;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contrast::{TEXT_CONTRAST_THRESHOLD, ensure_contrast, text_color};
use crate::merge::merge_locked_by_key;
use crate::stop::{ColorStop, PaletteSlot};
use crate::utility::{CHROMATIC_THRESHOLD, PaletteStats, UtilityColorSet, UtilityRole};

/// Fallback for `destructive` when the utility set has no error role.
const FALLBACK_ERROR: Oklch = Oklch {
    l: 0.55,
    c: 0.2,
    h: 25.0,
};

// ---------------------------------------------------------------------------
// Token records
// ---------------------------------------------------------------------------

/// A semantic token with a value per color scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeToken {
    pub name: String,
    pub light: ColorStop,
    pub dark: ColorStop,
    pub description: String,
    #[serde(default)]
    pub locked: bool,
}

/// Variants of one utility role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityTokens {
    pub role: UtilityRole,
    pub base: ColorStop,
    /// Lighter variant, for use on dark surfaces.
    pub light: ColorStop,
    /// Darker variant, for use on light surfaces.
    pub dark: ColorStop,
    /// Near-white wash for alert backgrounds.
    pub subtle: ColorStop,
}

/// A raw palette color, passed through as `color-N` (1-based).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteToken {
    pub name: String,
    pub hex: ColorStop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTokenSet {
    pub semantic: Vec<ThemeToken>,
    pub utility: Vec<UtilityTokens>,
    pub palette: Vec<PaletteToken>,
}

impl ThemeTokenSet {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ThemeToken> {
        self.semantic.iter().find(|token| token.name == name)
    }

    #[must_use]
    pub fn utility(&self, role: UtilityRole) -> Option<&UtilityTokens> {
        self.utility.iter().find(|entry| entry.role == role)
    }

    /// Copy with the named token locked or unlocked.
    #[must_use]
    pub fn with_locked(mut self, name: &str, locked: bool) -> Self {
        for token in &mut self.semantic {
            if token.name == name {
                token.locked = locked;
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Source colors
// ---------------------------------------------------------------------------

/// The handful of colors every token is built from.
#[derive(Debug, Clone, Copy)]
struct Sources {
    primary: Oklch,
    secondary: Oklch,
    accent: Oklch,
    error: Oklch,
    /// Chroma for tinted neutrals.
    tint: f64,
}

impl Sources {
    fn pick(colors: &[Oklch], utility: &UtilityColorSet) -> Self {
        let stats = PaletteStats::of(colors);
        let primary = stats.primary;

        let mut used: Vec<usize> = stats.primary_index.into_iter().collect();
        let secondary_index = most_chromatic_excluding(colors, &used).or_else(|| {
            stats
                .primary_index
                .filter(|_| colors.len() > 1)
                .map(|p| (p + 1) % colors.len())
        });
        let secondary = secondary_index.map_or(primary, |i| colors[i]);

        used.extend(secondary_index);
        let accent = most_chromatic_excluding(colors, &used).map_or(secondary, |i| colors[i]);

        let error = utility
            .color(UtilityRole::Error)
            .map_or(FALLBACK_ERROR, ColorStop::oklch);

        Self {
            primary,
            secondary,
            accent,
            error,
            tint: (primary.c * 0.06).clamp(0.006, 0.016),
        }
    }

    /// A tinted neutral at lightness `l` carrying `tint_scale` times the
    /// base tint chroma in the primary hue.
    fn neutral(&self, l: f64, tint_scale: f64) -> Oklch {
        Oklch::new(l, self.tint * tint_scale, self.primary.h)
    }
}

/// Highest-chroma color not in `exclude` with a real hue. First wins ties.
fn most_chromatic_excluding(colors: &[Oklch], exclude: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, lch) in colors.iter().enumerate() {
        if exclude.contains(&i) || lch.c < CHROMATIC_THRESHOLD {
            continue;
        }
        if best.is_none_or(|b| lch.c > colors[b].c) {
            best = Some(i);
        }
    }
    best
}

fn stop(lch: Oklch) -> ColorStop {
    ColorStop::from_oklch(lch.with_max_chroma())
}

fn on(bg: &ColorStop) -> ColorStop {
    ColorStop::from_rgb(text_color(bg.rgb()))
}

fn token(name: &str, light: ColorStop, dark: ColorStop, description: &str) -> ThemeToken {
    ThemeToken {
        name: name.to_string(),
        light,
        dark,
        description: description.to_string(),
        locked: false,
    }
}

/// A muted text color that still reads at body-text contrast on `bg`.
fn readable(lch: Oklch, bg: Rgb) -> ColorStop {
    stop(ensure_contrast(lch, bg, TEXT_CONTRAST_THRESHOLD))
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the complete token set. Nothing is locked in the result.
#[must_use]
pub fn derive_theme(palette: &[PaletteSlot], utility: &UtilityColorSet) -> ThemeTokenSet {
    let colors: Vec<Oklch> = palette.iter().map(|slot| slot.color.oklch()).collect();
    let src = Sources::pick(&colors, utility);
    debug!(
        primary_h = src.primary.h,
        primary_c = src.primary.c,
        tint = src.tint,
        "deriving theme tokens"
    );

    ThemeTokenSet {
        semantic: semantic_tokens(&src),
        utility: utility_tokens(utility),
        palette: palette
            .iter()
            .enumerate()
            .map(|(i, slot)| PaletteToken {
                name: format!("color-{}", i + 1),
                hex: slot.color.clone(),
            })
            .collect(),
    }
}

fn semantic_tokens(src: &Sources) -> Vec<ThemeToken> {
    let (p, s, a, e) = (src.primary, src.secondary, src.accent, src.error);

    let bg = (stop(src.neutral(0.985, 0.5)), stop(src.neutral(0.15, 1.0)));
    let fg = (stop(src.neutral(0.18, 1.5)), stop(src.neutral(0.95, 0.5)));
    let card = (stop(src.neutral(0.995, 0.3)), stop(src.neutral(0.18, 1.0)));

    let primary = (
        stop(Oklch::new(p.l.clamp(0.22, 0.38), p.c, p.h)),
        stop(Oklch::new(p.l.clamp(0.6, 0.85), p.c, p.h)),
    );
    let secondary = (
        stop(Oklch::new(0.94, (s.c * 0.25).min(0.05), s.h)),
        stop(Oklch::new(0.28, (s.c * 0.3).min(0.06), s.h)),
    );
    let accent = (
        stop(Oklch::new(0.93, (a.c * 0.35).min(0.07), a.h)),
        stop(Oklch::new(0.32, (a.c * 0.4).min(0.08), a.h)),
    );
    let destructive = (
        stop(e),
        stop(Oklch::new((e.l + 0.1).clamp(0.6, 0.72), e.c, e.h)),
    );

    vec![
        token("background", bg.0.clone(), bg.1.clone(), "Page background"),
        token("foreground", fg.0.clone(), fg.1.clone(), "Default text"),
        token("card", card.0.clone(), card.1.clone(), "Card surface"),
        token("card-foreground", fg.0.clone(), fg.1.clone(), "Text on cards"),
        token(
            "card-raised",
            stop(src.neutral(0.97, 1.0)),
            stop(src.neutral(0.22, 1.0)),
            "Elevated card surface",
        ),
        token(
            "popover",
            card.0,
            stop(src.neutral(0.20, 1.0)),
            "Popover and dropdown surface",
        ),
        token("popover-foreground", fg.0.clone(), fg.1.clone(), "Text in popovers"),
        token("primary", primary.0.clone(), primary.1.clone(), "Primary actions and brand"),
        token(
            "primary-foreground",
            on(&primary.0),
            on(&primary.1),
            "Text on primary",
        ),
        token("secondary", secondary.0, secondary.1, "Secondary actions"),
        token(
            "secondary-foreground",
            stop(Oklch::new(0.25, (s.c * 0.3).min(0.06), s.h)),
            stop(Oklch::new(0.92, (s.c * 0.15).min(0.03), s.h)),
            "Text on secondary",
        ),
        token(
            "muted",
            stop(src.neutral(0.955, 1.0)),
            stop(src.neutral(0.26, 1.0)),
            "Muted backgrounds",
        ),
        token(
            "muted-foreground",
            readable(src.neutral(0.5, 2.0), bg.0.rgb()),
            readable(src.neutral(0.7, 2.0), bg.1.rgb()),
            "Secondary text",
        ),
        token("accent", accent.0, accent.1, "Hover and highlight surfaces"),
        token(
            "accent-foreground",
            stop(Oklch::new(0.28, (a.c * 0.4).min(0.08), a.h)),
            stop(Oklch::new(0.93, (a.c * 0.2).min(0.04), a.h)),
            "Text on accent",
        ),
        token(
            "destructive",
            destructive.0.clone(),
            destructive.1.clone(),
            "Destructive actions",
        ),
        token(
            "destructive-foreground",
            on(&destructive.0),
            on(&destructive.1),
            "Text on destructive",
        ),
        token(
            "destructive-subtle",
            stop(Oklch::new(0.95, (e.c * 0.25).min(0.05), e.h)),
            stop(Oklch::new(0.27, (e.c * 0.35).min(0.07), e.h)),
            "Error message backgrounds",
        ),
        token(
            "border",
            stop(src.neutral(0.91, 1.0)),
            stop(src.neutral(0.30, 1.0)),
            "Borders and dividers",
        ),
        token(
            "input",
            stop(src.neutral(0.89, 1.0)),
            stop(src.neutral(0.33, 1.0)),
            "Form control borders",
        ),
        token("ring", primary.0, primary.1, "Focus rings"),
        token(
            "primary-subtle",
            stop(Oklch::new(0.95, (p.c * 0.25).min(0.05), p.h)),
            stop(Oklch::new(0.27, (p.c * 0.35).min(0.07), p.h)),
            "Tinted backgrounds in the primary hue",
        ),
        token(
            "selection",
            stop(Oklch::new(0.88, (p.c * 0.4).min(0.08), p.h)),
            stop(Oklch::new(0.36, (p.c * 0.5).min(0.1), p.h)),
            "Text selection",
        ),
        token(
            "sidebar",
            stop(src.neutral(0.97, 1.0)),
            stop(src.neutral(0.17, 1.0)),
            "Sidebar surface",
        ),
    ]
}

fn utility_tokens(utility: &UtilityColorSet) -> Vec<UtilityTokens> {
    utility
        .iter()
        .map(|entry| {
            let lch = entry.color.oklch();
            UtilityTokens {
                role: entry.role,
                base: entry.color.clone(),
                light: stop(Oklch::new((lch.l + 0.15).min(0.92), lch.c * 0.85, lch.h)),
                dark: stop(Oklch::new((lch.l - 0.15).max(0.25), lch.c, lch.h)),
                subtle: stop(Oklch::new(0.95, (lch.c * 0.25).min(0.04), lch.h)),
            }
        })
        .collect()
}

/// Re-derive from a changed palette, keeping every locked semantic token of
/// `existing` exactly as it was.
///
/// An unlocked `ring` follows the merged `primary`, locked or not.
#[must_use]
pub fn regenerate_theme(
    existing: &ThemeTokenSet,
    palette: &[PaletteSlot],
    utility: &UtilityColorSet,
) -> ThemeTokenSet {
    let fresh = derive_theme(palette, utility);
    let mut semantic = merge_locked_by_key(
        &existing.semantic,
        fresh.semantic,
        |token| token.name.clone(),
        |token| token.locked,
    );
    sync_ring(&mut semantic);
    ThemeTokenSet { semantic, ..fresh }
}

fn sync_ring(semantic: &mut [ThemeToken]) {
    let Some(primary) = semantic.iter().find(|t| t.name == "primary") else {
        return;
    };
    let (light, dark) = (primary.light.clone(), primary.dark.clone());
    for token in semantic.iter_mut() {
        if token.name == "ring" && !token.locked {
            token.light = light.clone();
            token.dark = dark.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use okpal_color::color::hue_distance;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::contrast::contrast_ratio;
    use crate::utility::derive_utility_colors;

    const TOKEN_NAMES: [&str; 24] = [
        "background",
        "foreground",
        "card",
        "card-foreground",
        "card-raised",
        "popover",
        "popover-foreground",
        "primary",
        "primary-foreground",
        "secondary",
        "secondary-foreground",
        "muted",
        "muted-foreground",
        "accent",
        "accent-foreground",
        "destructive",
        "destructive-foreground",
        "destructive-subtle",
        "border",
        "input",
        "ring",
        "primary-subtle",
        "selection",
        "sidebar",
    ];

    fn palette(hexes: &[&str]) -> Vec<PaletteSlot> {
        hexes
            .iter()
            .map(|hex| PaletteSlot::new(ColorStop::from_hex(hex).unwrap()))
            .collect()
    }

    fn theme_for(hexes: &[&str]) -> ThemeTokenSet {
        let slots = palette(hexes);
        let utility = derive_utility_colors(&slots);
        derive_theme(&slots, &utility)
    }

    #[test]
    fn token_shape_is_fixed() {
        let theme = theme_for(&["#3B82F6", "#F97316", "#22C55E"]);
        let names: Vec<&str> = theme.semantic.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, TOKEN_NAMES.to_vec());
        assert_eq!(theme.utility.len(), 6);
        assert_eq!(theme.palette.len(), 3);
        assert_eq!(theme.palette[0].name, "color-1");
        assert_eq!(theme.palette[2].hex.hex(), "#22C55E");
    }

    #[test]
    fn neutrals_carry_primary_tint() {
        let theme = theme_for(&["#D4D4D4", "#7C3AED"]);
        let primary_h = ColorStop::from_hex("#7C3AED").unwrap().oklch().h;
        let border = theme.get("border").unwrap().dark.oklch();
        assert!(border.c > 0.003, "border chroma {}", border.c);
        assert!(hue_distance(border.h, primary_h) < 20.0, "border hue {}", border.h);
    }

    #[test]
    fn primary_is_most_chromatic_slot() {
        let theme = theme_for(&["#9CA3AF", "#DC2626", "#60A5FA"]);
        let red_h = ColorStop::from_hex("#DC2626").unwrap().oklch().h;
        let primary = theme.get("primary").unwrap();
        assert!(hue_distance(primary.dark.oklch().h, red_h) < 5.0);
        let ring = theme.get("ring").unwrap();
        assert_eq!((&ring.light, &ring.dark), (&primary.light, &primary.dark));
    }

    #[test]
    fn primary_lightness_bands() {
        let theme = theme_for(&["#3B82F6"]);
        let primary = theme.get("primary").unwrap();
        let light_l = primary.light.oklch().l;
        let dark_l = primary.dark.oklch().l;
        assert!((0.21..=0.39).contains(&light_l), "light L {light_l}");
        assert!((0.59..=0.86).contains(&dark_l), "dark L {dark_l}");
    }

    #[test]
    fn foregrounds_are_readable() {
        let theme = theme_for(&["#3B82F6", "#F97316"]);
        for (surface, text) in [
            ("background", "foreground"),
            ("primary", "primary-foreground"),
            ("destructive", "destructive-foreground"),
            ("background", "muted-foreground"),
        ] {
            let s = theme.get(surface).unwrap();
            let t = theme.get(text).unwrap();
            assert!(
                contrast_ratio(s.light.rgb(), t.light.rgb()) >= 4.4,
                "{text} on {surface} (light)"
            );
            assert!(
                contrast_ratio(s.dark.rgb(), t.dark.rgb()) >= 4.4,
                "{text} on {surface} (dark)"
            );
        }
    }

    #[test]
    fn destructive_mirrors_error_role() {
        let slots = palette(&["#3B82F6"]);
        let utility = derive_utility_colors(&slots);
        let theme = derive_theme(&slots, &utility);
        let error = utility.color(UtilityRole::Error).unwrap();
        assert_eq!(&theme.get("destructive").unwrap().light, error);
    }

    #[test]
    fn single_color_palette_falls_back() {
        let theme = theme_for(&["#3B82F6"]);
        let blue_h = ColorStop::from_hex("#3B82F6").unwrap().oklch().h;
        let secondary = theme.get("secondary").unwrap().dark.oklch();
        assert!(hue_distance(secondary.h, blue_h) < 10.0, "secondary hue {}", secondary.h);
    }

    #[test]
    fn gray_palette_still_derives() {
        let theme = theme_for(&["#777777", "#BBBBBB"]);
        assert_eq!(theme.semantic.len(), 24);
        let bg = theme.get("background").unwrap().light.oklch();
        assert!(bg.l > 0.95);
    }

    #[test]
    fn empty_palette_still_derives() {
        let theme = derive_theme(&[], &derive_utility_colors(&[]));
        assert_eq!(theme.semantic.len(), 24);
        assert!(theme.palette.is_empty());
    }

    #[test]
    fn utility_variants_bracket_base() {
        let theme = theme_for(&["#3B82F6"]);
        let info = theme.utility(UtilityRole::Info).unwrap();
        let base_l = info.base.oklch().l;
        assert!(info.light.oklch().l > base_l);
        assert!(info.dark.oklch().l < base_l);
        assert!(info.subtle.oklch().l > 0.93);
    }

    #[test]
    fn locked_token_survives_regeneration() {
        let slots = palette(&["#3B82F6"]);
        let utility = derive_utility_colors(&slots);
        let first = derive_theme(&slots, &utility).with_locked("primary", true);
        let kept = first.get("primary").unwrap().clone();

        let next_slots = palette(&["#E11D48", "#FACC15"]);
        let next_utility = derive_utility_colors(&next_slots);
        let next = regenerate_theme(&first, &next_slots, &next_utility);

        assert_eq!(next.get("primary"), Some(&kept));
        let ring = next.get("ring").unwrap();
        assert_eq!((&ring.light, &ring.dark), (&kept.light, &kept.dark));
        assert_eq!(next.palette.len(), 2);
    }

    #[test]
    fn locked_ring_is_not_resynced() {
        let slots = palette(&["#3B82F6"]);
        let first = derive_theme(&slots, &derive_utility_colors(&slots)).with_locked("ring", true);
        let kept_ring = first.get("ring").unwrap().clone();

        let next_slots = palette(&["#E11D48"]);
        let next = regenerate_theme(&first, &next_slots, &derive_utility_colors(&next_slots));

        assert_eq!(next.get("ring"), Some(&kept_ring));
        assert_ne!(next.get("primary").unwrap().dark, kept_ring.dark);
    }

    #[test]
    fn token_set_serializes_hex_values() {
        let theme = theme_for(&["#3B82F6"]);
        let json = serde_json::to_value(&theme).unwrap();
        let first = &json["semantic"][0];
        assert_eq!(first["name"], "background");
        assert!(first["light"].as_str().unwrap().starts_with('#'));
        assert_eq!(json["palette"][0]["hex"], "#3B82F6");
    }
}
