//! Harmony engine — N-color palettes from named hue relationships.
//!
//! Anchor modes place colors at fixed hue offsets from a base hue and cycle
//! through the offsets when more colors are requested than there are
//! anchors. The four special modes (monochromatic, shades, natural, random)
//! sweep lightness or wander hue instead. All layout happens in HSL; the
//! random terms come from the caller's [`RandomSource`].

use okpal_color::color::{Hsl, normalize_hue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::merge::merge_locked;
use crate::random::RandomSource;
use crate::stop::{ColorStop, PaletteSlot};

/// Golden angle (360 / φ²) in degrees.
pub const GOLDEN_ANGLE: f64 = 137.508;

/// Lightness offset of the first/last cycle when anchors repeat.
const CYCLE_LIGHTNESS_SPAN: f64 = 20.0;

/// Random lightness jitter when every anchor is used at most once.
const SINGLE_CYCLE_JITTER: f64 = 22.0;

/// Saturation jitter for anchored slots.
const ANCHOR_SATURATION_JITTER: f64 = 8.0;

/// The kind of harmony used to lay out a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyMode {
    /// Base and its opposite.
    Complementary,
    /// Base plus the two neighbors of its complement.
    SplitComplementary,
    /// 120-degree spacing.
    Triadic,
    /// 90-degree spacing.
    Tetradic,
    /// 90-degree spacing.
    Square,
    /// Neighbors at ±30 and ±60 degrees.
    Analogous,
    /// Base, its ±30 neighbors, and the neighbors of its complement.
    DoubleSplitComplementary,
    /// Base, complement, and the complement's neighbors.
    Compound,
    /// 72-degree spacing.
    Pentadic,
    /// 60-degree spacing.
    Hexadic,
    /// One hue, lightness swept from 15 to 85.
    Monochromatic,
    /// One hue, lightness swept from 8 to 90 with fading saturation.
    Shades,
    /// Earthy: hue wanders around the base, muted saturation.
    Natural,
    /// Random base hue, golden-angle rotation per slot.
    Random,
}

impl HarmonyMode {
    /// Kebab-case identifier, as used in share fragments and on the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Square => "square",
            Self::Analogous => "analogous",
            Self::DoubleSplitComplementary => "double-split-complementary",
            Self::Compound => "compound",
            Self::Pentadic => "pentadic",
            Self::Hexadic => "hexadic",
            Self::Monochromatic => "monochromatic",
            Self::Shades => "shades",
            Self::Natural => "natural",
            Self::Random => "random",
        }
    }

    /// Parse a mode from its name (case-insensitive). Accepts the short
    /// aliases `split-comp` and `double-split`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "split-comp" => Some(Self::SplitComplementary),
            "double-split" => Some(Self::DoubleSplitComplementary),
            _ => Self::all().iter().find(|m| m.name() == lower).copied(),
        }
    }

    /// All available modes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary, Self::SplitComplementary, Self::Triadic,
            Self::Tetradic, Self::Square, Self::Analogous,
            Self::DoubleSplitComplementary, Self::Compound, Self::Pentadic,
            Self::Hexadic, Self::Monochromatic, Self::Shades,
            Self::Natural, Self::Random,
        ]
    }

    /// Hue offsets (degrees) relative to the base hue. Empty for the
    /// special modes.
    #[must_use]
    pub const fn anchors(self) -> &'static [f64] {
        match self {
            Self::Complementary => &[0.0, 180.0],
            Self::SplitComplementary => &[0.0, 150.0, 210.0],
            Self::Triadic => &[0.0, 120.0, 240.0],
            Self::Tetradic | Self::Square => &[0.0, 90.0, 180.0, 270.0],
            Self::Analogous => &[-60.0, -30.0, 0.0, 30.0, 60.0],
            Self::DoubleSplitComplementary => &[-30.0, 0.0, 30.0, 150.0, 210.0],
            Self::Compound => &[0.0, 150.0, 180.0, 210.0],
            Self::Pentadic => &[0.0, 72.0, 144.0, 216.0, 288.0],
            Self::Hexadic => &[0.0, 60.0, 120.0, 180.0, 240.0, 300.0],
            Self::Monochromatic | Self::Shades | Self::Natural | Self::Random => &[],
        }
    }

    /// Whether this mode places colors at fixed hue anchors.
    #[must_use]
    pub const fn is_anchored(self) -> bool {
        !self.anchors().is_empty()
    }
}

impl std::fmt::Display for HarmonyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate exactly `count` colors in `mode`.
///
/// - No seeds: the base color is random.
/// - One seed: it sets the base hue/saturation/lightness. Anchored modes
///   emit the seed itself as the first color.
/// - Two or more seeds: the seeds are emitted verbatim (truncated to
///   `count`), and the remaining slots take the mode's hues relative to the
///   first seed, with saturation ±15 clamped to [25, 95] and lightness ±30
///   clamped to [20, 80] around that seed.
#[must_use]
pub fn generate(
    mode: HarmonyMode,
    count: usize,
    seeds: &[ColorStop],
    rng: &mut dyn RandomSource,
) -> Vec<ColorStop> {
    debug!(mode = mode.name(), count, seeds = seeds.len(), "generating harmony");

    if count == 0 {
        return Vec::new();
    }
    if seeds.len() >= 2 {
        return from_seeds(mode, count, seeds, rng);
    }

    let seed = seeds.first();
    let base = seed.map_or_else(|| random_base(rng), ColorStop::hsl);

    match mode {
        HarmonyMode::Monochromatic => monochromatic(base, count, rng),
        HarmonyMode::Shades => shades(base, count),
        HarmonyMode::Natural => natural(base.h, count, rng),
        HarmonyMode::Random => {
            let start = seed.map_or_else(|| rng.range(0.0, 360.0), |s| s.hsl().h);
            random(start, count, rng)
        }
        _ => anchored(mode.anchors(), base, count, seed, rng),
    }
}

/// A random base for unseeded generation.
fn random_base(rng: &mut dyn RandomSource) -> Hsl {
    Hsl::new(rng.range(0.0, 360.0), rng.range(55.0, 85.0), rng.range(42.0, 58.0))
}

/// Normalized sweep position of slot `i` out of `count`.
fn sweep_t(i: usize, count: usize) -> f64 {
    if count <= 1 {
        0.5
    } else {
        i as f64 / (count - 1) as f64
    }
}

fn anchored(
    anchors: &[f64],
    base: Hsl,
    count: usize,
    seed: Option<&ColorStop>,
    rng: &mut dyn RandomSource,
) -> Vec<ColorStop> {
    let n = anchors.len();
    let cycles = count.div_ceil(n);

    (0..count)
        .map(|i| {
            if let (0, Some(seed)) = (i, seed) {
                return seed.clone();
            }
            let cycle = i / n;
            let offset = if cycles > 1 {
                let t = cycle as f64 / (cycles - 1) as f64;
                (2.0 * CYCLE_LIGHTNESS_SPAN).mul_add(t, -CYCLE_LIGHTNESS_SPAN)
            } else {
                rng.jitter(SINGLE_CYCLE_JITTER)
            };
            let h = base.h + anchors[i % n];
            let s = (base.s + rng.jitter(ANCHOR_SATURATION_JITTER)).clamp(25.0, 95.0);
            let l = (base.l + offset).clamp(12.0, 88.0);
            ColorStop::from_hsl(Hsl::new(h, s, l))
        })
        .collect()
}

fn monochromatic(base: Hsl, count: usize, rng: &mut dyn RandomSource) -> Vec<ColorStop> {
    (0..count)
        .map(|i| {
            let l = 70.0f64.mul_add(sweep_t(i, count), 15.0);
            let s = base.s + rng.jitter(6.0);
            ColorStop::from_hsl(Hsl::new(base.h, s, l))
        })
        .collect()
}

fn shades(base: Hsl, count: usize) -> Vec<ColorStop> {
    (0..count)
        .map(|i| {
            let t = sweep_t(i, count);
            let l = 82.0f64.mul_add(t, 8.0);
            let s = 20.0f64.mul_add(-t, base.s);
            ColorStop::from_hsl(Hsl::new(base.h, s, l))
        })
        .collect()
}

fn natural(base_hue: f64, count: usize, rng: &mut dyn RandomSource) -> Vec<ColorStop> {
    (0..count)
        .map(|_| {
            let h = base_hue + rng.jitter(25.0);
            let s = rng.range(15.0, 60.0);
            let l = rng.range(25.0, 75.0);
            ColorStop::from_hsl(Hsl::new(h, s, l))
        })
        .collect()
}

fn random(start_hue: f64, count: usize, rng: &mut dyn RandomSource) -> Vec<ColorStop> {
    (0..count)
        .map(|i| {
            let h = (i as f64).mul_add(GOLDEN_ANGLE, start_hue);
            let s = rng.range(45.0, 90.0);
            let l = rng.range(35.0, 70.0);
            ColorStop::from_hsl(Hsl::new(h, s, l))
        })
        .collect()
}

/// Hue for slot `idx` of `mode` relative to `base_hue`, used when filling
/// around user seeds.
fn slot_hue(mode: HarmonyMode, base_hue: f64, idx: usize, rng: &mut dyn RandomSource) -> f64 {
    let anchors = mode.anchors();
    let h = match mode {
        HarmonyMode::Monochromatic | HarmonyMode::Shades => base_hue,
        HarmonyMode::Natural => base_hue + rng.jitter(25.0),
        HarmonyMode::Random => (idx as f64).mul_add(GOLDEN_ANGLE, base_hue),
        _ => base_hue + anchors[idx % anchors.len()],
    };
    normalize_hue(h)
}

fn from_seeds(
    mode: HarmonyMode,
    count: usize,
    seeds: &[ColorStop],
    rng: &mut dyn RandomSource,
) -> Vec<ColorStop> {
    let first = seeds[0].hsl();
    let mut out: Vec<ColorStop> = seeds.iter().take(count).cloned().collect();

    for idx in out.len()..count {
        let h = slot_hue(mode, first.h, idx, rng);
        let s = (first.s + rng.jitter(15.0)).clamp(25.0, 95.0);
        let l = (first.l + rng.jitter(30.0)).clamp(20.0, 80.0);
        out.push(ColorStop::from_hsl(Hsl::new(h, s, l)));
    }

    out
}

// ---------------------------------------------------------------------------
// Palette regeneration
// ---------------------------------------------------------------------------

/// Regenerate a palette in place of its unlocked slots.
///
/// Locked slots are returned unchanged at their positions and act as seeds
/// (in slot order) for the new colors. Unlocked slots receive fresh,
/// unnamed colors.
#[must_use]
pub fn regenerate_palette(
    slots: &[PaletteSlot],
    mode: HarmonyMode,
    rng: &mut dyn RandomSource,
) -> Vec<PaletteSlot> {
    let seeds: Vec<ColorStop> = slots
        .iter()
        .filter(|slot| slot.locked)
        .map(|slot| slot.color.clone())
        .collect();

    let generated = generate(mode, slots.len(), &seeds, rng);
    let mut fresh = generated.into_iter().skip(seeds.len());

    // Fresh colors go to unlocked positions in order.
    let candidates: Vec<PaletteSlot> = slots
        .iter()
        .map(|slot| {
            let next = if slot.locked { None } else { fresh.next() };
            next.map_or_else(|| slot.clone(), PaletteSlot::new)
        })
        .collect();
    let lock_mask: Vec<bool> = slots.iter().map(|slot| slot.locked).collect();

    merge_locked(slots, candidates, &lock_mask)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use okpal_color::color::hue_distance;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::random::RngSource;
    use crate::random::testing::Fixed;

    fn stop(hex: &str) -> ColorStop {
        ColorStop::from_hex(hex).unwrap()
    }

    #[test]
    fn fourteen_named_modes() {
        assert_eq!(HarmonyMode::all().len(), 14);
        for &mode in HarmonyMode::all() {
            assert_eq!(HarmonyMode::from_name(mode.name()), Some(mode));
        }
    }

    #[test]
    fn from_name_accepts_aliases() {
        assert_eq!(HarmonyMode::from_name("split-comp"), Some(HarmonyMode::SplitComplementary));
        assert_eq!(
            HarmonyMode::from_name("Double-Split"),
            Some(HarmonyMode::DoubleSplitComplementary)
        );
        assert_eq!(HarmonyMode::from_name("sacred"), None);
    }

    #[test]
    fn mode_serializes_kebab_case() {
        let json = serde_json::to_string(&HarmonyMode::DoubleSplitComplementary).unwrap();
        assert_eq!(json, r#""double-split-complementary""#);
    }

    #[test]
    fn output_is_exactly_count() {
        let mut rng = RngSource::seeded(1);
        for &mode in HarmonyMode::all() {
            for count in [0, 1, 2, 3, 5, 8, 13] {
                let colors = generate(mode, count, &[], &mut rng);
                assert_eq!(colors.len(), count, "{mode} count {count}");
            }
        }
    }

    #[test]
    fn complementary_hues_are_opposite() {
        let mut rng = RngSource::seeded(42);
        let colors = generate(HarmonyMode::Complementary, 2, &[], &mut rng);
        let diff = hue_distance(colors[0].hsl().h, colors[1].hsl().h);
        assert!((diff - 180.0).abs() < 2.0, "hue difference: {diff}");
    }

    #[test]
    fn triadic_hues_follow_anchors() {
        let colors = generate(HarmonyMode::Triadic, 3, &[], &mut Fixed(0.5));
        // Fixed(0.5) puts the base hue at 180.
        let expected = [180.0, 300.0, 60.0];
        for (color, want) in colors.iter().zip(expected) {
            let diff = hue_distance(color.hsl().h, want);
            assert!(diff < 2.0, "hue {} vs {want}", color.hsl().h);
        }
    }

    #[test]
    fn repeated_cycles_span_lightness() {
        // Two cycles of complementary: first cycle -20, second +20.
        let seed = ColorStop::from_hsl(Hsl::new(200.0, 70.0, 50.0));
        let colors = generate(HarmonyMode::Complementary, 4, &[seed], &mut Fixed(0.5));
        assert!((colors[1].hsl().l - 30.0).abs() < 1.0, "l = {}", colors[1].hsl().l);
        assert!((colors[2].hsl().l - 70.0).abs() < 1.0, "l = {}", colors[2].hsl().l);
        assert!((colors[3].hsl().l - 70.0).abs() < 1.0, "l = {}", colors[3].hsl().l);
    }

    #[test]
    fn single_seed_is_first_color_of_anchored_mode() {
        let seed = stop("#3B82F6");
        let mut rng = RngSource::seeded(3);
        let colors = generate(HarmonyMode::Triadic, 3, std::slice::from_ref(&seed), &mut rng);
        assert_eq!(colors[0], seed);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate(HarmonyMode::Natural, 5, &[], &mut RngSource::seeded(9));
        let b = generate(HarmonyMode::Natural, 5, &[], &mut RngSource::seeded(9));
        assert_eq!(a, b);
    }

    #[test]
    fn monochromatic_sweeps_lightness() {
        let seed = ColorStop::from_hsl(Hsl::new(210.0, 60.0, 50.0));
        let colors = generate(HarmonyMode::Monochromatic, 5, &[seed], &mut Fixed(0.5));
        let ls: Vec<f64> = colors.iter().map(|c| c.hsl().l).collect();
        assert!((ls[0] - 15.0).abs() < 1.0, "first l {}", ls[0]);
        assert!((ls[4] - 85.0).abs() < 1.0, "last l {}", ls[4]);
        assert!(ls.windows(2).all(|w| w[0] < w[1]), "not increasing: {ls:?}");
    }

    #[test]
    fn shades_fade_saturation() {
        let seed = ColorStop::from_hsl(Hsl::new(10.0, 80.0, 50.0));
        let colors = generate(HarmonyMode::Shades, 6, &[seed], &mut Fixed(0.5));
        assert!((colors[0].hsl().l - 8.0).abs() < 1.0);
        assert!((colors[5].hsl().l - 90.0).abs() < 1.0);
        assert!(colors[0].hsl().s > colors[5].hsl().s);
    }

    #[test]
    fn natural_stays_near_base_hue() {
        let seed = ColorStop::from_hsl(Hsl::new(100.0, 40.0, 50.0));
        let mut rng = RngSource::seeded(5);
        for color in generate(HarmonyMode::Natural, 10, &[seed], &mut rng) {
            let hsl = color.hsl();
            if hsl.s > 20.0 {
                assert!(hue_distance(hsl.h, 100.0) < 28.0, "hue {}", hsl.h);
            }
            assert!((24.0..=76.0).contains(&hsl.l), "l {}", hsl.l);
        }
    }

    #[test]
    fn random_rotates_by_golden_angle() {
        let colors = generate(HarmonyMode::Random, 3, &[], &mut Fixed(0.5));
        let h0 = colors[0].hsl().h;
        let h1 = colors[1].hsl().h;
        let diff = hue_distance(normalize_hue(h0 + GOLDEN_ANGLE), h1);
        assert!(diff < 2.0, "golden step off by {diff}");
    }

    #[test]
    fn multiple_seeds_are_emitted_verbatim() {
        let seeds = [stop("#FF0000"), stop("#00AA55")];
        let mut rng = RngSource::seeded(11);
        let colors = generate(HarmonyMode::Tetradic, 5, &seeds, &mut rng);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], seeds[0]);
        assert_eq!(colors[1], seeds[1]);
        for color in &colors[2..] {
            let hsl = color.hsl();
            assert!((19.0..=81.0).contains(&hsl.l), "l {}", hsl.l);
        }
    }

    #[test]
    fn seed_fill_follows_anchors_of_first_seed() {
        // Red seed: h 0, s 100 (clamped to 95), l 50. Fixed(0.5) zeroes jitter.
        let seeds = [stop("#FF0000"), stop("#00AA55")];
        let colors = generate(HarmonyMode::Tetradic, 5, &seeds, &mut Fixed(0.5));
        for (color, want_h) in colors[2..].iter().zip([180.0, 270.0, 0.0]) {
            let hsl = color.hsl();
            assert!(hue_distance(hsl.h, want_h) < 1.5, "hue {} vs {want_h}", hsl.h);
            assert!((hsl.s - 95.0).abs() < 1.5, "s {}", hsl.s);
            assert!((hsl.l - 50.0).abs() < 1.0, "l {}", hsl.l);
        }
    }

    #[test]
    fn seed_fill_clamps_extreme_jitter() {
        let muted = ColorStop::from_hsl(Hsl::new(200.0, 30.0, 15.0));
        let seeds = [muted, stop("#FFFFFF")];
        for color in &generate(HarmonyMode::Triadic, 6, &seeds, &mut Fixed(0.0))[2..] {
            let hsl = color.hsl();
            assert!((hsl.s - 25.0).abs() < 1.5, "s {}", hsl.s);
            assert!((hsl.l - 20.0).abs() < 1.0, "l {}", hsl.l);
        }

        let vivid = ColorStop::from_hsl(Hsl::new(200.0, 90.0, 85.0));
        let seeds = [vivid, stop("#000000")];
        for color in &generate(HarmonyMode::Triadic, 6, &seeds, &mut Fixed(0.999))[2..] {
            let hsl = color.hsl();
            assert!((hsl.s - 95.0).abs() < 1.5, "s {}", hsl.s);
            assert!((hsl.l - 80.0).abs() < 1.0, "l {}", hsl.l);
        }
    }

    #[test]
    fn seeds_truncate_to_count() {
        let seeds = [stop("#111111"), stop("#222222"), stop("#333333")];
        let colors = generate(HarmonyMode::Triadic, 2, &seeds, &mut Fixed(0.5));
        assert_eq!(colors, seeds[..2].to_vec());
    }

    #[test]
    fn regenerate_keeps_locked_slots() {
        let slots = vec![
            PaletteSlot::new(stop("#3B82F6")).locked(true).named("Brand"),
            PaletteSlot::new(stop("#000000")),
            PaletteSlot::new(stop("#F97316")).locked(true),
            PaletteSlot::new(stop("#FFFFFF")),
        ];
        let mut rng = RngSource::seeded(21);
        let next = regenerate_palette(&slots, HarmonyMode::Analogous, &mut rng);
        assert_eq!(next.len(), 4);
        assert_eq!(next[0], slots[0]);
        assert_eq!(next[2], slots[2]);
        assert!(!next[1].locked);
        assert!(!next[3].locked);

        let seeds = [slots[0].color.clone(), slots[2].color.clone()];
        let expected = generate(HarmonyMode::Analogous, 4, &seeds, &mut RngSource::seeded(21));
        assert_eq!(next[1].color, expected[2]);
        assert_eq!(next[3].color, expected[3]);
    }
}
