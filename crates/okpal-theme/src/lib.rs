//! # okpal-theme — Perceptual Palette Engine
//!
//! Generates harmonious palettes, tint/shade scales, semantic utility colors
//! and complete light/dark design-token sets from a handful of colors. Every
//! entry point is a pure function over plain records: the caller owns the
//! palette, the engine only derives from it.
//!
//! # Architecture
//!
//! ```text
//! HarmonyMode + count + seeds + RandomSource
//!     │
//!     ▼
//! harmony.rs:  generate the palette (hue anchors, sweeps, jitter)
//!     │
//!     ├──► scale.rs:    11-step OKLCH tint/shade ramp per color
//!     │
//!     ▼
//! utility.rs:  info/success/warning/error/neutral/focus roles
//!     │
//!     ▼
//! tokens.rs:   ~24 semantic tokens (light + dark), utility map, palette
//!     │
//!     ▼
//! export.rs:   CSS custom properties, JSON token tree, Tailwind colors
//! ```
//!
//! `contrast.rs` (WCAG metrics, OKLab distance) and `merge.rs` (lock-mask
//! merging) are used throughout. `names.rs` gives colors readable names and
//! `share.rs` packs a palette into a URL fragment.
//!
//! # Color Space
//!
//! Harmonies are laid out in HSL because their jitter ranges are specified
//! in HSL percentages. Scales, utility roles and tokens are built in OKLCH
//! and gamut-mapped back to sRGB by chroma reduction, so hue and lightness
//! survive exactly as designed.

// l, a, b, c, h are the conventional names.
#![allow(clippy::many_single_char_names)]
// Mathematical code uses small integer-to-float casts (loop indices, steps).
#![allow(clippy::cast_precision_loss)]
// la/lb, ca/cb and friends.
#![allow(clippy::similar_names)]
// The token table is one long list.
#![allow(clippy::too_many_lines)]

pub mod contrast;
pub mod export;
pub mod harmony;
pub mod merge;
pub mod names;
pub mod random;
pub mod scale;
pub mod share;
pub mod stop;
pub mod tokens;
pub mod utility;

pub use harmony::{HarmonyMode, generate, regenerate_palette};
pub use random::{RandomSource, RngSource};
pub use scale::{ScaleStep, generate_scale};
pub use stop::{ColorStop, PaletteSlot, hex_to_stop};
pub use tokens::{ThemeToken, ThemeTokenSet, derive_theme, regenerate_theme};
pub use utility::{
    UtilityColor, UtilityColorSet, UtilityRole, derive_utility_colors, regenerate_utility_colors,
};
