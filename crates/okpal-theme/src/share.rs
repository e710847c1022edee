//! Share fragments — a palette and its mode packed into a URL fragment.
//!
//! Format: `c=RRGGBB-RRGGBB-...&m=<mode>`, optionally behind a leading `#`.
//! Colors are written without their `#` and in canonical uppercase.

use okpal_color::color::normalize_hex;
use thiserror::Error;

use crate::harmony::HarmonyMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("share fragment has no colors")]
    MissingColors,

    #[error("share fragment has no harmony mode")]
    MissingMode,

    #[error("invalid color in share fragment: '{0}'")]
    InvalidHex(String),

    #[error("unknown harmony mode: '{0}'")]
    UnknownMode(String),
}

/// Encode colors and a mode. Strings that are not hex colors are skipped.
#[must_use]
pub fn encode_share<S: AsRef<str>>(hexes: &[S], mode: HarmonyMode) -> String {
    let colors: Vec<String> = hexes
        .iter()
        .filter_map(|hex| normalize_hex(hex.as_ref()))
        .map(|hex| hex.trim_start_matches('#').to_string())
        .collect();
    format!("c={}&m={}", colors.join("-"), mode.name())
}

/// Decode a fragment into canonical `#RRGGBB` colors and a mode.
///
/// Unknown keys are ignored so newer fragments still open.
///
/// # Errors
///
/// Fails when the colors or mode are missing, a color is not valid hex, or
/// the mode is not a known harmony name.
pub fn decode_share(fragment: &str) -> Result<(Vec<String>, HarmonyMode), ShareError> {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let mut colors = None;
    let mut mode = None;
    for pair in fragment.split('&') {
        match pair.split_once('=') {
            Some(("c", value)) => colors = Some(value),
            Some(("m", value)) => mode = Some(value),
            _ => {}
        }
    }

    let colors = colors
        .filter(|value| !value.is_empty())
        .ok_or(ShareError::MissingColors)?
        .split('-')
        .map(|hex| normalize_hex(hex).ok_or_else(|| ShareError::InvalidHex(hex.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let mode = mode.ok_or(ShareError::MissingMode)?;
    let mode =
        HarmonyMode::from_name(mode).ok_or_else(|| ShareError::UnknownMode(mode.to_string()))?;

    Ok((colors, mode))
}
