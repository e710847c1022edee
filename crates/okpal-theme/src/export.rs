//! Exporters — CSS custom properties, a JSON token tree, and a Tailwind
//! color map.
//!
//! Variable names are a compatibility surface: `--primary`,
//! `--primary-foreground`, `--card-raised`, `--info-subtle`, `--color-1`
//! and friends are consumed by other tooling and must not change.

use std::fmt;

use serde_json::{Map, Value, json};

use crate::tokens::ThemeTokenSet;

// ---------------------------------------------------------------------------
// CSS
// ---------------------------------------------------------------------------

/// CSS rendering of a token set.
///
/// Light values live in `:root`. Dark values apply through
/// `prefers-color-scheme` unless the page opts out with `.light`, and can be
/// forced with a `.dark` class. Utility and palette variables are scheme
/// independent and only appear in `:root`.
#[derive(Debug, Clone, Copy)]
pub struct Css<'a>(pub &'a ThemeTokenSet);

impl fmt::Display for Css<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.0;

        writeln!(f, ":root {{")?;
        for token in &set.semantic {
            writeln!(f, "  --{}: {};", token.name, token.light)?;
        }
        for entry in &set.utility {
            let role = entry.role.name();
            writeln!(f, "  --{role}: {};", entry.base)?;
            writeln!(f, "  --{role}-light: {};", entry.light)?;
            writeln!(f, "  --{role}-dark: {};", entry.dark)?;
            writeln!(f, "  --{role}-subtle: {};", entry.subtle)?;
        }
        for color in &set.palette {
            writeln!(f, "  --{}: {};", color.name, color.hex)?;
        }
        writeln!(f, "}}")?;

        writeln!(f)?;
        writeln!(f, "@media (prefers-color-scheme: dark) {{")?;
        writeln!(f, "  :root:not(.light) {{")?;
        for token in &set.semantic {
            writeln!(f, "    --{}: {};", token.name, token.dark)?;
        }
        writeln!(f, "  }}")?;
        writeln!(f, "}}")?;

        writeln!(f)?;
        writeln!(f, ".dark {{")?;
        for token in &set.semantic {
            writeln!(f, "  --{}: {};", token.name, token.dark)?;
        }
        writeln!(f, "}}")
    }
}

#[must_use]
pub fn to_css(set: &ThemeTokenSet) -> String {
    Css(set).to_string()
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// The token tree: `global` (raw palette), `semantic.light`,
/// `semantic.dark`, and `utility.<role>.{DEFAULT,light,dark,subtle}`.
#[must_use]
pub fn to_json_value(set: &ThemeTokenSet) -> Value {
    let global: Map<String, Value> = set
        .palette
        .iter()
        .map(|color| (color.name.clone(), Value::from(color.hex.hex())))
        .collect();

    let light: Map<String, Value> = set
        .semantic
        .iter()
        .map(|token| (token.name.clone(), Value::from(token.light.hex())))
        .collect();
    let dark: Map<String, Value> = set
        .semantic
        .iter()
        .map(|token| (token.name.clone(), Value::from(token.dark.hex())))
        .collect();

    let utility: Map<String, Value> = set
        .utility
        .iter()
        .map(|entry| {
            let value = json!({
                "DEFAULT": entry.base.hex(),
                "light": entry.light.hex(),
                "dark": entry.dark.hex(),
                "subtle": entry.subtle.hex(),
            });
            (entry.role.name().to_string(), value)
        })
        .collect();

    json!({
        "global": global,
        "semantic": { "light": light, "dark": dark },
        "utility": utility,
    })
}

/// Pretty-printed [`to_json_value`].
#[must_use]
pub fn to_json(set: &ThemeTokenSet) -> String {
    format!("{:#}", to_json_value(set))
}

// ---------------------------------------------------------------------------
// Tailwind
// ---------------------------------------------------------------------------

/// A `tailwind.config.js` snippet whose colors point at the CSS variables.
///
/// Names group on their first segment: `card`, `card-foreground` and
/// `card-raised` become `card: { DEFAULT, foreground, raised }`.
#[derive(Debug, Clone, Copy)]
pub struct Tailwind<'a>(pub &'a ThemeTokenSet);

impl Tailwind<'_> {
    /// Every exported variable name, in CSS order.
    fn variable_names(&self) -> Vec<String> {
        let set = self.0;
        let mut names: Vec<String> = set.semantic.iter().map(|t| t.name.clone()).collect();
        for entry in &set.utility {
            let role = entry.role.name();
            names.push(role.to_string());
            for suffix in ["light", "dark", "subtle"] {
                names.push(format!("{role}-{suffix}"));
            }
        }
        names.extend(set.palette.iter().map(|c| c.name.clone()));
        names
    }

    /// `(group, [(key, variable)])`, groups in first-seen order.
    fn groups(&self) -> Vec<(String, Vec<(String, String)>)> {
        let mut groups: Vec<(String, Vec<(String, String)>)> = Vec::new();
        for name in self.variable_names() {
            let (group, key) = name.split_once('-').unwrap_or((name.as_str(), "DEFAULT"));
            let entry = (key.to_string(), name.clone());
            match groups.iter_mut().find(|(g, _)| g.as_str() == group) {
                Some((_, entries)) => entries.push(entry),
                None => groups.push((group.to_string(), vec![entry])),
            }
        }
        groups
    }
}

/// Quote a JS object key when it is not a plain identifier.
fn js_key(key: &str) -> String {
    let plain = key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !key.starts_with(|c: char| c.is_ascii_digit());
    if plain { key.to_string() } else { format!("'{key}'") }
}

impl fmt::Display for Tailwind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module.exports = {{")?;
        writeln!(f, "  theme: {{")?;
        writeln!(f, "    extend: {{")?;
        writeln!(f, "      colors: {{")?;

        for (group, entries) in self.groups() {
            let group_key = js_key(&group);
            match entries.as_slice() {
                [(key, var)] if key == "DEFAULT" => {
                    writeln!(f, "        {group_key}: 'var(--{var})',")?;
                }
                _ => {
                    writeln!(f, "        {group_key}: {{")?;
                    for (key, var) in &entries {
                        writeln!(f, "          {}: 'var(--{var})',", js_key(key))?;
                    }
                    writeln!(f, "        }},")?;
                }
            }
        }

        writeln!(f, "      }},")?;
        writeln!(f, "    }},")?;
        writeln!(f, "  }},")?;
        writeln!(f, "}};")
    }
}

#[must_use]
pub fn to_tailwind(set: &ThemeTokenSet) -> String {
    Tailwind(set).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
