//! Stylesheets for highlighted markup from Base24 color schemes.
//!
//! A scheme is the usual Base16/Base24 YAML document:
//!
//! ```yaml
//! name: Example
//! author: Someone
//! variant: dark
//! palette:
//!   base00: "1d1f21"
//!   base01: "282a2e"
//!   # ... through base0F, optionally base10..base17
//! ```
//!
//! `base00`..`base0F` are required. The Base24 extension slots
//! `base10`..`base17` fall back to their Base16 counterparts when absent.
//!
//! Class families are colored following the Base16 styling guide. A family
//! rule also matches its dotted sub-captures (`keyword` styles
//! `keyword-control`) unless a more specific rule follows.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::error::{Error, Result};

/// Number of palette slots in a Base24 scheme.
pub const PALETTE_SIZE: usize = 24;

/// Selector stylesheets are scoped to when none is given.
pub const DEFAULT_SCOPE: &str = "pre code";

/// Base24 slots `base10`..`base17` and the Base16 slot each falls back to.
const BASE24_FALLBACK: [usize; 8] = [0x00, 0x00, 0x08, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E];

/// Class token to palette slot, families before their sub-classes.
const RULES: &[(&str, usize)] = &[
    ("comment", 0x03),
    ("keyword", 0x0E),
    ("string", 0x0B),
    ("escape", 0x0C),
    ("number", 0x09),
    ("constant", 0x09),
    ("boolean", 0x09),
    ("function", 0x0D),
    ("constructor", 0x0A),
    ("type", 0x0A),
    ("module", 0x0A),
    ("variable", 0x08),
    ("property", 0x0C),
    ("operator", 0x05),
    ("punctuation", 0x04),
    ("tag", 0x08),
    ("attribute", 0x0A),
    ("label", 0x0A),
    ("embedded", 0x0F),
    ("string-special", 0x0C),
    ("constant-builtin", 0x12),
    ("function-builtin", 0x16),
    ("function-macro", 0x15),
    ("type-builtin", 0x13),
    ("variable-builtin", 0x12),
    ("variable-parameter", 0x08),
    ("punctuation-special", 0x0F),
];

#[derive(Debug, Deserialize)]
struct RawScheme {
    name: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    variant: String,
    palette: BTreeMap<String, String>,
}

/// A validated Base24 color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base24Scheme {
    /// Scheme name.
    pub name: String,
    /// Scheme author.
    pub author: String,
    /// `dark` or `light`, as declared by the scheme.
    pub variant: String,
    palette: Vec<String>,
}

impl Base24Scheme {
    /// Parse and validate a scheme from YAML.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the YAML is malformed, a required slot is
    /// missing, or a color is not a 6-digit hex value.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawScheme = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid color scheme: {e}")))?;

        let mut palette: Vec<String> = Vec::with_capacity(PALETTE_SIZE);
        for slot in 0..PALETTE_SIZE {
            let key = slot_name(slot);
            let color = match raw.palette.get(&key) {
                Some(value) => parse_hex(value).ok_or_else(|| {
                    Error::Config(format!("Palette slot {key} has invalid color '{value}'"))
                })?,
                None if slot >= 0x10 => palette[BASE24_FALLBACK[slot - 0x10]].clone(),
                None => {
                    return Err(Error::Config(format!("Palette slot {key} is missing")));
                }
            };
            palette.push(color);
        }

        Ok(Self {
            name: raw.name,
            author: raw.author,
            variant: raw.variant,
            palette,
        })
    }

    /// Load a scheme from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise as
    /// [`Base24Scheme::from_yaml`].
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let scheme = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), name = %scheme.name, "Loaded color scheme");
        Ok(scheme)
    }

    /// Hex color (lowercase, no `#`) of a palette slot, `0x00..=0x17`.
    #[must_use]
    pub fn color(&self, slot: usize) -> Option<&str> {
        self.palette.get(slot).map(String::as_str)
    }

    /// Render a stylesheet for markup under `scope`.
    ///
    /// `class_prefix` must match the prefix used when rendering.
    #[must_use]
    pub fn stylesheet(&self, scope: &str, class_prefix: &str) -> String {
        let header = format!(
            "/* {} by {} */\n{scope} {{\n  background-color: #{};\n  color: #{};\n}}\n",
            self.name, self.author, self.palette[0x00], self.palette[0x05]
        );
        let rules = RULES.iter().map(|&(class, slot)| {
            let style = if class == "comment" {
                "  font-style: italic;\n"
            } else {
                ""
            };
            let class = format!("{class_prefix}{class}");
            format!(
                "{scope} .{class}, {scope} [class^=\"{class}-\"] {{\n  color: #{};\n{style}}}\n",
                self.palette[slot]
            )
        });
        std::iter::once(header).chain(rules).collect()
    }
}

fn slot_name(slot: usize) -> String {
    format!("base{slot:02X}")
}

/// Normalize `#RRGGBB` or `RRGGBB` to lowercase `rrggbb`.
fn parse_hex(value: &str) -> Option<String> {
    let hex = value.trim().trim_start_matches('#');
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())).then(|| hex.to_ascii_lowercase())
}
