//! Color registry: maps the six symbolic color names used by the renderers to
//! an open/close markup pair.
//!
//! The default registry holds ANSI escape codes. Any entry can be replaced (or
//! the whole table swapped) to emit other markup, e.g. HTML tags:
//!
//! ```
//! use diff_render::{ColorEntry, ColorName, ColorRegistry};
//!
//! let mut colors = ColorRegistry::ansi();
//! colors.insert(ColorName::CharsAdded, ColorEntry::new("<ins>", "</ins>"));
//! assert_eq!(colors.get(ColorName::CharsAdded).unwrap().open, "<ins>");
//! ```

use std::{collections::BTreeMap, fmt, str::FromStr};

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::errors::RenderError;

const FG_RESET: &str = "\x1b[39m";
const BG_RESET: &str = "\x1b[49m";

/// Symbolic names a renderer looks up in the [`ColorRegistry`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ColorName {
    /// Added lines in unified mode.
    Added,
    /// Removed lines in unified mode.
    Removed,
    /// Inserted characters in chars mode.
    CharsAdded,
    /// Removed characters in chars mode.
    CharsRemoved,
    /// The `---`/`+++` header block in unified mode.
    Header,
    /// `@@ ... @@` hunk markers in unified mode.
    Section,
}

impl ColorName {
    pub const ALL: [ColorName; 6] = [
        ColorName::Added,
        ColorName::Removed,
        ColorName::CharsAdded,
        ColorName::CharsRemoved,
        ColorName::Header,
        ColorName::Section,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ColorName::Added => "added",
            ColorName::Removed => "removed",
            ColorName::CharsAdded => "charsAdded",
            ColorName::CharsRemoved => "charsRemoved",
            ColorName::Header => "header",
            ColorName::Section => "section",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorName {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RenderError::UnknownColorName(s.to_string()))
    }
}

/// A markup pair wrapped around a span of text.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ColorEntry {
    pub open: String,
    pub close: String,
}

impl ColorEntry {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// ANSI foreground color, closed with the default-foreground code.
    pub fn fg(color: Color) -> Self {
        Self::new(format!("\x1b[{}m", color.to_fg_str()), FG_RESET)
    }

    /// ANSI background color, closed with the default-background code.
    pub fn bg(color: Color) -> Self {
        Self::new(format!("\x1b[{}m", color.to_bg_str()), BG_RESET)
    }
}

/// Table from [`ColorName`] to [`ColorEntry`], owned by a render session.
///
/// Deserializes from a JSON object keyed by the camelCase color names:
/// `{"added": {"open": "<ins>", "close": "</ins>"}, ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ColorRegistry {
    entries: BTreeMap<ColorName, ColorEntry>,
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::ansi()
    }
}

impl ColorRegistry {
    /// Standard terminal table: background red/green for characters,
    /// red/green for lines, yellow header, magenta sections.
    pub fn ansi() -> Self {
        let entries = BTreeMap::from([
            (ColorName::CharsRemoved, ColorEntry::bg(Color::Red)),
            (ColorName::CharsAdded, ColorEntry::bg(Color::Green)),
            (ColorName::Removed, ColorEntry::fg(Color::Red)),
            (ColorName::Added, ColorEntry::fg(Color::Green)),
            (ColorName::Header, ColorEntry::fg(Color::Yellow)),
            (ColorName::Section, ColorEntry::fg(Color::Magenta)),
        ]);
        Self { entries }
    }

    /// Registry with no entries; every colorized render fails until filled.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Load a registry from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, name: ColorName, entry: ColorEntry) -> Option<ColorEntry> {
        self.entries.insert(name, entry)
    }

    pub fn remove(&mut self, name: ColorName) -> Option<ColorEntry> {
        self.entries.remove(&name)
    }

    pub fn get(&self, name: ColorName) -> Result<&ColorEntry, RenderError> {
        self.entries
            .get(&name)
            .ok_or(RenderError::MissingColor(name))
    }

    /// Fail with the first of `names` that has no entry.
    pub fn require(&self, names: &[ColorName]) -> Result<(), RenderError> {
        names.iter().try_for_each(|name| self.get(*name).map(|_| ()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorName, &ColorEntry)> {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }
}
