use serde::{Deserialize, Deserializer, Serialize, de};

use crate::errors::RenderError;

/// Chars-mode context when none is set.
pub const DEFAULT_CONTEXT: usize = 3;
/// Unified-mode hunk context when none is set.
pub const DEFAULT_UNIFIED_CONTEXT: usize = 4;

/// Per-call rendering options.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RenderOptions {
    /// Lines kept before/after a changed line. `None` uses the mode default.
    #[serde(
        deserialize_with = "non_negative_context",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<usize>,
    /// Pre-rendered text replacing the default chars-mode header.
    pub header: Option<String>,
    /// File paths written into the unified `---`/`+++` lines.
    pub paths: Option<FilePaths>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            context: None,
            header: None,
            paths: None,
        }
    }
}

impl RenderOptions {
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = Some(context);
        self
    }

    /// Like [`RenderOptions::with_context`] for signed input; negatives fail.
    pub fn try_with_context(self, context: i64) -> Result<Self, RenderError> {
        Ok(self.with_context(checked_context(context)?))
    }

    pub fn chars_context(&self) -> usize {
        self.context.unwrap_or(DEFAULT_CONTEXT)
    }

    pub fn unified_context(&self) -> usize {
        self.context.unwrap_or(DEFAULT_UNIFIED_CONTEXT)
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_paths(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.paths = Some(FilePaths::new(old, new));
        self
    }

    /// Use one path for both sides of a unified diff.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.paths = Some(FilePaths::new(path, ""));
        self
    }

    /// Resolved `(old, new)` paths: `new` falls back to `old`, `old` to `""`.
    pub fn resolved_paths(&self) -> (&str, &str) {
        match &self.paths {
            Some(paths) => paths.resolve(),
            None => ("", ""),
        }
    }
}

/// Old/new path pair, serialized as a two-element array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "[String; 2]", into = "[String; 2]")]
pub struct FilePaths {
    pub old: String,
    pub new: String,
}

impl FilePaths {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn resolve(&self) -> (&str, &str) {
        let new = if self.new.is_empty() {
            self.old.as_str()
        } else {
            self.new.as_str()
        };
        (self.old.as_str(), new)
    }
}

impl From<[String; 2]> for FilePaths {
    fn from([old, new]: [String; 2]) -> Self {
        Self { old, new }
    }
}

impl From<FilePaths> for [String; 2] {
    fn from(paths: FilePaths) -> Self {
        [paths.old, paths.new]
    }
}

/// Words naming the two sides in headers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
    pub removed: String,
    pub added: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            removed: "removed".to_string(),
            added: "added".to_string(),
        }
    }
}

impl Labels {
    pub fn new(removed: impl Into<String>, added: impl Into<String>) -> Self {
        Self {
            removed: removed.into(),
            added: added.into(),
        }
    }
}

pub fn checked_context(context: i64) -> Result<usize, RenderError> {
    usize::try_from(context).map_err(|_| RenderError::InvalidContext(context))
}

fn non_negative_context<'deserialize, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'deserialize>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        String(String),
    }

    let context = match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => v,
        IntOrString::String(v) => v.trim().parse::<i64>().map_err(de::Error::custom)?,
    };
    checked_context(context).map(Some).map_err(de::Error::custom)
}
