//! Error types for the diff rendering crate.
//!
//! A single enumeration covers the failures a render call can report: color
//! registry lookups, option validation, malformed engine output and
//! configuration documents. It integrates with `thiserror` for `Display` and
//! `std::error::Error`.
//!
//! Notes:
//! - Identical inputs are never an error; they render as an empty string.
//! - Every failure is deterministic, so re-running with the same inputs and the
//!   same registry reproduces it.

use thiserror::Error;

use crate::color::ColorName;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Unified error enumeration for the rendering pipeline.
pub enum RenderError {
    /// A color required by the render mode is missing from the registry.
    #[error("The color `{0}` is not defined in the color registry.")]
    MissingColor(ColorName),

    /// Context radius was negative.
    #[error("Invalid context `{0}`: must be a non-negative integer.")]
    InvalidContext(i64),

    /// Color name outside the six known names.
    #[error("The `{0}` is not a valid color name.")]
    UnknownColorName(String),

    /// Diff primitive reported a run that is both added and removed.
    #[error("A diff run cannot be both added and removed.")]
    InvalidRun,

    /// Options or registry document failed to parse.
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::InvalidConfig(err.to_string())
    }
}
