//! Diff-Render: human-readable, optionally colorized differences between two blocks of text.
//!
//! Goals
//! - Exact output: line breaks, whitespace and trailing-newline state of the inputs are kept
//!   byte for byte (CRLF is never normalized).
//! - Markup that never spans a line break, so colors do not bleed in real terminals.
//! - Pluggable markup: ANSI by default, any open/close pair (e.g. HTML tags) on request.
//!
//! Core Capabilities
//! - Chars mode: character-level inline diff with escaped invisible characters (`<tab>`, `<CR>`,
//!   `<LF>`), numbered lines and a context window around changed lines.
//! - Unified mode: unified diff with file paths in the `---`/`+++` lines, colorized per line kind
//!   or plain.
//!
//! Modules
//! - `chars` / `unified`: the two renderers.
//! - `color`: color names, markup pairs and the registry.
//! - `colorize`: line-safe markup injection and invisible-character escaping.
//! - `context`: context windowing over changed lines.
//! - `engine`: the diff primitive seam and the default `similar`-backed engine.
//! - `config`: render options and labels.
//! - `errors`: unified error type.
//!
//! Typical Usage
//! ```
//! use diff_render::RenderOptions;
//!
//! let out = diff_render::unified_no_color(
//!     "a\n",
//!     "a\nb\n",
//!     &RenderOptions::default().with_paths("old.txt", "new.txt"),
//! );
//! assert_eq!(out, "--- old.txt\tremoved\n+++ new.txt\tadded\n@@ -1,1 +1,2 @@\n a\n+b\n");
//! ```

pub mod chars;
pub mod color;
pub mod colorize;
pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod renderer;
pub mod unified;

pub use chars::RenderedLine;
pub use color::{ColorEntry, ColorName, ColorRegistry};
pub use config::{FilePaths, Labels, RenderOptions};
pub use engine::{DiffEngine, DiffRun, MyersEngine, RunKind};
pub use errors::RenderError;
pub use renderer::DiffRenderer;
pub use unified::LineKind;

/// Character diff with the default ANSI session. See [`DiffRenderer::chars`].
pub fn chars(old: &str, new: &str, options: &RenderOptions) -> Result<String, RenderError> {
    DiffRenderer::new().chars(old, new, options)
}

/// Colorized unified diff with the default ANSI session. See [`DiffRenderer::unified`].
pub fn unified(old: &str, new: &str, options: &RenderOptions) -> Result<String, RenderError> {
    DiffRenderer::new().unified(old, new, options)
}

/// Plain unified diff. See [`DiffRenderer::unified_no_color`].
pub fn unified_no_color(old: &str, new: &str, options: &RenderOptions) -> String {
    DiffRenderer::new().unified_no_color(old, new, options)
}
