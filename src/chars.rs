//! Character-level inline diff: invisible characters are escaped, changed
//! characters colorized, the result split into numbered lines and trimmed to a
//! context window around the changed lines.

use crate::{
    color::{ColorEntry, ColorName},
    colorize::{colorize, escape_invisible},
    config::RenderOptions,
    context,
    engine::{DiffEngine, DiffRun, RunKind},
    errors::RenderError,
    renderer::{CHARS_COLORS, DiffRenderer},
};

/// One output line of a chars diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    /// 1-based position among all lines, before windowing.
    pub index: usize,
    /// Escaped, markup-annotated text without the line break.
    pub content: String,
    /// Whether inserted or removed characters landed on this line.
    pub has_change: bool,
    /// Whether the source line ended with a line break.
    pub terminated: bool,
}

impl RenderedLine {
    /// `"<index right-aligned to width> | <content>"`, plus the line break
    /// when the source line had one.
    pub fn numbered(&self, width: usize) -> String {
        let eol = if self.terminated { "\n" } else { "" };
        format!("{:>width$} | {}{eol}", self.index, self.content)
    }
}

impl<E: DiffEngine> DiffRenderer<E> {
    /// Character diff of `old` against `new`.
    ///
    /// Returns `""` when the inputs are identical. Otherwise the output is the
    /// header (`options.header`, or the colorized labels followed by a blank
    /// line) and the numbered lines within [`RenderOptions::chars_context`]
    /// lines of a change.
    pub fn chars(&self, old: &str, new: &str, options: &RenderOptions) -> Result<String, RenderError> {
        if old == new {
            return Ok(String::new());
        }
        self.colors.require(&CHARS_COLORS)?;
        let added = self.colors.get(ColorName::CharsAdded)?;
        let removed = self.colors.get(ColorName::CharsRemoved)?;

        let runs = self.engine.diff_chars(old, new);
        let lines = split_runs(&runs, added, removed);
        let total = lines.len();
        let width = total.to_string().len();
        let kept = context::filter(lines, options.chars_context(), |line| line.has_change);
        tracing::debug!("chars diff: kept {} of {} lines", kept.len(), total);

        let mut out = match &options.header {
            Some(header) => header.clone(),
            None => format!(
                "{} {}\n\n",
                colorize(&self.labels.removed, removed),
                colorize(&self.labels.added, added)
            ),
        };
        for line in &kept {
            out.push_str(&line.numbered(width));
        }
        Ok(out)
    }
}

/// Escape and colorize `runs`, then split them into lines. A trailing line
/// break terminates the last line; it does not start an empty one.
pub fn split_runs(runs: &[DiffRun], added: &ColorEntry, removed: &ColorEntry) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut has_change = false;

    for run in runs {
        let color = match run.kind {
            RunKind::Inserted => Some(added),
            RunKind::Removed => Some(removed),
            RunKind::Unchanged => None,
        };
        let escaped = escape_invisible(&run.text);
        for (idx, segment) in escaped.split('\n').enumerate() {
            if idx > 0 {
                lines.push(RenderedLine {
                    index: lines.len() + 1,
                    content: std::mem::take(&mut current),
                    has_change: std::mem::take(&mut has_change),
                    terminated: true,
                });
            }
            if segment.is_empty() {
                continue;
            }
            match color {
                Some(color) => {
                    current.push_str(&colorize(segment, color));
                    has_change = true;
                }
                None => current.push_str(segment),
            }
        }
    }

    if !current.is_empty() {
        lines.push(RenderedLine {
            index: lines.len() + 1,
            content: current,
            has_change,
            terminated: false,
        });
    }
    lines
}
