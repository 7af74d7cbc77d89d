//! Diff primitives consumed by the renderers: character runs for chars mode
//! and unified patch text for unified mode.
//!
//! [`DiffEngine`] is the seam to the edit-distance computation. [`MyersEngine`]
//! is the default implementation, backed by `similar` with the Myers algorithm.

use std::{collections::VecDeque, fmt::Write};

use similar::{Algorithm, ChangeTag, TextDiff};

use crate::{config::Labels, errors::RenderError};

/// Classification of a character run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunKind {
    Unchanged,
    Inserted,
    Removed,
}

impl RunKind {
    /// Build from the `added`/`removed` flag pair some diff libraries report.
    pub fn from_flags(added: bool, removed: bool) -> Result<Self, RenderError> {
        match (added, removed) {
            (false, false) => Ok(RunKind::Unchanged),
            (true, false) => Ok(RunKind::Inserted),
            (false, true) => Ok(RunKind::Removed),
            (true, true) => Err(RenderError::InvalidRun),
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, RunKind::Unchanged)
    }
}

impl From<ChangeTag> for RunKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => RunKind::Unchanged,
            ChangeTag::Insert => RunKind::Inserted,
            ChangeTag::Delete => RunKind::Removed,
        }
    }
}

/// A maximal span of text sharing one [`RunKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffRun {
    pub text: String,
    pub kind: RunKind,
}

impl DiffRun {
    pub fn new(text: impl Into<String>, kind: RunKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(text, RunKind::Unchanged)
    }

    pub fn inserted(text: impl Into<String>) -> Self {
        Self::new(text, RunKind::Inserted)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(text, RunKind::Removed)
    }
}

/// External diff computation used by the renderers.
pub trait DiffEngine {
    /// Character-level runs in document order. Non-removed runs concatenate to
    /// `new`, non-inserted runs to `old`.
    fn diff_chars(&self, old: &str, new: &str) -> Vec<DiffRun>;

    /// Unified patch text. The first two lines are a synthetic header that the
    /// unified renderer discards; they are followed by the `---`/`+++` lines
    /// carrying `labels` after a tab, then the hunks.
    fn create_patch(&self, old: &str, new: &str, labels: &Labels, context: usize) -> String;
}

/// Default engine: `similar` Myers diffs over characters and lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct MyersEngine;

impl DiffEngine for MyersEngine {
    fn diff_chars(&self, old: &str, new: &str) -> Vec<DiffRun> {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_chars(old, new);

        let mut runs: Vec<DiffRun> = Vec::new();
        for change in diff.iter_all_changes() {
            let kind = RunKind::from(change.tag());
            match runs.last_mut() {
                Some(run) if run.kind == kind => run.text.push_str(change.value()),
                _ => runs.push(DiffRun::new(change.value(), kind)),
            }
        }
        runs
    }

    fn create_patch(&self, old: &str, new: &str, labels: &Labels, context: usize) -> String {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_lines(old, new);

        let mut out = String::with_capacity(old.len().max(new.len()) + 128);
        let _ = writeln!(out, "Index: ");
        let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
        let _ = writeln!(out, "--- \t{}", labels.removed);
        let _ = writeln!(out, "+++ \t{}", labels.added);

        let mut builder = HunkBuilder::new(&mut out, context);
        let mut old_line = 1usize;
        let mut new_line = 1usize;
        for change in diff.iter_all_changes() {
            let line = PatchLine {
                tag: change.tag(),
                old_line,
                new_line,
                text: change.value(),
            };
            match change.tag() {
                ChangeTag::Equal => {
                    old_line += 1;
                    new_line += 1;
                    builder.push_equal(line);
                }
                ChangeTag::Delete => {
                    old_line += 1;
                    builder.push_change(line);
                }
                ChangeTag::Insert => {
                    new_line += 1;
                    builder.push_change(line);
                }
            }
        }
        builder.finish();

        out
    }
}

const SEPARATOR_WIDTH: usize = 67;
const NO_NEWLINE_HINT: &str = "\\ No newline at end of file";

/// One line of the line diff. `old_line`/`new_line` are the 1-based cursors
/// on each side before this line is consumed.
#[derive(Debug, Clone, Copy)]
struct PatchLine<'a> {
    tag: ChangeTag,
    old_line: usize,
    new_line: usize,
    text: &'a str,
}

/// Streams hunks into `out`, keeping at most `context` equal lines around each
/// change and merging changes separated by up to `2 * context` equal lines.
struct HunkBuilder<'a, 'o> {
    out: &'o mut String,
    context: usize,
    // last `context` equal lines seen outside a hunk
    prefix_ctx: VecDeque<PatchLine<'a>>,
    cur_hunk: Vec<PatchLine<'a>>,
    // equal lines accumulated while inside a hunk
    eq_run: Vec<PatchLine<'a>>,
    in_hunk: bool,
}

impl<'a, 'o> HunkBuilder<'a, 'o> {
    fn new(out: &'o mut String, context: usize) -> Self {
        Self {
            out,
            context,
            prefix_ctx: VecDeque::with_capacity(context.min(64)),
            cur_hunk: Vec::new(),
            eq_run: Vec::new(),
            in_hunk: false,
        }
    }

    fn push_equal(&mut self, line: PatchLine<'a>) {
        if self.in_hunk {
            self.eq_run.push(line);
            if self.eq_run.len() > self.context.saturating_mul(2) {
                self.flush();
            }
        } else if self.context > 0 {
            if self.prefix_ctx.len() == self.context {
                self.prefix_ctx.pop_front();
            }
            self.prefix_ctx.push_back(line);
        }
    }

    fn push_change(&mut self, line: PatchLine<'a>) {
        if !self.in_hunk {
            self.cur_hunk.extend(self.prefix_ctx.drain(..));
            self.in_hunk = true;
        }
        self.cur_hunk.append(&mut self.eq_run);
        self.cur_hunk.push(line);
    }

    fn finish(mut self) {
        if self.in_hunk {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let trail = self.eq_run.len().min(self.context);
        self.cur_hunk.extend(self.eq_run.iter().take(trail).copied());

        if let Some(first) = self.cur_hunk.first().copied() {
            let old_count = self
                .cur_hunk
                .iter()
                .filter(|l| l.tag != ChangeTag::Insert)
                .count();
            let new_count = self
                .cur_hunk
                .iter()
                .filter(|l| l.tag != ChangeTag::Delete)
                .count();
            // an empty side reports the line before the hunk
            let old_start = if old_count == 0 {
                first.old_line - 1
            } else {
                first.old_line
            };
            let new_start = if new_count == 0 {
                first.new_line - 1
            } else {
                first.new_line
            };
            let _ = writeln!(
                self.out,
                "@@ -{old_start},{old_count} +{new_start},{new_count} @@"
            );

            for line in &self.cur_hunk {
                let prefix = match line.tag {
                    ChangeTag::Equal => ' ',
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                };
                self.out.push(prefix);
                self.out.push_str(line.text);
                if !line.text.ends_with('\n') {
                    self.out.push('\n');
                    self.out.push_str(NO_NEWLINE_HINT);
                    self.out.push('\n');
                }
            }
        }

        self.prefix_ctx.clear();
        let keep_start = self.eq_run.len().saturating_sub(self.context);
        self.prefix_ctx
            .extend(self.eq_run.iter().skip(keep_start).copied());

        self.cur_hunk.clear();
        self.eq_run.clear();
        self.in_hunk = false;
    }
}
