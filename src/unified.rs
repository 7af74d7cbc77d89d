//! Unified diff rendering: strips the engine's synthetic header, writes file
//! paths into the `---`/`+++` lines and, in colorized mode, colors lines by
//! their [`LineKind`].

use crate::{
    color::{ColorEntry, ColorName},
    colorize::colorize,
    config::RenderOptions,
    engine::DiffEngine,
    errors::RenderError,
    renderer::{DiffRenderer, UNIFIED_COLORS},
};

/// Classification of a unified diff body line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Removed,
    Added,
    Section,
    Plain,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        if line.starts_with("@@") {
            LineKind::Section
        } else if line.starts_with('-') {
            LineKind::Removed
        } else if line.starts_with('+') {
            LineKind::Added
        } else {
            LineKind::Plain
        }
    }
}

impl<E: DiffEngine> DiffRenderer<E> {
    /// Plain unified diff. `""` when the inputs are identical.
    pub fn unified_no_color(&self, old: &str, new: &str, options: &RenderOptions) -> String {
        if old == new {
            return String::new();
        }
        let patch = self
            .engine
            .create_patch(old, new, &self.labels, options.unified_context());
        let (path_old, path_new) = options.resolved_paths();
        let out = rewrite_file_lines(strip_header(&patch), path_old, path_new);
        tracing::debug!("unified diff: {} bytes", out.len());
        out
    }

    /// Colorized unified diff. The `---`/`+++` pair is colored as one block
    /// with `header`; `@@` lines get `section` up to the closing `@@`.
    pub fn unified(&self, old: &str, new: &str, options: &RenderOptions) -> Result<String, RenderError> {
        if old == new {
            return Ok(String::new());
        }
        self.colors.require(&UNIFIED_COLORS)?;
        let header = self.colors.get(ColorName::Header)?;
        let added = self.colors.get(ColorName::Added)?;
        let removed = self.colors.get(ColorName::Removed)?;
        let section = self.colors.get(ColorName::Section)?;

        let plain = self.unified_no_color(old, new, options);
        let mut lines = plain.split_inclusive('\n');
        let head: String = lines.by_ref().take(2).collect();
        let mut out = colorize(&head, header);
        for line in lines {
            let (content, eol) = split_eol(line);
            match LineKind::classify(content) {
                LineKind::Removed => out.push_str(&colorize(content, removed)),
                LineKind::Added => out.push_str(&colorize(content, added)),
                LineKind::Section => out.push_str(&colorize_section(content, section)),
                LineKind::Plain => out.push_str(content),
            }
            out.push_str(eol);
        }
        Ok(out)
    }
}

/// Drop the first two lines of the engine's patch.
fn strip_header(patch: &str) -> &str {
    patch.splitn(3, '\n').nth(2).unwrap_or("")
}

/// Rewrite the leading `---`/`+++` lines as `<marker> <path>\t<label>`, or
/// `<marker> <label>` when the path is empty.
fn rewrite_file_lines(body: &str, path_old: &str, path_new: &str) -> String {
    let mut out = String::with_capacity(body.len() + path_old.len() + path_new.len() + 2);
    let mut lines = body.split_inclusive('\n');
    for line in lines.by_ref().take(2) {
        let rewritten = if let Some(rest) = line.strip_prefix("---") {
            file_line("---", path_old, rest)
        } else if let Some(rest) = line.strip_prefix("+++") {
            file_line("+++", path_new, rest)
        } else {
            None
        };
        match rewritten {
            Some(rewritten) => out.push_str(&rewritten),
            None => out.push_str(line),
        }
    }
    out.extend(lines);
    out
}

fn file_line(marker: &str, path: &str, rest: &str) -> Option<String> {
    let label = rest
        .strip_prefix([' ', '\t'])?
        .trim_start_matches([' ', '\t']);
    Some(if path.is_empty() {
        format!("{marker} {label}")
    } else {
        format!("{marker} {path}\t{label}")
    })
}

fn split_eol(line: &str) -> (&str, &str) {
    match line.strip_suffix('\n') {
        Some(content) => (content, "\n"),
        None => (line, ""),
    }
}

/// Color from the opening `@@` through the closing one; the whole line when
/// there is no closing marker.
fn colorize_section(line: &str, section: &ColorEntry) -> String {
    let end = line[2..]
        .rfind("@@")
        .filter(|idx| *idx > 0)
        .map_or(line.len(), |idx| idx + 4);
    let mut out = colorize(&line[..end], section);
    out.push_str(&line[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::{LineKind, colorize_section, rewrite_file_lines, strip_header};
    use crate::{
        color::{ColorEntry, ColorName, ColorRegistry},
        config::{Labels, RenderOptions},
        engine::{DiffEngine, DiffRun},
        errors::RenderError,
        renderer::DiffRenderer,
    };

    /// Engine returning a fixed patch regardless of input.
    struct FixedPatch(&'static str);

    impl DiffEngine for FixedPatch {
        fn diff_chars(&self, _old: &str, _new: &str) -> Vec<DiffRun> {
            Vec::new()
        }

        fn create_patch(&self, _old: &str, _new: &str, _labels: &Labels, _context: usize) -> String {
            self.0.to_string()
        }
    }

    fn html() -> ColorRegistry {
        let mut colors = ColorRegistry::empty();
        colors.insert(ColorName::Removed, ColorEntry::new("<red>", "</red>"));
        colors.insert(ColorName::Added, ColorEntry::new("<green>", "</green>"));
        colors.insert(ColorName::Header, ColorEntry::new("<yellow>", "</yellow>"));
        colors.insert(ColorName::Section, ColorEntry::new("<magenta>", "</magenta>"));
        colors
    }

    #[test]
    fn classify_by_prefix() {
        assert_eq!(LineKind::classify("@@ -1 +1 @@"), LineKind::Section);
        assert_eq!(LineKind::classify("-gone"), LineKind::Removed);
        assert_eq!(LineKind::classify("+new"), LineKind::Added);
        assert_eq!(LineKind::classify(" same"), LineKind::Plain);
        assert_eq!(LineKind::classify("\\ No newline at end of file"), LineKind::Plain);
        assert_eq!(LineKind::classify(""), LineKind::Plain);
    }

    #[test]
    fn header_is_two_lines() {
        assert_eq!(strip_header("one\ntwo\nthree\n"), "three\n");
        assert_eq!(strip_header("one\ntwo\n"), "");
        assert_eq!(strip_header("one"), "");
    }

    #[test]
    fn file_lines_get_paths() {
        let body = "--- \tremoved\n+++ \tadded\n@@ -1,1 +1,1 @@\n-a\n+b\n";
        assert_eq!(
            rewrite_file_lines(body, "a.js", "b.js"),
            "--- a.js\tremoved\n+++ b.js\tadded\n@@ -1,1 +1,1 @@\n-a\n+b\n"
        );
        assert_eq!(
            rewrite_file_lines(body, "", ""),
            "--- removed\n+++ added\n@@ -1,1 +1,1 @@\n-a\n+b\n"
        );
    }

    #[test]
    fn empty_labels_leave_single_trailing_space() {
        let body = "--- \t\n+++ \t\n@@ -1,1 +1,1 @@\n";
        assert_eq!(
            rewrite_file_lines(body, "", ""),
            "--- \n+++ \n@@ -1,1 +1,1 @@\n"
        );
    }

    #[test]
    fn body_lines_resembling_markers_are_untouched() {
        let body = "--- \tremoved\n+++ \tadded\n@@ -1,1 +1,1 @@\n--- x\n+++ y\n";
        let out = rewrite_file_lines(body, "p", "p");
        assert!(out.ends_with("\n--- x\n+++ y\n"));
    }

    #[test]
    fn section_color_stops_at_closing_marker() {
        let tag = ColorEntry::new("<m>", "</m>");
        assert_eq!(
            colorize_section("@@ -1,2 +1,3 @@ fn main() {", &tag),
            "<m>@@ -1,2 +1,3 @@</m> fn main() {"
        );
        assert_eq!(colorize_section("@@ -1 +1", &tag), "<m>@@ -1 +1</m>");
        assert_eq!(colorize_section("@@@@", &tag), "<m>@@@@</m>");
    }

    #[test]
    fn identical_inputs_render_nothing() {
        let renderer = DiffRenderer::new().with_colors(ColorRegistry::empty());
        let options = RenderOptions::default().with_paths("a", "b");
        assert_eq!(renderer.unified_no_color("x\n", "x\n", &options), "");
        assert_eq!(renderer.unified("x\n", "x\n", &options), Ok(String::new()));
    }

    #[test]
    fn single_added_line() {
        let renderer = DiffRenderer::new();
        let options = RenderOptions::default();
        assert_eq!(
            renderer.unified_no_color("a\n", "a\nb\n", &options),
            "--- removed\n+++ added\n@@ -1,1 +1,2 @@\n a\n+b\n"
        );
        assert_eq!(
            renderer.unified("a\n", "a\nb\n", &options).unwrap(),
            "\x1b[33m--- removed\x1b[39m\n\x1b[33m+++ added\x1b[39m\n\
             \x1b[35m@@ -1,1 +1,2 @@\x1b[39m\n a\n\x1b[32m+b\x1b[39m\n"
        );
    }

    #[test]
    fn paths_are_written_with_tabs() {
        let out = DiffRenderer::new().unified_no_color(
            "a\n",
            "b\n",
            &RenderOptions::default().with_paths("a.js", "b.js"),
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "--- a.js\tremoved");
        assert_eq!(lines[1], "+++ b.js\tadded");

        let out = DiffRenderer::new().unified_no_color(
            "a\n",
            "b\n",
            &RenderOptions::default().with_path("a.js"),
        );
        assert!(out.starts_with("--- a.js\tremoved\n+++ a.js\tadded\n"));
    }

    #[test]
    fn custom_markup_per_line_kind() {
        let renderer = DiffRenderer::with_engine(FixedPatch(
            "Index: \n====\n--- \tremoved\n+++ \tadded\n@@ -1,2 +1,2 @@ ctx\n keep\n-old\n+new\n\\ No newline at end of file\n",
        ))
        .with_colors(html());
        let out = renderer
            .unified("x", "y", &RenderOptions::default().with_paths("f1", "f2"))
            .unwrap();
        assert_eq!(
            out,
            "<yellow>--- f1\tremoved</yellow>\n<yellow>+++ f2\tadded</yellow>\n\
             <magenta>@@ -1,2 +1,2 @@</magenta> ctx\n keep\n<red>-old</red>\n<green>+new</green>\n\
             \\ No newline at end of file\n"
        );
    }

    #[test]
    fn crlf_body_keeps_carriage_returns_outside_markup() {
        let renderer = DiffRenderer::new().with_colors(html());
        let out = renderer
            .unified("a\r\nb\r\n", "a\r\nc\r\n", &RenderOptions::default())
            .unwrap();
        assert!(out.contains("\n a\r\n<red>-b</red>\r\n<green>+c</green>\r\n"));
    }

    #[test]
    fn context_option_limits_hunk() {
        let old = "1\n2\n3\n4\n5\n6\n7\n";
        let new = "1\n2\n3\nfour\n5\n6\n7\n";
        let out = DiffRenderer::new()
            .unified_no_color(old, new, &RenderOptions::default().with_context(1));
        assert_eq!(
            out,
            "--- removed\n+++ added\n@@ -3,3 +3,3 @@\n 3\n-4\n+four\n 5\n"
        );
    }

    #[test]
    fn default_hunk_context_is_four_lines() {
        let old = "1\n2\n3\n4\n5\n6\n7\n8\n9\n";
        let new = "1\n2\n3\n4\nfive\n6\n7\n8\n9\n";
        let out = DiffRenderer::new().unified_no_color(old, new, &RenderOptions::default());
        assert_eq!(
            out,
            "--- removed\n+++ added\n@@ -1,9 +1,9 @@\n 1\n 2\n 3\n 4\n-5\n+five\n 6\n 7\n 8\n 9\n"
        );
        // chars mode keeps its own default of three
        let out = DiffRenderer::new()
            .chars(old, new, &RenderOptions::default().with_header(""))
            .unwrap();
        assert!(out.starts_with("2 | 2<LF>\n"));
        assert!(out.ends_with("8 | 8<LF>\n"));
    }

    #[test]
    fn missing_unified_color_fails() {
        let mut colors = html();
        colors.remove(ColorName::Header);
        let renderer = DiffRenderer::new().with_colors(colors);
        assert_eq!(
            renderer.unified("a\n", "b\n", &RenderOptions::default()),
            Err(RenderError::MissingColor(ColorName::Header))
        );
        // plain output needs no colors at all
        assert!(!renderer
            .unified_no_color("a\n", "b\n", &RenderOptions::default())
            .is_empty());
    }
}
