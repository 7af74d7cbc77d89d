//! Line-safe markup injection and invisible-character escaping.
//!
//! Terminals reset or carry color state at line boundaries, so a markup pair
//! must never span a line break: each segment between `\n`/`\r` characters is
//! wrapped on its own and the breaks are emitted bare.

use crate::color::ColorEntry;

pub const TAB_MARKER: &str = "<tab>";
pub const CR_MARKER: &str = "<CR>";
pub const LF_MARKER: &str = "<LF>";

/// Wrap every non-empty segment of `text` between line-break characters in
/// `color.open` / `color.close`.
pub fn colorize(text: &str, color: &ColorEntry) -> String {
    let mut out = String::with_capacity(text.len() + color.open.len() + color.close.len());
    let mut last = 0;
    for (idx, brk) in text.match_indices(['\n', '\r']) {
        wrap_segment(&mut out, &text[last..idx], color);
        out.push_str(brk);
        last = idx + brk.len();
    }
    wrap_segment(&mut out, &text[last..], color);
    out
}

fn wrap_segment(out: &mut String, segment: &str, color: &ColorEntry) {
    if segment.is_empty() {
        return;
    }
    out.push_str(&color.open);
    out.push_str(segment);
    out.push_str(&color.close);
}

/// Make tabs and line terminators visible. `\n` keeps a real line break after
/// its marker so the line structure of the text is unchanged.
pub fn escape_invisible(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => out.push_str(TAB_MARKER),
            '\r' => out.push_str(CR_MARKER),
            '\n' => {
                out.push_str(LF_MARKER);
                out.push('\n');
            }
            c => out.push(c),
        }
    }
    out
}
