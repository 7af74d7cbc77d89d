//! Context windowing: keep only lines near a change.
//!
//! A line survives iff it is changed itself or a changed line lies at most
//! `context` positions before or after it. Lines are neither reordered nor
//! renumbered.

/// Filter `lines` down to the windows of radius `context` around changed lines.
///
/// `is_changed` is evaluated exactly once per line; every neighbor query reads
/// the memoized flags and stops at the first hit, so the cost is bounded by
/// `O(n * context)`.
pub fn filter<T, F>(lines: Vec<T>, context: usize, is_changed: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    let changed: Vec<bool> = lines.iter().map(is_changed).collect();
    lines
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| near_change(&changed, *idx, context))
        .map(|(_, line)| line)
        .collect()
}

fn near_change(changed: &[bool], idx: usize, context: usize) -> bool {
    if changed[idx] {
        return true;
    }
    let min = idx.saturating_sub(context);
    let max = idx.saturating_add(context).min(changed.len() - 1);
    changed[min..idx].iter().rev().any(|c| *c) || changed[idx + 1..max + 1].iter().any(|c| *c)
}
