/// Maximum length of an annotation summary, in characters.
pub const MAX_SUMMARY_LEN: usize = 450;

const ELLIPSIS: &str = "...";

/// Reduce an arbitrary-length description to a bounded summary string.
///
/// Short input (≤ 450 characters after trimming) passes through unchanged,
/// so re-summarizing is a no-op. Longer input is cut at the last whitespace
/// boundary that still leaves room for the `...` marker; when the slice has
/// no whitespace at all the cut is a hard one. Output never exceeds 450
/// characters.
pub fn summarize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_SUMMARY_LEN {
        return trimmed.to_string();
    }

    let budget = MAX_SUMMARY_LEN - ELLIPSIS.len();
    let cut = trimmed
        .char_indices()
        .nth(budget)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let slice = &trimmed[..cut];

    let head = match slice.rfind(char::is_whitespace) {
        Some(ws) => slice[..ws].trim_end(),
        None => slice,
    };

    format!("{head}{ELLIPSIS}")
}
