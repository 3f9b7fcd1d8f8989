use std::ops::Range;

/// Placed between conversation fragments before scoring.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Join conversation fragments into the single text every scale scans.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Byte range spanning up to `before` characters ahead of `pos` and up to
/// `after` characters starting at `pos`, clamped to the text.
///
/// Counts are in chars, so the range never splits a UTF-8 sequence. A `pos`
/// that is out of bounds or inside a sequence is moved back to the nearest
/// char boundary.
pub(crate) fn char_window(text: &str, pos: usize, before: usize, after: usize) -> Range<usize> {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }

    let start = text[..pos]
        .char_indices()
        .rev()
        .take(before)
        .last()
        .map_or(pos, |(i, _)| i);
    let end = text[pos..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(i, _)| pos + i);

    start..end
}

