//! Text chunking with configurable size and overlap.

use crate::types::Segment;

/// Split text into overlapping segments of roughly `target_len` bytes.
///
/// Segments are produced in document order. Consecutive segments share
/// `overlap` bytes so no semantic unit is fully isolated at a boundary;
/// the final segment may be shorter than the target. Every byte of the
/// input lands in at least one segment — the tail is never dropped.
///
/// Boundaries are adjusted to UTF-8 character boundaries, so actual
/// segment lengths can deviate from the target by a few bytes.
pub fn split_text(text: &str, target_len: usize, overlap: usize) -> Vec<Segment> {
    if text.is_empty() || target_len == 0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut position = 0u32;
    let mut start = 0usize;

    loop {
        let end = segment_end(text, start, target_len);

        segments.push(Segment {
            position,
            text: text[start..end].to_string(),
        });
        position += 1;

        if end == text.len() {
            break;
        }

        // Step back from the segment end by the overlap, never past the
        // current start, so coverage has no gaps.
        start = next_start(text, start, end, overlap);
    }

    tracing::debug!(
        segments = segments.len(),
        target_len,
        overlap,
        "Chunked text"
    );

    segments
}

/// Largest char boundary at most `target_len` bytes past `start`, but at
/// least one character.
fn segment_end(text: &str, start: usize, target_len: usize) -> usize {
    if start + target_len >= text.len() {
        return text.len();
    }

    let mut end = start + target_len;
    while end > start && !text.is_char_boundary(end) {
        end -= 1;
    }

    if end == start {
        // Target smaller than one code point; take the whole next char
        end = start + 1;
        while end < text.len() && !text.is_char_boundary(end) {
            end += 1;
        }
    }

    end
}

/// Start of the next segment: `overlap` bytes before `end`, adjusted down
/// to a char boundary, and always strictly past `start`.
fn next_start(text: &str, start: usize, end: usize, overlap: usize) -> usize {
    let mut next = end.saturating_sub(overlap);
    while next > start && !text.is_char_boundary(next) {
        next -= 1;
    }

    if next <= start {
        next = start + 1;
        while next < text.len() && !text.is_char_boundary(next) {
            next += 1;
        }
    }

    next
}
