//! Split translatable literals around inline `<color=...>` markup.
//!
//! Markup tags stay in the source as plain strings while the prose around
//! them is localized, so `"Status: <color=red>Critical</color>"` becomes two
//! keys joined with the tags.

use super::classify::classify;

const COLOR_OPEN: &str = "<color=";
const COLOR_CLOSE: &str = "</color>";

/// One emission unit of a split literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that gets a catalog key.
    Localized(String),
    /// Text emitted as-is (markup tags, numbers, punctuation).
    Literal(String),
}

/// Partition `text` into alternating localized and literal segments.
///
/// The earliest opening or closing tag is split off first, then the scan
/// continues on the remainder. An opening tag without a closing `>` ends the
/// markup scan. Empty segments are never produced.
pub fn split_markup(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some((start, end)) = next_marker(rest) {
        push_classified(&mut segments, &rest[..start]);
        segments.push(Segment::Literal(rest[start..end].to_string()));
        rest = &rest[end..];
    }
    push_classified(&mut segments, rest);

    segments
}

/// Byte range of the earliest color tag in `text`, through its closing `>`.
fn next_marker(text: &str) -> Option<(usize, usize)> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lowered = text.to_ascii_lowercase();
    let open = lowered.find(COLOR_OPEN);
    let close = lowered.find(COLOR_CLOSE);

    let start = match (open, close) {
        (Some(o), Some(c)) => o.min(c),
        (Some(o), None) => o,
        (None, Some(c)) => c,
        (None, None) => return None,
    };
    let gt = text[start..].find('>')?;
    Some((start, start + gt + 1))
}

fn push_classified(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    let segment = if classify(text, false).is_translatable() {
        Segment::Localized(text.to_string())
    } else {
        Segment::Literal(text.to_string())
    };
    segments.push(segment);
}
