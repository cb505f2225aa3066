//! UTF-16 offset helpers for block text.
//!
//! Block text is stored as UTF-8, but every offset the host hands us (caret
//! positions, selection bounds) counts UTF-16 code units, the unit browsers
//! use for DOM selections. These helpers translate between the two.

use std::ops::Range;

/// Length of `text` in UTF-16 code units (fast path for ASCII).
#[inline]
pub fn utf16_len(text: &str) -> usize {
    if text.is_ascii() {
        text.len()
    } else {
        text.encode_utf16().count()
    }
}

/// Convert a UTF-16 offset into a byte offset.
///
/// Returns None if the offset is past the end or falls inside a surrogate pair.
pub fn utf16_to_byte(text: &str, offset: usize) -> Option<usize> {
    if text.is_ascii() {
        return (offset <= text.len()).then_some(offset);
    }

    let mut units = 0;
    for (byte_idx, ch) in text.char_indices() {
        if units == offset {
            return Some(byte_idx);
        }
        if units > offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == offset).then_some(text.len())
}

/// The longest prefix of `text` that fits in `offset` UTF-16 units.
///
/// Never fails: offsets past the end clamp to the whole string, and an offset
/// inside a surrogate pair stops before that character.
pub fn utf16_prefix(text: &str, offset: usize) -> &str {
    let mut units = 0;
    for (byte_idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > offset {
            return &text[..byte_idx];
        }
    }
    text
}

/// Slice `text` by a UTF-16 range.
pub fn utf16_slice(text: &str, range: Range<usize>) -> Option<&str> {
    if range.start > range.end {
        return None;
    }
    let start = utf16_to_byte(text, range.start)?;
    let end = utf16_to_byte(text, range.end)?;
    Some(&text[start..end])
}

/// Replace a UTF-16 range of `text` with `insert`.
pub fn splice_utf16(text: &str, range: Range<usize>, insert: &str) -> Option<String> {
    if range.start > range.end {
        return None;
    }
    let start = utf16_to_byte(text, range.start)?;
    let end = utf16_to_byte(text, range.end)?;

    let mut out = String::with_capacity(text.len() - (end - start) + insert.len());
    out.push_str(&text[..start]);
    out.push_str(insert);
    out.push_str(&text[end..]);
    Some(out)
}
