//! Word boundary helpers.
//!
//! Decide which characters end a word and find the word that ends at a caret.

use crate::text::utf16_prefix;

/// Characters that complete a word when typed.
pub const DEFAULT_WORD_ENDING_CHARS: [char; 5] = [' ', '.', ',', '!', ';'];

/// Check whether `input` is exactly one of `boundary_chars`.
pub fn is_word_ending(input: &str, boundary_chars: &[char]) -> bool {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => boundary_chars.contains(&c),
        _ => false,
    }
}

/// The word that ends at `caret_offset` in `block_text`.
///
/// Takes the text up to the caret (a UTF-16 offset) and returns everything
/// after the last space in it, or the whole prefix when there is no space.
/// Punctuation is not trimmed. Offsets past the end clamp to the end.
pub fn completed_word(block_text: &str, caret_offset: usize) -> &str {
    let prefix = utf16_prefix(block_text, caret_offset);
    match prefix.rfind(' ') {
        Some(pos) => &prefix[pos + 1..],
        None => prefix,
    }
}
