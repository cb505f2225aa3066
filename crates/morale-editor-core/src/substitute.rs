//! Word substitution: swap the word before the caret for its replacement.

use smol_str::SmolStr;

use crate::error::EditorError;
use crate::state::EditorState;
use crate::text::{utf16_len, utf16_slice};
use crate::types::{ChangeType, SelectionState};

/// Replace `word`, which must end at the caret, with `replacement` followed by
/// the typed `input`, and put the caret right after the inserted text.
///
/// The typed character is written as part of the replacement, so the host
/// must not insert it again. The result is one `ReplaceText` revision.
#[tracing::instrument(level = "trace", skip_all, fields(word = %word, replacement = %replacement))]
pub fn apply_substitution(
    state: &EditorState,
    input: &str,
    word: &str,
    replacement: &str,
) -> Result<EditorState, EditorError> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Err(EditorError::NotCollapsed);
    }

    let content = state.current_content();
    let key = selection.focus_key.clone();
    let offset = selection.focus_offset;
    let block = content.require_block(&key)?;

    let mismatch = || EditorError::WordMismatch {
        key: key.clone(),
        offset,
        word: SmolStr::new(word),
    };
    let word_len = utf16_len(word);
    if word_len == 0 {
        return Err(mismatch());
    }
    let start = offset.checked_sub(word_len).ok_or_else(mismatch)?;
    if utf16_slice(block.text(), start..offset) != Some(word) {
        return Err(mismatch());
    }

    let mut new_text = String::with_capacity(replacement.len() + input.len());
    new_text.push_str(replacement);
    new_text.push_str(input);

    let replaced = content.replace_text(&SelectionState::range(key.clone(), start, offset), &new_text)?;
    let pushed = state.push(replaced, ChangeType::ReplaceText);

    // Caret goes after the last unit written, whatever its width.
    let new_offset = start + utf16_len(replacement) + utf16_len(input);
    Ok(pushed.force_selection(SelectionState::collapsed(key, new_offset)))
}
