//! Widget insertion: turn the caret's block into a widget and open a fresh
//! text block after it.
//!
//! The sequence is:
//!
//! 1. If the caret is in the first block, split there first and move into the
//!    new block, so the first block of a document is never a widget.
//! 2. Reset the caret block to the widget type (text cleared, data reset).
//! 3. Split the widget at offset 0, producing a block right after it.
//! 4. Reset that trailing block to an empty text block.
//! 5. Put the caret at the start of the trailing block.
//!
//! Every split and type change is its own revision. All of them are built
//! before anything is returned, so a failure at any step hands back an error
//! and the caller still holds the untouched input state.

use crate::error::EditorError;
use crate::state::EditorState;
use crate::types::{BlockType, ChangeType, SelectionState, WidgetKind};

#[tracing::instrument(level = "trace", skip_all, fields(kind = ?kind))]
pub fn insert_widget(state: &EditorState, kind: WidgetKind) -> Result<EditorState, EditorError> {
    let state = guard_first_block(state)?;

    let widget_key = state.selection().anchor_key.clone();
    let content = state.current_content();
    let with_widget = content.reset_block_type(&widget_key, BlockType::Widget(kind))?;
    let state = state.push(with_widget, ChangeType::ChangeBlockType);

    let split = state
        .current_content()
        .split_block(&SelectionState::collapsed(widget_key.clone(), 0))?;
    let state = state.push(split, ChangeType::SplitBlock);

    let text_key = state
        .current_content()
        .key_after(&widget_key)
        .cloned()
        .ok_or_else(|| EditorError::MissingBlock {
            key: widget_key.clone(),
        })?;
    let reopened = state
        .current_content()
        .reset_block_type(&text_key, BlockType::Text)?;
    let state = state.push(reopened, ChangeType::ChangeBlockType);

    tracing::trace!(%widget_key, %text_key, "widget inserted");
    Ok(state.force_selection(SelectionState::collapsed(text_key, 0)))
}

/// Split the first block at the caret and move into the new block, or return
/// the state unchanged when the caret is not in the first block.
fn guard_first_block(state: &EditorState) -> Result<EditorState, EditorError> {
    let selection = state.selection();
    let content = state.current_content();
    let key = &selection.anchor_key;
    selection.validate(content)?;

    if content.key_before(key).is_some() {
        return Ok(state.clone());
    }

    let caret = SelectionState::collapsed(key.clone(), selection.anchor_offset);
    let split = content.split_block(&caret)?;
    let next_key = split
        .key_after(key)
        .cloned()
        .ok_or_else(|| EditorError::MissingBlock { key: key.clone() })?;
    let pushed = state.push(split, ChangeType::SplitBlock);
    Ok(pushed.force_selection(SelectionState::collapsed(next_key, 0)))
}
