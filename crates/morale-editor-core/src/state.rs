//! Immutable editor state: content, selection, and history.
//!
//! An `EditorState` is a value. Committing an edit (`push`) or moving the
//! caret (`force_selection`) returns a new state and leaves the old one as it
//! was, so a host can hand the previous value to a renderer while the next one
//! is being built.

use crate::document::ContentState;
use crate::types::{ChangeType, SelectionState};
use crate::undo::History;

#[derive(Clone, Debug)]
pub struct EditorState {
    content: ContentState,
    selection: SelectionState,
    history: History,
    last_change_type: Option<ChangeType>,
    revision: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}

impl EditorState {
    /// A state with one empty text block and the caret in it.
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::create_empty())
    }

    /// A state holding `content`, caret at the start of the first block.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self {
            content,
            selection,
            history: History::default(),
            last_change_type: None,
            revision: 0,
        }
    }

    /// Replace the history with an empty one keeping at most `max_steps` steps.
    pub fn with_undo_limit(mut self, max_steps: usize) -> Self {
        self.history = History::new(max_steps);
        self
    }

    pub fn current_content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    /// Monotonic counter, advanced by every committed revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Commit `content` as a new revision.
    ///
    /// The caret moves to `content.selection_after()`. Runs of native typing
    /// (`InsertCharacters` after `InsertCharacters`) share one undo step.
    pub fn push(&self, content: ContentState, change_type: ChangeType) -> Self {
        let mut history = self.history.clone();
        let merges = change_type == ChangeType::InsertCharacters
            && self.last_change_type == Some(ChangeType::InsertCharacters);
        if merges {
            history.clear_redo();
        } else {
            history.record(self.content.clone());
        }

        Self {
            selection: content.selection_after().clone(),
            content,
            history,
            last_change_type: Some(change_type),
            revision: self.revision + 1,
        }
    }

    /// Same content, caret moved. Does not create a revision.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    /// Restore the previous content, if there is one.
    ///
    /// The caret returns to where it was before the undone edit.
    pub fn undo(&self) -> Option<Self> {
        let mut history = self.history.clone();
        let previous = history.undo(self.content.clone())?;
        let selection = restore_selection(self.content.selection_before(), &previous);
        Some(Self {
            content: previous,
            selection,
            history,
            last_change_type: Some(ChangeType::UndoRedo),
            revision: self.revision + 1,
        })
    }

    /// Re-apply the most recently undone content, if there is one.
    pub fn redo(&self) -> Option<Self> {
        let mut history = self.history.clone();
        let next = history.redo(self.content.clone())?;
        let selection = next.selection_after().clone();
        Some(Self {
            content: next,
            selection,
            history,
            last_change_type: Some(ChangeType::UndoRedo),
            revision: self.revision + 1,
        })
    }
}

/// `wanted` if it is valid in `content`, otherwise that content's own caret.
fn restore_selection(wanted: &SelectionState, content: &ContentState) -> SelectionState {
    if wanted.validate(content).is_ok() {
        wanted.clone()
    } else {
        content.selection_after().clone()
    }
}
