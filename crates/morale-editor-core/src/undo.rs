//! Undo/redo history for editor states.
//!
//! Provides `History`, a bounded pair of stacks of `ContentState` snapshots.
//! Snapshots share unchanged blocks, so keeping a hundred of them costs a
//! hundred block-pointer arrays, not a hundred documents.

use crate::document::ContentState;

/// Default number of undo steps kept.
pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// Bounded undo/redo stacks of whole-content snapshots.
#[derive(Clone, Debug)]
pub struct History {
    undo_stack: Vec<ContentState>,
    redo_stack: Vec<ContentState>,
    max_steps: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl History {
    /// Create an empty history keeping at most `max_steps` undo steps.
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Record `previous` as an undo step for a new edit.
    pub fn record(&mut self, previous: ContentState) {
        // Clear redo stack on new edit
        self.redo_stack.clear();

        if self.max_steps == 0 {
            return;
        }
        self.undo_stack.push(previous);

        // Trim if over max
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    /// A new edit that merges into the last undo step still invalidates redo.
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    /// Step back: returns the content to restore, moving `current` to redo.
    pub fn undo(&mut self, current: ContentState) -> Option<ContentState> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward: returns the content to restore, moving `current` to undo.
    pub fn redo(&mut self, current: ContentState) -> Option<ContentState> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
