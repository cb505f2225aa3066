//! Core editor types: block keys, block types, block data, and selections.
//!
//! These types are framework-agnostic; any host that renders blocks can
//! construct and read them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};

use crate::document::ContentState;
use crate::error::EditorError;
use crate::text::utf16_to_byte;

/// Stable identifier for a block, unique within a document.
pub type BlockKey = SmolStr;

/// Generate a block key from a monotonic counter.
pub fn make_block_key(index: u64) -> BlockKey {
    format_smolstr!("b{}", index)
}

/// The kind of custom view a widget block is rendered with.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Image placeholder.
    #[default]
    Image,
}

/// What a block holds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Editable text (the "unstyled" block).
    #[default]
    Text,
    /// Non-editable block rendered by custom UI. Its text is always empty.
    Widget(WidgetKind),
}

impl BlockType {
    pub fn is_widget(&self) -> bool {
        matches!(self, Self::Widget(_))
    }
}

/// Opaque per-block metadata.
///
/// Shared behind an `Arc`, so cloning a block never copies the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockData(Arc<BTreeMap<SmolStr, SmolStr>>);

impl BlockData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data a block starts with when it is reset to `block_type`.
    ///
    /// Widgets always start from an empty map; text blocks keep what they had.
    pub fn default_for(block_type: BlockType, initial: &BlockData) -> Self {
        match block_type {
            BlockType::Widget(WidgetKind::Image) => Self::default(),
            BlockType::Text => initial.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SmolStr> {
        self.0.get(key)
    }

    /// Copy of this data with one entry set.
    pub fn with(&self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        let mut map = (*self.0).clone();
        map.insert(key.into(), value.into());
        Self(Arc::new(map))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SmolStr, SmolStr)> for BlockData {
    fn from_iter<I: IntoIterator<Item = (SmolStr, SmolStr)>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

/// Label attached to each committed revision, for the host's undo history.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// Native typing. Consecutive pushes merge into one undo step.
    InsertCharacters,
    ReplaceText,
    SplitBlock,
    ChangeBlockType,
    UndoRedo,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertCharacters => "insert-characters",
            Self::ReplaceText => "replace-text",
            Self::SplitBlock => "split-block",
            Self::ChangeBlockType => "change-block-type",
            Self::UndoRedo => "undo-redo",
        }
    }
}

/// Text selection with anchor and focus positions, each a block key plus a
/// UTF-16 offset into that block's text.
///
/// The anchor is where the selection started, the focus is where the caret is
/// now. Within a single block they may be in either order; use `start_offset()`
/// and `end_offset()` for ordered bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor_key: BlockKey,
    pub anchor_offset: usize,
    pub focus_key: BlockKey,
    pub focus_offset: usize,
    /// Whether the focus comes before the anchor in document order.
    pub is_backward: bool,
}

impl SelectionState {
    /// Create a selection. Backwardness is inferred for same-block selections
    /// only; use `with_backward` for ranges spanning blocks.
    pub fn new(
        anchor_key: BlockKey,
        anchor_offset: usize,
        focus_key: BlockKey,
        focus_offset: usize,
    ) -> Self {
        let is_backward = anchor_key == focus_key && focus_offset < anchor_offset;
        Self {
            anchor_key,
            anchor_offset,
            focus_key,
            focus_offset,
            is_backward,
        }
    }

    /// Create a collapsed selection (caret position).
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self::new(key.clone(), offset, key, offset)
    }

    /// Create a forward selection over `start..end` in one block.
    pub fn range(key: BlockKey, start: usize, end: usize) -> Self {
        Self::new(key.clone(), start, key, end)
    }

    pub fn with_backward(mut self, is_backward: bool) -> Self {
        self.is_backward = is_backward;
        self
    }

    /// Check if the selection is collapsed (caret only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }

    pub fn is_single_block(&self) -> bool {
        self.anchor_key == self.focus_key
    }

    pub fn start_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.focus_key
        } else {
            &self.anchor_key
        }
    }

    pub fn start_offset(&self) -> usize {
        if self.is_backward {
            self.focus_offset
        } else {
            self.anchor_offset
        }
    }

    pub fn end_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.anchor_key
        } else {
            &self.focus_key
        }
    }

    pub fn end_offset(&self) -> usize {
        if self.is_backward {
            self.anchor_offset
        } else {
            self.focus_offset
        }
    }

    /// Check that both ends name blocks in `content` and sit on a character
    /// boundary of their text.
    pub fn validate(&self, content: &ContentState) -> Result<(), EditorError> {
        for (key, offset) in [
            (&self.anchor_key, self.anchor_offset),
            (&self.focus_key, self.focus_offset),
        ] {
            let block = content.require_block(key)?;
            if utf16_to_byte(block.text(), offset).is_none() {
                return Err(EditorError::OffsetOutOfBounds {
                    key: key.clone(),
                    offset,
                    len: block.len(),
                });
            }
        }
        Ok(())
    }
}
