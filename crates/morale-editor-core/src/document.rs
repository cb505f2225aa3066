//! Persistent block-structured document content.
//!
//! `ContentState` is an ordered list of blocks behind an `Arc`. Every
//! primitive returns a new `ContentState`; blocks an edit does not touch are
//! shared with the previous revision instead of copied.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::error::EditorError;
use crate::text::{splice_utf16, utf16_len, utf16_to_byte};
use crate::types::{BlockData, BlockKey, BlockType, SelectionState, make_block_key};

/// One paragraph-like unit of the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: SmolStr,
    data: BlockData,
}

impl ContentBlock {
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<SmolStr>) -> Self {
        Self {
            key,
            block_type,
            text: text.into(),
            data: BlockData::default(),
        }
    }

    pub fn with_data(mut self, data: BlockData) -> Self {
        self.data = data;
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn data(&self) -> &BlockData {
        &self.data
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_widget(&self) -> bool {
        self.block_type.is_widget()
    }

    fn with_text(&self, text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// Immutable document content plus the selections around its last edit.
#[derive(Clone, Debug)]
pub struct ContentState {
    blocks: Arc<[Arc<ContentBlock>]>,
    next_key: u64,
    selection_before: SelectionState,
    selection_after: SelectionState,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::create_empty()
    }
}

impl ContentState {
    /// A document with one empty text block.
    pub fn create_empty() -> Self {
        Self::from_text("")
    }

    /// One text block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let blocks: Vec<Arc<ContentBlock>> = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                Arc::new(ContentBlock::new(make_block_key(i as u64), BlockType::Text, line))
            })
            .collect();
        debug_assert!(!blocks.is_empty(), "split always yields at least one line");
        Self::caret_at_start(blocks.into(), make_block_key(0))
    }

    /// Build content from existing blocks. Fails on an empty list, since a
    /// document always has at least one block.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Result<Self, EditorError> {
        let first_key = blocks
            .first()
            .map(|b| b.key.clone())
            .ok_or(EditorError::EmptyDocument)?;
        let blocks: Arc<[Arc<ContentBlock>]> = blocks.into_iter().map(Arc::new).collect();
        Ok(Self::caret_at_start(blocks, first_key))
    }

    fn caret_at_start(blocks: Arc<[Arc<ContentBlock>]>, first_key: BlockKey) -> Self {
        let caret = SelectionState::collapsed(first_key, 0);
        Self {
            next_key: blocks.len() as u64,
            blocks,
            selection_before: caret.clone(),
            selection_after: caret,
        }
    }

    // === Queries ===

    pub fn blocks(&self) -> impl ExactSizeIterator<Item = &ContentBlock> + '_ {
        self.blocks.iter().map(|b| b.as_ref())
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_for_key(&self, key: &str) -> Option<&ContentBlock> {
        self.index_of(key).map(|i| self.blocks[i].as_ref())
    }

    /// Like `block_for_key`, but a missing key is an error.
    pub fn require_block(&self, key: &str) -> Result<&ContentBlock, EditorError> {
        self.block_for_key(key)
            .ok_or_else(|| EditorError::MissingBlock { key: key.into() })
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Key of the block before `key`, if `key` exists and is not first.
    pub fn key_before(&self, key: &str) -> Option<&BlockKey> {
        let idx = self.index_of(key)?;
        idx.checked_sub(1).map(|i| &self.blocks[i].key)
    }

    /// Key of the block after `key`, if `key` exists and is not last.
    pub fn key_after(&self, key: &str) -> Option<&BlockKey> {
        let idx = self.index_of(key)?;
        self.blocks.get(idx + 1).map(|b| &b.key)
    }

    pub fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    /// All block text joined with newlines. Widget blocks contribute an empty line.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&block.text);
        }
        out
    }

    /// Whether two contents hold the same blocks, ignoring selections.
    pub fn same_blocks(&self, other: &ContentState) -> bool {
        Arc::ptr_eq(&self.blocks, &other.blocks) || self.blocks == other.blocks
    }

    // === Primitives ===

    /// Replace the selected range with `text`. The range must sit in one block,
    /// and that block must not be a widget unless `text` is empty.
    pub fn replace_text(
        &self,
        selection: &SelectionState,
        text: &str,
    ) -> Result<Self, EditorError> {
        selection.validate(self)?;
        if !selection.is_single_block() {
            return Err(EditorError::CrossBlockRange);
        }

        let key = selection.start_key();
        let start = selection.start_offset();
        let end = selection.end_offset();
        let idx = self.require_index(key)?;
        let block = &self.blocks[idx];
        if block.is_widget() && !text.is_empty() {
            return Err(EditorError::WidgetText { key: key.clone() });
        }

        let new_text = splice_utf16(&block.text, start..end, text).ok_or_else(|| {
            EditorError::OffsetOutOfBounds {
                key: key.clone(),
                offset: start,
                len: block.len(),
            }
        })?;

        let mut blocks: Vec<Arc<ContentBlock>> = self.blocks.to_vec();
        blocks[idx] = Arc::new(block.with_text(new_text));

        Ok(Self {
            blocks: blocks.into(),
            next_key: self.next_key,
            selection_before: selection.clone(),
            selection_after: SelectionState::collapsed(key.clone(), start + utf16_len(text)),
        })
    }

    /// Insert `text` at a caret.
    pub fn insert_text(
        &self,
        selection: &SelectionState,
        text: &str,
    ) -> Result<Self, EditorError> {
        if !selection.is_collapsed() {
            return Err(EditorError::NotCollapsed);
        }
        self.replace_text(selection, text)
    }

    /// Split the block at the selection into two blocks.
    ///
    /// A non-collapsed selection is removed first. The head keeps the key,
    /// type and data of the original; the tail gets a new key, the same type
    /// and empty data. The caret lands at the start of the tail.
    pub fn split_block(&self, selection: &SelectionState) -> Result<Self, EditorError> {
        selection.validate(self)?;
        if !selection.is_single_block() {
            return Err(EditorError::CrossBlockRange);
        }

        let base = if selection.is_collapsed() {
            self.clone()
        } else {
            self.replace_text(selection, "")?
        };

        let key = selection.start_key();
        let at = selection.start_offset();
        let idx = base.require_index(key)?;
        let block = &base.blocks[idx];

        let split_byte =
            utf16_to_byte(&block.text, at).ok_or_else(|| EditorError::OffsetOutOfBounds {
                key: key.clone(),
                offset: at,
                len: block.len(),
            })?;

        let (new_key, next_key) = base.mint_key();
        let head = block.with_text(&block.text[..split_byte]);
        let tail = ContentBlock::new(new_key.clone(), block.block_type, &block.text[split_byte..]);

        let mut blocks: Vec<Arc<ContentBlock>> = Vec::with_capacity(base.blocks.len() + 1);
        blocks.extend(base.blocks[..idx].iter().cloned());
        blocks.push(Arc::new(head));
        blocks.push(Arc::new(tail));
        blocks.extend(base.blocks[idx + 1..].iter().cloned());

        Ok(Self {
            blocks: blocks.into(),
            next_key,
            selection_before: selection.clone(),
            selection_after: SelectionState::collapsed(new_key, 0),
        })
    }

    /// Change a block's type and data, keeping its text.
    pub fn set_block_type(
        &self,
        key: &str,
        block_type: BlockType,
        data: BlockData,
    ) -> Result<Self, EditorError> {
        let idx = self.require_index(key)?;
        let block = ContentBlock {
            block_type,
            data,
            ..(*self.blocks[idx]).clone()
        };
        Ok(self.with_block_at(idx, block, self.selection_after.clone()))
    }

    /// Change a block's type, clearing its text and resetting its data to the
    /// type's default. The caret moves to the start of the block.
    pub fn reset_block_type(&self, key: &str, block_type: BlockType) -> Result<Self, EditorError> {
        let idx = self.require_index(key)?;
        let old = &self.blocks[idx];
        let block = ContentBlock {
            key: old.key.clone(),
            block_type,
            text: SmolStr::default(),
            data: BlockData::default_for(block_type, &old.data),
        };
        let caret = SelectionState::collapsed(old.key.clone(), 0);
        Ok(self.with_block_at(idx, block, caret))
    }

    // === Internals ===

    fn index_of(&self, key: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.key == key)
    }

    fn require_index(&self, key: &str) -> Result<usize, EditorError> {
        self.index_of(key)
            .ok_or_else(|| EditorError::MissingBlock { key: key.into() })
    }

    /// Next unused key, and the counter value to store after minting it.
    fn mint_key(&self) -> (BlockKey, u64) {
        let mut n = self.next_key;
        loop {
            let key = make_block_key(n);
            n += 1;
            if self.index_of(&key).is_none() {
                return (key, n);
            }
        }
    }

    fn with_block_at(&self, idx: usize, block: ContentBlock, selection_after: SelectionState) -> Self {
        let mut blocks: Vec<Arc<ContentBlock>> = self.blocks.to_vec();
        blocks[idx] = Arc::new(block);
        Self {
            blocks: blocks.into(),
            next_key: self.next_key,
            selection_before: self.selection_after.clone(),
            selection_after,
        }
    }
}
