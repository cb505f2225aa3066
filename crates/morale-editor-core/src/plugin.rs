//! Editor plugins.
//!
//! A plugin sees each character before the host commits it and may take it
//! over by returning a new state. It may also supply a custom view for some
//! blocks.

use crate::dispatch::{InputOutcome, caret_block, into_outcome};
use crate::document::ContentBlock;
use crate::error::EditorError;
use crate::render::{BlockComponent, BlockRenderer, WidgetBlockRenderer};
use crate::state::EditorState;
use crate::substitute::apply_substitution;
use crate::substitution::SubstitutionTable;
use crate::text_helpers::{DEFAULT_WORD_ENDING_CHARS, completed_word, is_word_ending};
use crate::trigger::WidgetTrigger;
use crate::types::WidgetKind;
use crate::widget::insert_widget;

pub trait EditorPlugin {
    /// Offer `input`, about to be inserted at the caret of `state`.
    fn handle_before_input(&self, input: &str, state: &EditorState) -> InputOutcome;

    /// Custom view for `block`, or `None` to leave it to other plugins.
    fn block_renderer(&self, _block: &ContentBlock) -> Option<BlockComponent> {
        None
    }
}

/// Swaps words from a table as soon as they are completed.
#[derive(Clone, Debug)]
pub struct MoraleBoosterPlugin {
    table: SubstitutionTable,
    boundary_chars: Vec<char>,
}

impl Default for MoraleBoosterPlugin {
    fn default() -> Self {
        Self::new(SubstitutionTable::default(), DEFAULT_WORD_ENDING_CHARS.to_vec())
    }
}

impl MoraleBoosterPlugin {
    pub fn new(table: SubstitutionTable, boundary_chars: Vec<char>) -> Self {
        Self {
            table,
            boundary_chars,
        }
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    pub fn boundary_chars(&self) -> &[char] {
        &self.boundary_chars
    }

    /// The boosted state, or `None` when `input` does not complete a table word.
    pub fn boost(&self, input: &str, state: &EditorState) -> Result<Option<EditorState>, EditorError> {
        if !is_word_ending(input, &self.boundary_chars) {
            return Ok(None);
        }
        let Some((block, offset)) = caret_block(state)? else {
            return Ok(None);
        };

        let word = completed_word(block.text(), offset);
        let Some(replacement) = self.table.get(word) else {
            tracing::trace!(target: "morale::input", word, "not a table word");
            return Ok(None);
        };

        let next = apply_substitution(state, input, word, replacement)?;
        tracing::debug!(
            target: "morale::input",
            word,
            replacement,
            block = %block.key(),
            "boosted word"
        );
        Ok(Some(next))
    }
}

impl EditorPlugin for MoraleBoosterPlugin {
    fn handle_before_input(&self, input: &str, state: &EditorState) -> InputOutcome {
        into_outcome(self.boost(input, state))
    }
}

/// Turns the caret's block into a widget when the trigger fires.
#[derive(Clone, Debug, Default)]
pub struct WidgetTriggerPlugin {
    trigger: WidgetTrigger,
    kind: WidgetKind,
}

impl WidgetTriggerPlugin {
    pub fn new(trigger: WidgetTrigger, kind: WidgetKind) -> Self {
        Self { trigger, kind }
    }

    pub fn trigger(&self) -> &WidgetTrigger {
        &self.trigger
    }

    /// The state with a widget inserted, or `None` when `input` does not fire
    /// the trigger.
    pub fn insert_on_trigger(&self, input: &str, state: &EditorState) -> Result<Option<EditorState>, EditorError> {
        let Some((block, offset)) = caret_block(state)? else {
            return Ok(None);
        };
        if !self.trigger.should_trigger(input, block.text(), offset) {
            tracing::trace!(target: "morale::input", input, "no trigger");
            return Ok(None);
        }

        let next = insert_widget(state, self.kind)?;
        tracing::debug!(
            target: "morale::input",
            block = %block.key(),
            kind = ?self.kind,
            "inserted widget"
        );
        Ok(Some(next))
    }
}

impl EditorPlugin for WidgetTriggerPlugin {
    fn handle_before_input(&self, input: &str, state: &EditorState) -> InputOutcome {
        into_outcome(self.insert_on_trigger(input, state))
    }

    fn block_renderer(&self, block: &ContentBlock) -> Option<BlockComponent> {
        WidgetBlockRenderer.render_block(block)
    }
}

/// Runs plugins in order. The first to handle a character wins.
#[derive(Default)]
pub struct PluginChain {
    plugins: Vec<Box<dyn EditorPlugin>>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, plugin: impl EditorPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn push(&mut self, plugin: Box<dyn EditorPlugin>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl EditorPlugin for PluginChain {
    fn handle_before_input(&self, input: &str, state: &EditorState) -> InputOutcome {
        for plugin in &self.plugins {
            if let InputOutcome::Handled(next) = plugin.handle_before_input(input, state) {
                return InputOutcome::Handled(next);
            }
        }
        InputOutcome::NotHandled
    }

    fn block_renderer(&self, block: &ContentBlock) -> Option<BlockComponent> {
        self.plugins.iter().find_map(|p| p.block_renderer(block))
    }
}

impl std::fmt::Debug for PluginChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginChain")
            .field("plugins", &self.plugins.len())
            .finish()
    }
}
