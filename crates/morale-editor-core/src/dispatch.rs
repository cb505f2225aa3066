//! Input dispatch: decide, before a character is committed, whether it
//! boosts a word, inserts a widget, or goes in as typed.
//!
//! Word substitution is checked first. A boundary character that completes a
//! table word never reaches the widget trigger, so at most one rewrite fires
//! per keystroke.

use crate::document::ContentBlock;
use crate::error::EditorError;
use crate::plugin::{EditorPlugin, MoraleBoosterPlugin, WidgetTriggerPlugin};
use crate::render::BlockComponent;
use crate::state::EditorState;

/// Result of offering a character to a plugin.
#[derive(Clone, Debug)]
pub enum InputOutcome {
    /// The character was consumed; this state replaces the host's.
    Handled(EditorState),
    /// The host should insert the character natively.
    NotHandled,
}

impl InputOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// The new state, if the character was handled.
    pub fn into_state(self) -> Option<EditorState> {
        match self {
            Self::Handled(state) => Some(state),
            Self::NotHandled => None,
        }
    }
}

/// Booster first, widget trigger second.
#[derive(Clone, Debug, Default)]
pub struct InputDispatcher {
    booster: MoraleBoosterPlugin,
    widgets: WidgetTriggerPlugin,
}

impl InputDispatcher {
    pub fn new(booster: MoraleBoosterPlugin, widgets: WidgetTriggerPlugin) -> Self {
        Self { booster, widgets }
    }

    pub fn booster(&self) -> &MoraleBoosterPlugin {
        &self.booster
    }

    pub fn widgets(&self) -> &WidgetTriggerPlugin {
        &self.widgets
    }

    /// Offer `input` to each rewrite in order. Never mutates `state`.
    ///
    /// A booster failure ends the dispatch: the character goes in natively
    /// and the widget trigger is not consulted.
    pub fn on_character_about_to_insert(&self, input: &str, state: &EditorState) -> InputOutcome {
        let rewritten = match self.booster.boost(input, state) {
            Ok(None) => self.widgets.insert_on_trigger(input, state),
            other => other,
        };
        into_outcome(rewritten)
    }
}

impl EditorPlugin for InputDispatcher {
    fn handle_before_input(&self, input: &str, state: &EditorState) -> InputOutcome {
        self.on_character_about_to_insert(input, state)
    }

    fn block_renderer(&self, block: &ContentBlock) -> Option<BlockComponent> {
        self.booster
            .block_renderer(block)
            .or_else(|| self.widgets.block_renderer(block))
    }
}

/// The caret's block and offset.
///
/// `Ok(None)` for a range selection, which is nothing to rewrite. A caret
/// that does not sit on a character boundary of an existing text block is an
/// integration error.
pub(crate) fn caret_block(state: &EditorState) -> Result<Option<(&ContentBlock, usize)>, EditorError> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        tracing::trace!(target: "morale::input", "selection is a range, not rewriting");
        return Ok(None);
    }
    let content = state.current_content();
    selection.validate(content)?;
    let block = content.require_block(&selection.focus_key)?;
    if block.is_widget() {
        return Err(EditorError::WidgetText {
            key: block.key().clone(),
        });
    }
    Ok(Some((block, selection.focus_offset)))
}

/// Turn a rewrite result into an outcome. Errors are logged and the
/// character passes through with the state untouched.
pub(crate) fn into_outcome(rewritten: Result<Option<EditorState>, EditorError>) -> InputOutcome {
    match rewritten {
        Ok(Some(next)) => InputOutcome::Handled(next),
        Ok(None) => InputOutcome::NotHandled,
        Err(err) => {
            tracing::warn!(target: "morale::input", error = %err, "rewrite aborted, inserting natively");
            InputOutcome::NotHandled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContentState;
    use crate::trigger::WidgetTrigger;
    use crate::types::{BlockType, SelectionState, WidgetKind};

    fn state_at(text: &str, key: &str, offset: usize) -> EditorState {
        EditorState::create_with_content(ContentState::from_text(text))
            .force_selection(SelectionState::collapsed(key.into(), offset))
    }

    fn end_of(text: &str) -> EditorState {
        let lines: Vec<&str> = text.split('\n').collect();
        let last = lines.len() - 1;
        let key = format!("b{last}");
        state_at(text, &key, crate::text::utf16_len(lines[last]))
    }

    #[test]
    fn test_substitutes_table_word() {
        let dispatcher = InputDispatcher::default();
        let next = dispatcher
            .on_character_about_to_insert(" ", &end_of("so lame"))
            .into_state()
            .unwrap();
        assert_eq!(next.current_content().plain_text(), "so cool ");
        assert_eq!(next.selection().focus_offset, 8);
    }

    #[test]
    fn test_unknown_word_not_handled() {
        let dispatcher = InputDispatcher::default();
        let outcome = dispatcher.on_character_about_to_insert(" ", &end_of("so fine"));
        assert!(!outcome.is_handled());
    }

    #[test]
    fn test_non_boundary_char_not_handled() {
        let dispatcher = InputDispatcher::default();
        assert!(!dispatcher.on_character_about_to_insert("x", &end_of("lame")).is_handled());
        assert!(!dispatcher.on_character_about_to_insert("?", &end_of("lame")).is_handled());
    }

    #[test]
    fn test_phrase_inserts_widget() {
        let dispatcher = InputDispatcher::default();
        let next = dispatcher
            .on_character_about_to_insert("r", &end_of("intro\nthis is np"))
            .into_state()
            .unwrap();
        let types: Vec<BlockType> = next.current_content().blocks().map(|b| b.block_type()).collect();
        assert_eq!(
            types,
            vec![BlockType::Text, BlockType::Widget(WidgetKind::Image), BlockType::Text]
        );
    }

    #[test]
    fn test_substitution_takes_priority() {
        // A char trigger on '.' would also fire; the table word wins.
        let widgets = WidgetTriggerPlugin::new(WidgetTrigger::Char('.'), WidgetKind::Image);
        let dispatcher = InputDispatcher::new(MoraleBoosterPlugin::default(), widgets);

        let next = dispatcher
            .on_character_about_to_insert(".", &end_of("a\nlame"))
            .into_state()
            .unwrap();
        assert_eq!(next.current_content().plain_text(), "a\ncool.");

        let next = dispatcher
            .on_character_about_to_insert(".", &end_of("a\nfine"))
            .into_state()
            .unwrap();
        assert!(next.current_content().blocks().any(|b| b.is_widget()));
    }

    #[test]
    fn test_range_selection_not_handled() {
        let dispatcher = InputDispatcher::default();
        let state = end_of("lame").force_selection(SelectionState::range("b0".into(), 0, 4));
        assert!(!dispatcher.on_character_about_to_insert(" ", &state).is_handled());
    }

    #[test]
    fn test_missing_block_fails_closed() {
        let dispatcher = InputDispatcher::default();
        let state = end_of("lame").force_selection(SelectionState::collapsed("gone".into(), 4));
        let outcome = dispatcher.on_character_about_to_insert(" ", &state);
        assert!(!outcome.is_handled());
        assert_eq!(state.current_content().plain_text(), "lame");
    }

    #[test]
    fn test_out_of_range_caret_fails_closed() {
        let dispatcher = InputDispatcher::default();
        // Caret past the end of the block: the word check fails and nothing changes.
        let state = end_of("lame").force_selection(SelectionState::collapsed("b0".into(), 40));
        assert!(!dispatcher.on_character_about_to_insert(" ", &state).is_handled());
    }

    #[test]
    fn test_out_of_range_caret_in_later_block_fails_closed() {
        let widgets = WidgetTriggerPlugin::new(WidgetTrigger::Char('%'), WidgetKind::Image);
        let dispatcher = InputDispatcher::new(MoraleBoosterPlugin::default(), widgets);

        for offset in [40, 5] {
            let state = state_at("a\nkeep", "b1", offset);
            assert!(!dispatcher.on_character_about_to_insert("%", &state).is_handled());
            assert_eq!(state.current_content().plain_text(), "a\nkeep");
        }

        // Offset 2 of "a🌍" sits inside the surrogate pair.
        let state = state_at("a\na🌍", "b1", 2);
        assert!(!dispatcher.on_character_about_to_insert("%", &state).is_handled());
    }

    #[test]
    fn test_failed_substitution_does_not_reach_trigger() {
        // ' ' would insert a widget if the booster's failure fell through.
        let widgets = WidgetTriggerPlugin::new(WidgetTrigger::Char(' '), WidgetKind::Image);
        let dispatcher = InputDispatcher::new(MoraleBoosterPlugin::default(), widgets);

        let state = state_at("a\nlame", "b1", 9);
        assert!(!dispatcher.on_character_about_to_insert(" ", &state).is_handled());

        let state = state_at("a\nlame", "b1", 4);
        let next = dispatcher
            .on_character_about_to_insert(" ", &state)
            .into_state()
            .unwrap();
        assert_eq!(next.current_content().plain_text(), "a\ncool ");
    }

    #[test]
    fn test_caret_in_widget_not_handled() {
        let content = ContentState::from_blocks(vec![
            ContentBlock::new("t".into(), BlockType::Text, "lame"),
            ContentBlock::new("w".into(), BlockType::Widget(WidgetKind::Image), ""),
        ])
        .unwrap();
        let state = EditorState::create_with_content(content)
            .force_selection(SelectionState::collapsed("w".into(), 0));
        let dispatcher = InputDispatcher::default();
        assert!(!dispatcher.on_character_about_to_insert(" ", &state).is_handled());
        assert!(!dispatcher.on_character_about_to_insert("r", &state).is_handled());
    }

    #[test]
    fn test_input_state_untouched() {
        let dispatcher = InputDispatcher::default();
        let state = end_of("so lame");
        let revision = state.revision();
        let _ = dispatcher.on_character_about_to_insert(" ", &state);
        assert_eq!(state.revision(), revision);
        assert_eq!(state.current_content().plain_text(), "so lame");
    }

    #[test]
    fn test_dispatcher_renders_widgets() {
        let dispatcher = InputDispatcher::default();
        let widget = ContentBlock::new("w".into(), BlockType::Widget(WidgetKind::Image), "");
        assert!(dispatcher.block_renderer(&widget).is_some());
    }
}
