//! Whole sentences typed through the dispatcher, one character at a time.

use morale_editor_core::{
    BlockType, BoosterConfig, ContentState, DEFAULT_SUBSTITUTIONS, DEFAULT_WORD_ENDING_CHARS,
    EditorHost, EditorState, InputDispatcher, SelectionState, StateCell, TriggerPolicy,
    WidgetKind, handle_before_input, type_character, type_text, utf16_len,
};

fn typed(text: &str) -> StateCell {
    let mut host = StateCell::default();
    type_text(&mut host, &InputDispatcher::default(), text).unwrap();
    host
}

fn block_texts(host: &StateCell) -> Vec<String> {
    host.editor_state()
        .current_content()
        .blocks()
        .map(|b| b.text().to_string())
        .collect()
}

#[test]
fn test_every_table_word_with_every_boundary() {
    for (word, replacement) in DEFAULT_SUBSTITUTIONS {
        for boundary in DEFAULT_WORD_ENDING_CHARS {
            let mut host = typed(word);
            let input = boundary.to_string();
            let result = type_character(&mut host, &InputDispatcher::default(), &input).unwrap();
            assert_eq!(result, morale_editor_core::BeforeInputResult::Handled);

            let state = host.editor_state();
            let expected = format!("{replacement}{boundary}");
            assert_eq!(state.current_content().plain_text(), expected);
            assert_eq!(
                state.selection(),
                &SelectionState::collapsed("b0".into(), utf16_len(replacement) + 1)
            );
        }
    }
}

#[test]
fn test_unknown_words_pass_through() {
    for word in ["fine", "Lame", "lamest", "cool", "l"] {
        let mut host = typed(word);
        let before = host.editor_state().current_content().plain_text();
        let result = handle_before_input(&mut host, &InputDispatcher::default(), " ");
        assert_eq!(result, morale_editor_core::BeforeInputResult::PassThrough);
        assert_eq!(host.editor_state().current_content().plain_text(), before);
    }
    assert_eq!(block_texts(&typed("fine day")), vec!["fine day"]);
}

#[test]
fn test_replacements_do_not_substitute_again() {
    let host = typed("cool exciting wisely spend :) ");
    assert_eq!(block_texts(&host), vec!["cool exciting wisely spend :) "]);

    let host = typed("lame lame ");
    assert_eq!(block_texts(&host), vec!["cool cool "]);
}

#[test]
fn test_sentence() {
    let host = typed("what a boring, typical day; I hate it!");
    assert_eq!(
        block_texts(&host),
        vec!["what a exciting, unusual day; I love it!"]
    );
    let state = host.editor_state();
    let end = utf16_len("what a exciting, unusual day; I love it!");
    assert_eq!(state.selection(), &SelectionState::collapsed("b0".into(), end));
}

#[test]
fn test_word_across_newline_is_its_own_block() {
    let host = typed("intro\nlame.");
    assert_eq!(block_texts(&host), vec!["intro", "cool."]);
}

#[test]
fn test_phrase_trigger_in_later_block() {
    let host = typed("intro\nthis is npr");
    let content = host.editor_state().current_content();
    let types: Vec<BlockType> = content.blocks().map(|b| b.block_type()).collect();
    assert_eq!(
        types,
        vec![BlockType::Text, BlockType::Widget(WidgetKind::Image), BlockType::Text]
    );
    let last = content.last_block().key().clone();
    assert_eq!(host.editor_state().selection(), &SelectionState::collapsed(last, 0));
}

#[test]
fn test_phrase_trigger_is_case_insensitive() {
    let host = typed("x\nThis Is NPR");
    assert!(host.editor_state().current_content().blocks().any(|b| b.is_widget()));
}

#[test]
fn test_near_miss_phrase_types_normally() {
    let host = typed("intro\nthis is nptrX");
    assert_eq!(block_texts(&host), vec!["intro", "this is nptrX"]);
}

#[test]
fn test_phrase_trigger_in_first_block() {
    let host = typed("this is npr");
    let content = host.editor_state().current_content();
    assert!(!content.first_block().is_widget());
    assert_eq!(content.block_count(), 3);
    assert_eq!(
        content.blocks().nth(1).map(|b| b.block_type()),
        Some(BlockType::Widget(WidgetKind::Image))
    );
}

#[test]
fn test_char_trigger_on_empty_document() {
    let config = BoosterConfig {
        trigger: TriggerPolicy::Char { ch: '%' },
        ..Default::default()
    };
    let dispatcher = config.build_dispatcher().unwrap();
    let mut host = StateCell::new(config.initial_state());
    type_character(&mut host, &dispatcher, "%").unwrap();

    let content = host.editor_state().current_content();
    let types: Vec<BlockType> = content.blocks().map(|b| b.block_type()).collect();
    assert_eq!(
        types,
        vec![BlockType::Text, BlockType::Widget(WidgetKind::Image), BlockType::Text]
    );
    assert!(content.blocks().all(|b| b.is_empty()));
    assert_eq!(
        host.editor_state().selection(),
        &SelectionState::collapsed(content.last_block().key().clone(), 0)
    );
}

#[test]
fn test_typing_continues_after_widget() {
    let config = BoosterConfig {
        trigger: TriggerPolicy::Char { ch: '%' },
        ..Default::default()
    };
    let dispatcher = config.build_dispatcher().unwrap();
    let mut host = StateCell::default();
    type_text(&mut host, &dispatcher, "a\nb%so dumb!").unwrap();

    let content = host.editor_state().current_content();
    let summary: Vec<(bool, &str)> = content.blocks().map(|b| (b.is_widget(), b.text())).collect();
    assert_eq!(summary, vec![(false, "a"), (true, ""), (false, "so brilliant!")]);
}

#[test]
fn test_widget_then_text_is_destructive() {
    let content = ContentState::from_text("keep me");
    let widget = content
        .reset_block_type("b0", BlockType::Widget(WidgetKind::Image))
        .unwrap();
    let back = widget.reset_block_type("b0", BlockType::Text).unwrap();
    let block = back.block_for_key("b0").unwrap();
    assert_eq!(block.block_type(), BlockType::Text);
    assert_eq!(block.text(), "");
}

#[test]
fn test_undo_reverts_substitution_then_typing() {
    let host = typed("so lame ");
    let state = host.editor_state();
    assert_eq!(state.current_content().plain_text(), "so cool ");

    let undone = state.undo().unwrap();
    assert_eq!(undone.current_content().plain_text(), "so lame");
    let redone = undone.redo().unwrap();
    assert_eq!(redone.current_content().plain_text(), "so cool ");
}

#[test]
fn test_each_keystroke_is_one_state() {
    let dispatcher = InputDispatcher::default();
    let mut host = StateCell::new(EditorState::create_empty());
    let mut revisions = Vec::new();
    for ch in "ok lame ".chars() {
        type_character(&mut host, &dispatcher, &ch.to_string()).unwrap();
        revisions.push(host.editor_state().revision());
    }
    assert!(revisions.windows(2).all(|w| w[1] == w[0] + 1));
}
