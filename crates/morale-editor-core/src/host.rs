//! Host glue: where the editor state lives and how a keystroke reaches it.
//!
//! The host owns one current `EditorState`. Plugins only ever see it through
//! `EditorHost`, read it, and hand back a replacement.

use crate::dispatch::InputOutcome;
use crate::error::EditorError;
use crate::plugin::EditorPlugin;
use crate::state::EditorState;
use crate::types::{ChangeType, SelectionState};

/// Read and commit access to the host's current state.
pub trait EditorHost {
    fn editor_state(&self) -> &EditorState;
    fn set_editor_state(&mut self, state: EditorState);
}

/// In-memory host holding a single state.
#[derive(Clone, Debug, Default)]
pub struct StateCell {
    state: EditorState,
}

impl StateCell {
    pub fn new(state: EditorState) -> Self {
        Self { state }
    }

    pub fn into_inner(self) -> EditorState {
        self.state
    }
}

impl EditorHost for StateCell {
    fn editor_state(&self) -> &EditorState {
        &self.state
    }

    fn set_editor_state(&mut self, state: EditorState) {
        self.state = state;
    }
}

/// Result of handling a `beforeinput` for one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeforeInputResult {
    /// A plugin took the character and the host's state was replaced.
    /// The host must not insert the character.
    Handled,
    /// Nothing took the character. The host inserts it natively.
    PassThrough,
}

/// Offer `input` to `plugin` and commit its state if it handled the character.
pub fn handle_before_input<H, P>(host: &mut H, plugin: &P, input: &str) -> BeforeInputResult
where
    H: EditorHost + ?Sized,
    P: EditorPlugin + ?Sized,
{
    match plugin.handle_before_input(input, host.editor_state()) {
        InputOutcome::Handled(next) => {
            host.set_editor_state(next);
            BeforeInputResult::Handled
        }
        InputOutcome::NotHandled => BeforeInputResult::PassThrough,
    }
}

/// Insert `input` at the selection the way a plain editor would.
///
/// A newline splits the block. Anything else replaces the selection, pushed as
/// `InsertCharacters` so consecutive keystrokes share an undo step. Widget
/// blocks take no input, including a caret left in one by undo.
pub fn insert_natively(state: &EditorState, input: &str) -> Result<EditorState, EditorError> {
    let content = state.current_content();
    let selection = state.selection();

    for key in [&selection.anchor_key, &selection.focus_key] {
        if content.require_block(key)?.is_widget() {
            return Err(EditorError::WidgetText { key: key.clone() });
        }
    }

    if input == "\n" {
        let split = content.split_block(selection)?;
        return Ok(state.push(split, ChangeType::SplitBlock));
    }

    let inserted = if selection.is_collapsed() {
        content.insert_text(selection, input)?
    } else {
        content.replace_text(selection, input)?
    };
    Ok(state.push(inserted, ChangeType::InsertCharacters))
}

/// Type one character into a host that has no native insertion of its own.
///
/// Plugins get the first look; on pass-through the character is inserted
/// with `insert_natively`.
pub fn type_character<H, P>(
    host: &mut H,
    plugin: &P,
    input: &str,
) -> Result<BeforeInputResult, EditorError>
where
    H: EditorHost + ?Sized,
    P: EditorPlugin + ?Sized,
{
    let result = handle_before_input(host, plugin, input);
    if result == BeforeInputResult::PassThrough {
        let next = insert_natively(host.editor_state(), input)?;
        host.set_editor_state(next);
    }
    Ok(result)
}

/// Type `text` one character at a time. Returns how many characters a
/// plugin handled.
pub fn type_text<H, P>(host: &mut H, plugin: &P, text: &str) -> Result<usize, EditorError>
where
    H: EditorHost + ?Sized,
    P: EditorPlugin + ?Sized,
{
    let mut buf = [0u8; 4];
    let mut handled = 0;
    for ch in text.chars() {
        let input = ch.encode_utf8(&mut buf);
        if type_character(host, plugin, input)? == BeforeInputResult::Handled {
            handled += 1;
        }
    }
    Ok(handled)
}

/// Move the host's caret, keeping its content.
pub fn move_caret<H: EditorHost + ?Sized>(
    host: &mut H,
    selection: SelectionState,
) -> Result<(), EditorError> {
    selection.validate(host.editor_state().current_content())?;
    let next = host.editor_state().force_selection(selection);
    host.set_editor_state(next);
    Ok(())
}
