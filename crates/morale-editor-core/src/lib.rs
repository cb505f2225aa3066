//! morale-editor-core: block editor state with as-you-type word boosting and
//! widget triggers, without framework dependencies.
//!
//! This crate provides:
//! - `ContentState` / `EditorState` - persistent block document with undo
//! - `InputDispatcher` - decides, per keystroke, whether to boost a word,
//!   insert a widget, or let the character through
//! - `EditorPlugin` / `EditorHost` - the seams a host editor plugs into
//! - `BoosterConfig` - serializable configuration for all of the above

pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod host;
pub mod plugin;
pub mod render;
pub mod state;
pub mod substitute;
pub mod substitution;
pub mod text;
pub mod text_helpers;
pub mod trigger;
pub mod types;
pub mod undo;
pub mod widget;

pub use config::BoosterConfig;
pub use dispatch::{InputDispatcher, InputOutcome};
pub use document::{ContentBlock, ContentState};
pub use error::{ConfigError, EditorError};
pub use host::{
    BeforeInputResult, EditorHost, StateCell, handle_before_input, insert_natively, move_caret,
    type_character, type_text,
};
pub use plugin::{EditorPlugin, MoraleBoosterPlugin, PluginChain, WidgetTriggerPlugin};
pub use render::{
    BlockComponent, BlockRenderer, ComponentKind, WidgetBlockRenderer, block_render_element,
};
pub use smol_str::SmolStr;
pub use state::EditorState;
pub use substitute::apply_substitution;
pub use substitution::{DEFAULT_SUBSTITUTIONS, SubstitutionEntry, SubstitutionTable};
pub use text::utf16_len;
pub use text_helpers::{DEFAULT_WORD_ENDING_CHARS, completed_word, is_word_ending};
pub use trigger::{
    DEFAULT_TRIGGER_CHAR, DEFAULT_TRIGGER_PHRASE, PhraseTrigger, TriggerPolicy, WidgetTrigger,
};
pub use types::{
    BlockData, BlockKey, BlockType, ChangeType, SelectionState, WidgetKind, make_block_key,
};
pub use undo::{DEFAULT_UNDO_LIMIT, History};
pub use widget::insert_widget;
