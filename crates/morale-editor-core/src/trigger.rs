//! Widget trigger detection.
//!
//! A trigger decides, from the character about to be typed and the text
//! before the caret, whether the current block should become a widget.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::text::{utf16_len, utf16_prefix};

/// Phrase used when none is configured.
pub const DEFAULT_TRIGGER_PHRASE: &str = "this is npr";

/// Character used by the character policy when none is configured.
pub const DEFAULT_TRIGGER_CHAR: char = '%';

/// Serializable description of a trigger, compiled into a `WidgetTrigger`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Fire on one specific typed character.
    Char { ch: char },
    /// Fire when the typed character completes `phrase`, ignoring case.
    Phrase { phrase: String },
    /// Fire when the last `window` units before the caret plus the typed
    /// character match a case-insensitive regular expression.
    Pattern { pattern: String, window: usize },
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self::Phrase {
            phrase: DEFAULT_TRIGGER_PHRASE.to_string(),
        }
    }
}

impl TriggerPolicy {
    pub fn compile(&self) -> Result<WidgetTrigger, ConfigError> {
        match self {
            Self::Char { ch } => Ok(WidgetTrigger::Char(*ch)),
            Self::Phrase { phrase } => PhraseTrigger::phrase(phrase).map(WidgetTrigger::Phrase),
            Self::Pattern { pattern, window } => {
                PhraseTrigger::pattern(pattern, *window).map(WidgetTrigger::Phrase)
            }
        }
    }
}

/// Regex matched against a fixed-size window ending at the caret.
#[derive(Clone, Debug)]
pub struct PhraseTrigger {
    pattern: Regex,
    window_len: usize,
}

impl PhraseTrigger {
    /// Match `phrase` literally, case-insensitively. The window is one unit
    /// shorter than the phrase; the typed character supplies the last unit.
    pub fn phrase(phrase: &str) -> Result<Self, ConfigError> {
        if phrase.is_empty() {
            return Err(ConfigError::EmptyTrigger);
        }
        let window_len = utf16_len(phrase) - 1;
        Self::pattern(&regex::escape(phrase), window_len)
    }

    /// Match an arbitrary pattern, case-insensitively, against the last
    /// `window_len` units before the caret followed by the typed character.
    pub fn pattern(pattern: &str, window_len: usize) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyTrigger);
        }
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern,
            window_len,
        })
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn is_match(&self, input: &str, block_text: &str, caret_offset: usize) -> bool {
        let before = utf16_prefix(block_text, caret_offset);
        let units = self.window_len.min(utf16_len(before));
        let window = &before[before.len() - tail_bytes(before, units)..];

        let mut candidate = String::with_capacity(window.len() + input.len());
        candidate.push_str(window);
        candidate.push_str(input);
        self.pattern.is_match(&candidate)
    }
}

/// Byte length of the shortest suffix of `text` covering `units` UTF-16 units.
fn tail_bytes(text: &str, units: usize) -> usize {
    let mut seen = 0;
    let mut bytes = 0;
    for ch in text.chars().rev() {
        if seen >= units {
            break;
        }
        seen += ch.len_utf16();
        bytes += ch.len_utf8();
    }
    bytes
}

/// Compiled trigger strategy.
#[derive(Clone, Debug)]
pub enum WidgetTrigger {
    Char(char),
    Phrase(PhraseTrigger),
}

impl Default for WidgetTrigger {
    fn default() -> Self {
        // The default phrase is a valid literal; escaping cannot fail to compile.
        PhraseTrigger::phrase(DEFAULT_TRIGGER_PHRASE)
            .map(Self::Phrase)
            .unwrap_or(Self::Char(DEFAULT_TRIGGER_CHAR))
    }
}

impl WidgetTrigger {
    /// Whether typing `input` at `caret_offset` in `block_text` fires the trigger.
    pub fn should_trigger(&self, input: &str, block_text: &str, caret_offset: usize) -> bool {
        match self {
            Self::Char(ch) => {
                let mut chars = input.chars();
                chars.next() == Some(*ch) && chars.next().is_none()
            }
            Self::Phrase(phrase) => phrase.is_match(input, block_text, caret_offset),
        }
    }
}
