//! Error types for editor state operations.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised by the document primitives and the engines built on them.
///
/// Every one of these is an integration error (a selection or key that does
/// not belong to the content it is applied to). The input dispatcher turns
/// them into a pass-through so the document is never left half-edited.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditorError {
    /// No block with this key exists in the content.
    #[error("no block with key {key:?}")]
    MissingBlock { key: SmolStr },

    /// Offset is past the end of the block, or splits a surrogate pair.
    #[error("offset {offset} is not a valid position in block {key:?} (length {len})")]
    OffsetOutOfBounds {
        key: SmolStr,
        offset: usize,
        len: usize,
    },

    /// A document must hold at least one block.
    #[error("document has no blocks")]
    EmptyDocument,

    /// The operation only works inside a single block.
    #[error("selection spans more than one block")]
    CrossBlockRange,

    /// Widget blocks hold no text, so nothing can be typed into them.
    #[error("block {key:?} is a widget and cannot hold text")]
    WidgetText { key: SmolStr },

    /// The operation needs a caret, not a range.
    #[error("selection is not collapsed")]
    NotCollapsed,

    /// The text before the caret is not the word the caller asked to replace.
    #[error("text before offset {offset} in block {key:?} does not end with {word:?}")]
    WordMismatch {
        key: SmolStr,
        offset: usize,
        word: SmolStr,
    },
}

/// Errors raised while building a dispatcher from configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration was not valid JSON for the expected shape.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A phrase trigger pattern failed to compile.
    #[error("invalid trigger pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A trigger phrase or pattern was empty.
    #[error("trigger phrase must not be empty")]
    EmptyTrigger,

    /// A substitution entry had an empty trigger word.
    #[error("substitution table keys must not be empty")]
    EmptyTableKey,
}
