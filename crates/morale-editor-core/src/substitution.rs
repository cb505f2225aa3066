//! The word substitution table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ConfigError;

/// One trigger word and the text that replaces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionEntry {
    pub trigger: SmolStr,
    pub replacement: SmolStr,
}

impl SubstitutionEntry {
    pub fn new(trigger: impl Into<SmolStr>, replacement: impl Into<SmolStr>) -> Self {
        Self {
            trigger: trigger.into(),
            replacement: replacement.into(),
        }
    }
}

/// Built-in entries.
pub const DEFAULT_SUBSTITUTIONS: [(&str, &str); 12] = [
    ("lame", "cool"),
    ("boring", "exciting"),
    ("typical", "unusual"),
    ("worst", "best"),
    ("hate", "love"),
    ("dislike", "adore"),
    ("stupid", "amazing"),
    ("dumb", "brilliant"),
    ("unoriginal", "unique"),
    ("terrible", "incredible"),
    ("waste", "wisely spend"),
    (":(", ":)"),
];

/// Exact-match, case-sensitive map from trigger word to replacement.
///
/// Built once and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: HashMap<SmolStr, SmolStr>,
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SUBSTITUTIONS
                .iter()
                .map(|(k, v)| (SmolStr::new_static(k), SmolStr::new_static(v)))
                .collect(),
        }
    }
}

impl SubstitutionTable {
    /// Build a table from entries. Later entries win on duplicate triggers.
    pub fn from_entries(
        entries: impl IntoIterator<Item = SubstitutionEntry>,
    ) -> Result<Self, ConfigError> {
        let mut map = HashMap::new();
        for entry in entries {
            if entry.trigger.is_empty() {
                return Err(ConfigError::EmptyTableKey);
            }
            map.insert(entry.trigger, entry.replacement);
        }
        Ok(Self { entries: map })
    }

    /// A table with no entries; nothing is ever substituted.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn has(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Replacement for `word`. Always `Some` when `has(word)` is true.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
