//! Serializable configuration for building a dispatcher.
//!
//! Every field has a default, so `{}` is a complete config equal to
//! `BoosterConfig::default()`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::InputDispatcher;
use crate::error::ConfigError;
use crate::plugin::{MoraleBoosterPlugin, WidgetTriggerPlugin};
use crate::state::EditorState;
use crate::substitution::{DEFAULT_SUBSTITUTIONS, SubstitutionEntry, SubstitutionTable};
use crate::text_helpers::DEFAULT_WORD_ENDING_CHARS;
use crate::trigger::TriggerPolicy;
use crate::types::WidgetKind;
use crate::undo::DEFAULT_UNDO_LIMIT;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterConfig {
    /// Trigger word to replacement. Replaces the built-in table when given.
    pub substitutions: BTreeMap<String, String>,
    /// Characters that complete a word.
    pub boundary_chars: Vec<char>,
    pub trigger: TriggerPolicy,
    /// Widget inserted when the trigger fires.
    pub widget: WidgetKind,
    /// Maximum undo steps kept by states built from this config.
    pub undo_limit: usize,
}

impl Default for BoosterConfig {
    fn default() -> Self {
        Self {
            substitutions: DEFAULT_SUBSTITUTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            boundary_chars: DEFAULT_WORD_ENDING_CHARS.to_vec(),
            trigger: TriggerPolicy::default(),
            widget: WidgetKind::default(),
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

impl BoosterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            entries = config.substitutions.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn substitution_table(&self) -> Result<SubstitutionTable, ConfigError> {
        SubstitutionTable::from_entries(
            self.substitutions
                .iter()
                .map(|(trigger, replacement)| SubstitutionEntry::new(trigger.as_str(), replacement.as_str())),
        )
    }

    /// Compile the table and trigger into a ready dispatcher.
    pub fn build_dispatcher(&self) -> Result<InputDispatcher, ConfigError> {
        let booster = MoraleBoosterPlugin::new(self.substitution_table()?, self.boundary_chars.clone());
        let widgets = WidgetTriggerPlugin::new(self.trigger.compile()?, self.widget);
        Ok(InputDispatcher::new(booster, widgets))
    }

    /// An empty document whose history honours `undo_limit`.
    pub fn initial_state(&self) -> EditorState {
        EditorState::create_empty().with_undo_limit(self.undo_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::WidgetTrigger;

    #[test]
    fn test_empty_json_is_default() {
        let config = BoosterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, BoosterConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = BoosterConfig::from_json_str(
            r#"{"trigger": {"kind": "char", "ch": "%"}, "undo_limit": 5}"#,
        )
        .unwrap();
        assert_eq!(config.trigger, TriggerPolicy::Char { ch: '%' });
        assert_eq!(config.undo_limit, 5);
        assert_eq!(config.substitutions.get("lame").map(String::as_str), Some("cool"));
    }

    #[test]
    fn test_custom_substitutions_replace_defaults() {
        let config = BoosterConfig::from_json_str(r#"{"substitutions": {"meh": "wow"}}"#).unwrap();
        let table = config.substitution_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("meh"), Some("wow"));
        assert!(!table.has("lame"));
    }

    #[test]
    fn test_build_dispatcher() {
        let config = BoosterConfig {
            trigger: TriggerPolicy::Char { ch: '#' },
            ..Default::default()
        };
        let dispatcher = config.build_dispatcher().unwrap();
        assert!(matches!(dispatcher.widgets().trigger(), WidgetTrigger::Char('#')));
        assert_eq!(dispatcher.booster().table().len(), DEFAULT_SUBSTITUTIONS.len());
    }

    #[test]
    fn test_build_dispatcher_errors() {
        let config = BoosterConfig {
            trigger: TriggerPolicy::Pattern {
                pattern: "[".to_string(),
                window: 1,
            },
            ..Default::default()
        };
        assert!(matches!(config.build_dispatcher(), Err(ConfigError::InvalidPattern(_))));

        let config = BoosterConfig::from_json_str(r#"{"substitutions": {"": "x"}}"#).unwrap();
        assert!(matches!(config.build_dispatcher(), Err(ConfigError::EmptyTableKey)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            BoosterConfig::from_json_str(r#"{"undo_limit": "many"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booster.json");
        std::fs::write(&path, r#"{"boundary_chars": [" "]}"#).unwrap();

        let config = BoosterConfig::load(&path).unwrap();
        assert_eq!(config.boundary_chars, vec![' ']);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BoosterConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_initial_state_undo_limit() {
        let config = BoosterConfig {
            undo_limit: 0,
            ..Default::default()
        };
        let state = config.initial_state();
        let content = state.current_content().insert_text(state.selection(), "x").unwrap();
        let state = state.push(content, crate::types::ChangeType::ReplaceText);
        assert!(!state.can_undo());
    }
}
