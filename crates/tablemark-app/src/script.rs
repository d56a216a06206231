//! Recorded editing scripts: a table plus the input a user produced on it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tablemark_core::{ArrowKey, ConfigError, KeyEvent, Modifiers, PointerEvent, StorageError, TableGrid};
use thiserror::Error;

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid script: {0}")]
    Parse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Pointer {
        event: PointerEvent,
    },
    Key {
        key: ArrowKey,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Submit the annotation form with these values.
    Submit {
        #[serde(default)]
        fields: BTreeMap<String, String>,
    },
    /// Press the form's delete button.
    Delete,
    /// Dismiss the form.
    Close,
}

impl ScriptStep {
    /// Keyboard steps as core key events.
    pub fn key_event(&self) -> Option<KeyEvent> {
        match self {
            ScriptStep::Key { key, modifiers } => Some(KeyEvent::new(*key, *modifiers)),
            _ => None,
        }
    }
}

/// A project name, its table and the steps to replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub project: String,
    #[serde(default)]
    pub grid: Vec<Vec<String>>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|e| ScriptError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn table(&self) -> TableGrid {
        TableGrid::new(self.grid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablemark_core::CellPoint;

    #[test]
    fn test_parse_script() {
        let json = r#"{
            "project": "census",
            "grid": [["a", "b"], ["1", "2"]],
            "steps": [
                {"op": "pointer", "event": {"kind": "down", "cell": {"col": 1, "row": 2}}},
                {"op": "pointer", "event": {"kind": "move", "cell": {"col": 2, "row": 2}, "modifiers": {"shift": false}}},
                {"op": "pointer", "event": {"kind": "up"}},
                {"op": "key", "key": "right", "modifiers": {"shift": true}},
                {"op": "submit", "fields": {"role": "dependentVar"}},
                {"op": "close"}
            ]
        }"#;
        let script = Script::from_json(json).unwrap();
        assert_eq!(script.project, "census");
        assert_eq!(script.table().cell(CellPoint::new(2, 2)), Some("2"));
        assert_eq!(script.steps.len(), 6);
        assert_eq!(
            script.steps[0],
            ScriptStep::Pointer {
                event: PointerEvent::Down { cell: CellPoint::new(1, 2), modifiers: Modifiers::NONE }
            }
        );
        assert_eq!(script.steps[3].key_event(), Some(KeyEvent::new(ArrowKey::Right, Modifiers::SHIFT)));
        assert_eq!(script.steps[5], ScriptStep::Close);
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        let result = Script::from_json(r#"{"project": "p", "steps": [{"op": "paste"}]}"#);
        assert!(matches!(result, Err(ScriptError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Script::load(Path::new("/nonexistent/script.json"));
        assert!(matches!(result, Err(ScriptError::Io { .. })));
    }
}
