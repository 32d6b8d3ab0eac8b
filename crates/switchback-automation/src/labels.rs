//! Locale variants of the button labels the close sequence looks for

use serde::{Deserialize, Serialize};

const FORCE_STOP: &[&str] = &[
    "Force stop",
    "Force Stop",
    "FORCE STOP",
    "Beenden erzwingen",
    "Stoppen erzwingen",
    "Stopp erzwingen",
];

const CONFIRM: &[&str] = &["OK", "Ok", "Okay"];

/// Candidate labels per step, matched exactly and tried in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSet {
    pub force_stop: Vec<String>,
    pub confirm: Vec<String>,
}

impl LabelSet {
    /// Add labels for another locale, skipping ones already present
    pub fn extend(&mut self, force_stop: &[&str], confirm: &[&str]) {
        for label in force_stop {
            if !self.force_stop.iter().any(|l| l == label) {
                self.force_stop.push(label.to_string());
            }
        }
        for label in confirm {
            if !self.confirm.iter().any(|l| l == label) {
                self.confirm.push(label.to_string());
            }
        }
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            force_stop: FORCE_STOP.iter().map(|s| s.to_string()).collect(),
            confirm: CONFIRM.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_english_and_german() {
        let labels = LabelSet::default();
        assert!(labels.force_stop.contains(&"Force stop".to_string()));
        assert!(labels.force_stop.contains(&"Beenden erzwingen".to_string()));
        assert_eq!(labels.confirm[0], "OK");
    }

    #[test]
    fn test_extend_adds_new_locale_once() {
        let mut labels = LabelSet::default();
        let before = labels.force_stop.len();

        labels.extend(&["Forcer l'arrêt", "Force stop"], &["OK"]);
        labels.extend(&["Forcer l'arrêt"], &[]);

        assert_eq!(labels.force_stop.len(), before + 1);
        assert_eq!(labels.confirm.len(), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let labels: LabelSet = serde_json::from_str(r#"{"confirm":["Aceptar"]}"#).unwrap();
        assert_eq!(labels.confirm, vec!["Aceptar"]);
        assert!(!labels.force_stop.is_empty());
    }
}
