//! Keybinding configuration types and parsing.
//!
//! Keys reach the engine as [`Key`](crate::input::Key) values plus modifier
//! state; this module maps them to engine [`Action`]s.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Undo,
    ToggleVisibility,
}

/// A single keybinding: a key name with optional modifiers.
///
/// Key names are stored ASCII-lowercase, so bindings parsed from different
/// spellings of the same key hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Z" or "Backspace".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into empty trailing parts; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() {
            "+".to_string()
        } else {
            key.to_ascii_lowercase()
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Lookup table from parsed bindings to actions.
pub type ActionMap = HashMap<KeyBinding, Action>;

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo = ["Backspace", "Ctrl+Z"]
/// toggle_visibility = ["T"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_toggle_visibility")]
    pub toggle_visibility: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            toggle_visibility: default_toggle_visibility(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<ActionMap, String> {
        let mut map = HashMap::new();

        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding, action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        for binding_str in &self.undo {
            insert_binding(binding_str, Action::Undo)?;
        }

        for binding_str in &self.toggle_visibility {
            insert_binding(binding_str, Action::ToggleVisibility)?;
        }

        Ok(map)
    }
}

fn default_undo() -> Vec<String> {
    vec!["Backspace".to_string(), "Ctrl+Z".to_string()]
}

fn default_toggle_visibility() -> Vec<String> {
    vec!["T".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Backspace").unwrap();
        assert_eq!(binding.key, "backspace");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(binding.key, "z");
        assert!(binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_all_modifiers_any_order() {
        let binding = KeyBinding::parse("Alt+Shift+Ctrl+A").unwrap();
        assert_eq!(binding.key, "a");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(binding.alt);
    }

    #[test]
    fn test_parse_with_spaces() {
        let binding = KeyBinding::parse("Ctrl + Z").unwrap();
        assert_eq!(binding.key, "z");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_rejects_empty_and_modifier_only() {
        assert!(KeyBinding::parse("").is_err());
        assert!(KeyBinding::parse("   ").is_err());
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert!(binding.matches("Z", true, false, false));
        assert!(binding.matches("z", true, false, false));
        assert!(!binding.matches("z", false, false, false));
        assert!(!binding.matches("z", true, true, false));
        assert!(!binding.matches("y", true, false, false));
    }

    #[test]
    fn test_build_action_map() {
        let config = KeybindingsConfig::default();
        let map = config.build_action_map().unwrap();

        assert_eq!(map.len(), 3);
        let backspace = KeyBinding::parse("Backspace").unwrap();
        assert_eq!(map.get(&backspace), Some(&Action::Undo));
        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));
        let t = KeyBinding::parse("t").unwrap();
        assert_eq!(map.get(&t), Some(&Action::ToggleVisibility));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let config = KeybindingsConfig {
            undo: vec!["t".to_string()],
            toggle_visibility: vec!["T".to_string()],
        };
        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
    }

    #[test]
    fn test_parse_normalizes_key_case() {
        assert_eq!(
            KeyBinding::parse("Ctrl+Z").unwrap(),
            KeyBinding::parse("ctrl+z").unwrap()
        );
        assert_eq!(
            KeyBinding::parse("BACKSPACE").unwrap(),
            KeyBinding::parse("Backspace").unwrap()
        );
    }

    #[test]
    fn test_duplicate_detection_ignores_case_of_named_keys() {
        let config = KeybindingsConfig {
            undo: vec!["Backspace".to_string()],
            toggle_visibility: vec!["backspace".to_string()],
        };
        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));

        let config = KeybindingsConfig {
            undo: vec!["Ctrl+Z".to_string()],
            toggle_visibility: vec!["ctrl+z".to_string()],
        };
        assert!(config.build_action_map().is_err());
    }

    #[test]
    fn test_invalid_binding_propagates() {
        let config = KeybindingsConfig {
            undo: vec!["Ctrl+Alt".to_string()],
            ..KeybindingsConfig::default()
        };
        assert!(config.build_action_map().is_err());
    }
}
