//! Customizable keybindings
//!
//! # Architecture
//!
//! - [`Action`] - All bindable actions in the application
//! - [`KeybindingMode`] - Focus modes with their own keybinding sets
//! - [`Keybindings`] - The complete keybinding table
//!
//! # Configuration
//!
//! Keybindings are configured in TOML format, organized by mode:
//!
//! ```toml
//! [keybindings.TableOfContents]
//! "o" = "Select"
//!
//! [keybindings.Content]
//! "x" = "Copy"
//! "Ctrl+d" = "MoveDown"
//! ```

mod action;
mod defaults;

pub use action::Action;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Focus modes that have their own keybinding sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum KeybindingMode {
    /// Heading list has focus
    TableOfContents,
    /// Section list of the selected heading has focus
    Content,
}

impl KeybindingMode {
    /// Get a display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            KeybindingMode::TableOfContents => "Table of Contents",
            KeybindingMode::Content => "Content",
        }
    }
}

/// A single key with modifiers, parsed from strings like `"j"`, `"Enter"`
/// or `"Ctrl+c"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Whether `event` triggers this binding. Shift is ignored for
    /// character keys, since the character already carries the case.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && self.modifiers == modifiers
    }
}

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').collect();
        // "+" on its own, or "Ctrl++"
        if s.ends_with("++") || s == "+" {
            parts.pop();
            parts.pop();
            parts.push("+");
        }
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or("empty key")?;

        let mut modifiers = KeyModifiers::NONE;
        for modifier in parts {
            modifiers |= match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "c" => KeyModifiers::CONTROL,
                "alt" | "a" => KeyModifiers::ALT,
                "shift" | "s" => KeyModifiers::SHIFT,
                other => return Err(format!("unknown modifier '{other}'")),
            };
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => match key.to_ascii_lowercase().as_str() {
                "enter" | "return" | "ret" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "space" | "spc" => KeyCode::Char(' '),
                "tab" => KeyCode::Tab,
                "backspace" | "bs" => KeyCode::Backspace,
                "delete" | "del" => KeyCode::Delete,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "pageup" => KeyCode::PageUp,
                "pagedown" => KeyCode::PageDown,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                other => return Err(format!("unknown key '{other}'")),
            },
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("C-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Spc"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => f.write_str("Ret"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Backspace => f.write_str("BS"),
            KeyCode::Delete => f.write_str("Del"),
            KeyCode::Up => f.write_str("↑"),
            KeyCode::Down => f.write_str("↓"),
            KeyCode::Left => f.write_str("←"),
            KeyCode::Right => f.write_str("→"),
            KeyCode::PageUp => f.write_str("PgU"),
            KeyCode::PageDown => f.write_str("PgD"),
            KeyCode::Home => f.write_str("Home"),
            KeyCode::End => f.write_str("End"),
            _ => f.write_str("?"),
        }
    }
}

/// Complete keybinding configuration, organized by mode.
#[derive(Debug, Clone)]
pub struct Keybindings {
    /// Bindings per mode, in binding order
    bindings: HashMap<KeybindingMode, Vec<(KeyBinding, Action)>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        defaults::default_keybindings()
    }
}

impl Keybindings {
    /// Create empty keybindings
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Get the action for a key event in a specific mode
    pub fn dispatch(&self, mode: KeybindingMode, event: &KeyEvent) -> Option<Action> {
        self.bindings
            .get(&mode)?
            .iter()
            .find(|(key, _)| key.matches(event))
            .map(|(_, action)| *action)
    }

    /// Bind a key to an action in a mode, replacing any existing binding
    /// for the same key.
    pub fn bind(&mut self, mode: KeybindingMode, key: &str, action: Action) -> Result<(), String> {
        let key: KeyBinding = key.parse()?;
        let bindings = self.bindings.entry(mode).or_default();
        match bindings.iter_mut().find(|(existing, _)| *existing == key) {
            Some(binding) => binding.1 = action,
            None => bindings.push((key, action)),
        }
        Ok(())
    }

    /// Get all keys bound to an action in a mode
    pub fn keys_for_action(&self, mode: KeybindingMode, action: Action) -> Vec<String> {
        self.bindings
            .get(&mode)
            .map(|bindings| {
                bindings
                    .iter()
                    .filter(|(_, a)| *a == action)
                    .map(|(key, _)| key.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Key-hint entries for a mode: `(keys, label)` pairs in action order.
    ///
    /// Only the first key of each action is shown; actions sharing a label
    /// (up and down both read "Move") are merged into one entry.
    pub fn hints(&self, mode: KeybindingMode) -> Vec<(String, &'static str)> {
        let mut hints: Vec<(String, &'static str)> = Vec::new();
        for action in Action::iter() {
            let Some(key) = self.keys_for_action(mode, action).into_iter().next() else {
                continue;
            };
            match hints.last_mut() {
                Some((keys, label)) if *label == action.label() => {
                    keys.push('/');
                    keys.push_str(&key);
                }
                _ => hints.push((key, action.label())),
            }
        }
        hints
    }

    /// Merge user overrides into this table (overrides take precedence)
    ///
    /// Every valid override is applied; one message is returned per key
    /// that does not parse.
    pub fn merge(&mut self, other: &KeybindingsConfig) -> Vec<String> {
        let mut errors = Vec::new();
        for (mode, mode_bindings) in &other.0 {
            for (key_str, action) in mode_bindings {
                if let Err(e) = self.bind(*mode, key_str, *action) {
                    errors.push(format!("Invalid key '{}' in {:?}: {}", key_str, mode, e));
                }
            }
        }
        errors
    }
}

/// Configuration format for keybindings (uses string keys for TOML compatibility)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeybindingsConfig(pub HashMap<KeybindingMode, HashMap<String, Action>>);

impl KeybindingsConfig {
    /// Convert to Keybindings, using defaults for any missing bindings
    pub fn to_keybindings(&self) -> Keybindings {
        let mut keybindings = Keybindings::default();

        for e in keybindings.merge(self) {
            log::warn!("ignoring keybinding override: {e}");
        }

        keybindings
    }

    /// Check if the config is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
