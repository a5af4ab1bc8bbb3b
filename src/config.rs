use crate::keybindings::{Keybindings, KeybindingsConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// A config file that exists but does not parse.
#[derive(Debug, Error)]
#[error("ignoring invalid config {}: {source}", path.display())]
pub struct InvalidConfig {
    pub path: PathBuf,
    #[source]
    source: toml::de::Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    /// Verbose logging, node dumps and raw decorations in the content pane
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Table of contents width, in percent of the terminal
    #[serde(default = "default_outline_width")]
    pub outline_width: u16,

    /// Text shown in place of a collapsed section
    #[serde(default = "default_collapsed_placeholder")]
    pub collapsed_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            outline_width: default_outline_width(),
            collapsed_placeholder: default_collapsed_placeholder(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_outline_width() -> u16 {
    30
}

fn default_collapsed_placeholder() -> String {
    "...".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Get the XDG-style config file path (~/.config/headway/config.toml)
    /// This is preferred on macOS for CLI tools and cross-platform dotfiles
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("headway").join("config.toml"))
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/headway/config.toml
    /// - Linux: ~/.config/headway/config.toml
    /// - Windows: %APPDATA%/headway/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("headway").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    /// On macOS, checks ~/.config/headway first, then falls back to ~/Library/Application Support
    ///
    /// The error is returned rather than logged so the caller can report it
    /// once logging is set up.
    pub fn load() -> Result<Self, InvalidConfig> {
        #[cfg(target_os = "macos")]
        {
            if let Some(path) = Self::xdg_config_path() {
                if let Some(config) = Self::load_from(&path)? {
                    return Ok(config);
                }
            }
        }

        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => None,
        };
        Ok(config.unwrap_or_default())
    }

    /// Read and parse a config file. A missing or unreadable file yields
    /// `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, InvalidConfig> {
        let Ok(contents) = fs::read_to_string(path) else {
            return Ok(None);
        };
        Self::parse(&contents).map(Some).map_err(|source| InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::{Action, KeybindingMode};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.outline_width, 30);
        assert_eq!(config.ui.collapsed_placeholder, "...");
        assert_eq!(config.network.timeout(), Duration::from_secs(30));
        assert!(!config.debug);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.ui.outline_width, 30);
        assert_eq!(config.network.timeout_secs, 30);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            debug = true

            [ui]
            outline_width = 40
            collapsed_placeholder = "[collapsed]"

            [network]
            timeout_secs = 5

            [keybindings.Content]
            "x" = "Copy"
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.ui.outline_width, 40);
        assert_eq!(config.ui.collapsed_placeholder, "[collapsed]");
        assert_eq!(config.network.timeout(), Duration::from_secs(5));

        let kb = config.keybindings();
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(kb.dispatch(KeybindingMode::Content, &x), Some(Action::Copy));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::parse("[ui]\noutline_width = 25\n").unwrap();
        assert_eq!(config.ui.outline_width, 25);
        assert_eq!(config.ui.collapsed_placeholder, "...");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(Config::load_from(&path).unwrap().is_none());

        fs::write(&path, "[network]\ntimeout_secs = 7\n").unwrap();
        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.network.timeout_secs, 7);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().starts_with("ignoring invalid config"));
    }
}
