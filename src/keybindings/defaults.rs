//! Default keybindings
//!
//! Used when no user configuration is provided. Keys use the same string
//! syntax as the config file.

use super::{Action, KeybindingMode, Keybindings};

/// Create the default keybindings configuration
pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::new();

    add_toc_mode(&mut kb);
    add_content_mode(&mut kb);

    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

fn add_toc_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::TableOfContents as Toc;

    bind(kb, Toc, "Esc", Exit);
    bind(kb, Toc, "q", Exit);
    bind(kb, Toc, "Ctrl+c", Exit);
    bind(kb, Toc, "Up", MoveUp);
    bind(kb, Toc, "k", MoveUp);
    bind(kb, Toc, "Down", MoveDown);
    bind(kb, Toc, "j", MoveDown);
    bind(kb, Toc, "Right", Select);
    bind(kb, Toc, "Enter", Select);
    bind(kb, Toc, "l", Select);
}

fn add_content_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Content;

    bind(kb, Content, "Left", Back);
    bind(kb, Content, "Esc", Back);
    bind(kb, Content, "h", Back);
    bind(kb, Content, "Up", MoveUp);
    bind(kb, Content, "k", MoveUp);
    bind(kb, Content, "Down", MoveDown);
    bind(kb, Content, "j", MoveDown);
    bind(kb, Content, "Space", ToggleCollapse);
    bind(kb, Content, "c", Copy);
    bind(kb, Content, "y", Copy);
    bind(kb, Content, "q", Exit);
    bind(kb, Content, "Ctrl+c", Exit);
}
