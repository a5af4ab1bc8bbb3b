//! Action definitions for keybindings
//!
//! This module defines every intent the viewer reacts to.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    /// Open the selected heading's content
    Select,
    /// Move the selection up
    MoveUp,
    /// Move the selection down
    MoveDown,
    /// Return to the table of contents
    Back,
    /// Collapse or expand the selected section
    ToggleCollapse,
    /// Copy the selected section to the clipboard
    Copy,
    /// Quit the application
    Exit,
}

impl Action {
    /// Short label shown in the key-hint bar
    pub fn label(&self) -> &'static str {
        match self {
            Action::Select => "Select",
            Action::MoveUp | Action::MoveDown => "Move",
            Action::Back => "Go Back",
            Action::ToggleCollapse => "Collapse",
            Action::Copy => "Copy",
            Action::Exit => "Exit",
        }
    }
}
