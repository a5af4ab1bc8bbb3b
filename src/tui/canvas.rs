//! Drawing surface and input source for the viewer loop.

use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::tui::app::App;
use crate::tui::ui;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Where the viewer draws itself and where navigation intents come from.
pub trait Canvas {
    fn draw(&mut self, app: &App) -> Result<()>;

    /// Wait up to `timeout` for the next intent. `None` means nothing
    /// actionable happened.
    fn next_intent(&mut self, mode: KeybindingMode, timeout: Duration) -> Result<Option<Action>>;
}

/// Canvas backed by the real terminal.
pub struct TerminalCanvas {
    terminal: DefaultTerminal,
    keybindings: Keybindings,
}

impl TerminalCanvas {
    pub fn new(terminal: DefaultTerminal, keybindings: Keybindings) -> Self {
        Self {
            terminal,
            keybindings,
        }
    }
}

impl Canvas for TerminalCanvas {
    fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn next_intent(&mut self, mode: KeybindingMode, timeout: Duration) -> Result<Option<Action>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            // Release and repeat events are reported on some platforms
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.keybindings.dispatch(mode, &key);
                log::trace!("{:?} in {} -> {action:?}", key.code, mode.display_name());
                Ok(action)
            }
            _ => Ok(None),
        }
    }
}
