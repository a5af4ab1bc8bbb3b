use crate::config::Config;
use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::parser::Document;
use crate::style::strip_styles;
use crate::tui::content::ContentState;
use std::fmt::Display;

/// Which pane receives navigation intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    TableOfContents,
    Content,
}

impl FocusMode {
    pub fn keybinding_mode(self) -> KeybindingMode {
        match self {
            FocusMode::TableOfContents => KeybindingMode::TableOfContents,
            FocusMode::Content => KeybindingMode::Content,
        }
    }
}

/// Destination for copied section text.
pub trait Clipboard {
    fn write_all(&mut self, text: &str) -> Result<(), String>;
}

/// OS clipboard through `arboard`.
pub struct SystemClipboard {
    // On Linux, the clipboard instance must stay alive to serve paste requests
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            clipboard: arboard::Clipboard::new().ok(),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn write_all(&mut self, text: &str) -> Result<(), String> {
        match &mut self.clipboard {
            Some(clipboard) => clipboard.set_text(text).map_err(|e| e.to_string()),
            None => Err("clipboard not available".to_string()),
        }
    }
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Title indented by one space per level below 1
    pub title: String,
    /// Top-level headings (levels 1 and 2) are emphasised
    pub emphasized: bool,
}

/// Navigation state machine over a loaded [`Document`].
///
/// Until a document arrives every intent except [`Action::Exit`] is
/// ignored. Afterwards all transitions are total: out-of-range moves are
/// clamped or wrapped, never errors.
pub struct App {
    pub locator: String,
    document: Option<Document>,
    focus: FocusMode,
    selected_heading: usize,
    selected_section: usize,
    content: ContentState,
    placeholder: String,
    pub outline_width: u16,
    pub debug: bool,
    pub status_message: Option<String>,
    keybindings: Keybindings,
    clipboard: Box<dyn Clipboard>,
    exit: bool,
}

impl App {
    pub fn new(locator: impl Into<String>, config: &Config, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            locator: locator.into(),
            document: None,
            focus: FocusMode::TableOfContents,
            selected_heading: 0,
            selected_section: 0,
            content: ContentState::default(),
            placeholder: config.ui.collapsed_placeholder.clone(),
            outline_width: config.ui.outline_width.clamp(10, 90),
            debug: config.debug,
            status_message: None,
            keybindings: config.keybindings(),
            clipboard,
            exit: false,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.document.is_none()
    }

    pub fn focus(&self) -> FocusMode {
        self.focus
    }

    pub fn selected_heading(&self) -> usize {
        self.selected_heading
    }

    pub fn selected_section(&self) -> usize {
        self.selected_section
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Install a freshly loaded document, replacing any previous one.
    ///
    /// The first document starts in the table of contents at heading 0. A
    /// reload keeps the selection where it still fits and drops all
    /// collapse state.
    pub fn set_document(&mut self, document: Document) {
        self.content = ContentState::new(&document);

        if self.document.is_none() {
            self.focus = FocusMode::TableOfContents;
            self.selected_heading = 0;
            self.selected_section = 0;
        } else {
            self.selected_heading = self
                .selected_heading
                .min(document.len().saturating_sub(1));
            let sections = document
                .heading(self.selected_heading)
                .map_or(0, |h| h.sections.len());
            self.selected_section = self.selected_section.min(sections.saturating_sub(1));
            if document.is_empty() {
                self.focus = FocusMode::TableOfContents;
            }
            self.status_message = Some("↻ Document reloaded".to_string());
        }

        self.document = Some(document);
    }

    /// Record a failed reload; the current document stays in place.
    pub fn reload_failed(&mut self, error: impl Display) {
        self.status_message = Some(format!("✗ Reload failed: {error}"));
    }

    pub fn apply(&mut self, action: Action) {
        if action == Action::Exit {
            self.exit = true;
            return;
        }
        if self.document.is_none() {
            return;
        }

        self.status_message = None;
        match (self.focus, action) {
            (FocusMode::TableOfContents, Action::Select) => self.select(),
            (FocusMode::TableOfContents, Action::MoveUp) => {
                self.selected_heading = self.selected_heading.saturating_sub(1);
            }
            (FocusMode::TableOfContents, Action::MoveDown) => {
                if self.selected_heading + 1 < self.heading_count() {
                    self.selected_heading += 1;
                }
            }
            (FocusMode::Content, Action::Back) => self.focus = FocusMode::TableOfContents,
            (FocusMode::Content, Action::MoveUp) => {
                let count = self.section_count();
                if count > 0 {
                    self.selected_section = (self.selected_section + count - 1) % count;
                }
            }
            (FocusMode::Content, Action::MoveDown) => {
                let count = self.section_count();
                if count > 0 {
                    self.selected_section = (self.selected_section + 1) % count;
                }
            }
            (FocusMode::Content, Action::ToggleCollapse) => {
                self.content
                    .toggle(self.selected_heading, self.selected_section, &self.placeholder);
            }
            (FocusMode::Content, Action::Copy) => self.copy_section(),
            _ => {}
        }
    }

    fn select(&mut self) {
        self.focus = FocusMode::Content;
        self.selected_section = 0;
    }

    fn copy_section(&mut self) {
        let Some(section) = self
            .document
            .as_ref()
            .and_then(|doc| doc.section(self.selected_heading, self.selected_section))
        else {
            return;
        };

        let text = strip_styles(&section.text);
        self.status_message = Some(match self.clipboard.write_all(&text) {
            Ok(()) => "✓ Section copied to clipboard".to_string(),
            Err(e) => format!("✗ Clipboard error: {e}"),
        });
    }

    fn heading_count(&self) -> usize {
        self.document.as_ref().map_or(0, Document::len)
    }

    fn section_count(&self) -> usize {
        self.document
            .as_ref()
            .and_then(|doc| doc.heading(self.selected_heading))
            .map_or(0, |h| h.sections.len())
    }

    pub fn toc_entries(&self) -> Vec<TocEntry> {
        self.document
            .iter()
            .flat_map(|doc| doc.headings.iter())
            .map(|heading| TocEntry {
                title: format!(
                    "{}{}",
                    " ".repeat(usize::from(heading.level.saturating_sub(1))),
                    heading.title
                ),
                emphasized: heading.level <= 2,
            })
            .collect()
    }

    /// Text of one section as it should be displayed, collapse applied.
    pub fn rendered_section(&self, heading: usize, section: usize) -> Option<&str> {
        let text = &self.document.as_ref()?.section(heading, section)?.text;
        Some(self.content.get(heading, section).unwrap_or(text))
    }

    /// Displayed texts of every section under the selected heading.
    pub fn section_texts(&self) -> Vec<&str> {
        (0..self.section_count())
            .filter_map(|s| self.rendered_section(self.selected_heading, s))
            .collect()
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.document
            .as_ref()?
            .heading(self.selected_heading)
            .map(|h| h.title.as_str())
    }

    /// Key hints for the focused pane.
    pub fn hints(&self) -> Vec<(String, &'static str)> {
        self.keybindings.hints(self.focus.keybinding_mode())
    }
}
