//! Semantic text styles and their terminal decoration.
//!
//! The transformer tags fragments with a [`Style`]; a [`Styler`] turns the
//! tag into decorated text. [`AnsiStyler`] emits SGR escape sequences so the
//! same strings can be printed directly or fed to the TUI through
//! [`to_text`]. [`strip_styles`] recovers the undecorated text.

use ansi_to_tui::IntoText;
use crossterm::style::{Attribute, Attributes, Color, ContentStyle, Stylize};
use ratatui::style::Modifier;
use ratatui::text::Text;
use strum::{Display, EnumIter};

/// Semantic style tag attached to a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum Style {
    #[default]
    Normal,
    Bold,
    Italic,
    Underline,
    BlockQuote,
    Code,
    CodeBlock,
    Image,
    Link,
    Unknown,
}

/// Presentation of a [`Style`]: colors, text attributes and a left indent
/// applied to every non-empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoration {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub attributes: Attributes,
    pub indent: usize,
}

impl Decoration {
    const fn new() -> Self {
        Self {
            foreground: None,
            background: None,
            attributes: Attributes::none(),
            indent: 0,
        }
    }

    const fn fg(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    const fn with(mut self, attribute: Attribute) -> Self {
        self.attributes = self.attributes.with(attribute);
        self
    }

    const fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::new()
    }

    fn content_style(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: self.foreground,
            background_color: self.background,
            underline_color: None,
            attributes: self.attributes,
        }
    }
}

impl Style {
    pub const fn decoration(self) -> Decoration {
        let plain = Decoration::new();
        match self {
            Style::Normal => plain,
            Style::Bold => plain.with(Attribute::Bold),
            Style::Italic => plain.with(Attribute::Italic),
            Style::Underline => plain.with(Attribute::Underlined),
            Style::BlockQuote => plain.with(Attribute::Italic).indent(3),
            Style::Code => plain.fg(Color::Magenta).with(Attribute::Bold),
            Style::CodeBlock => plain.fg(Color::Magenta).indent(3),
            Style::Image => plain
                .fg(Color::Rgb { r: 0x93, g: 0x31, b: 0xee })
                .with(Attribute::Bold)
                .with(Attribute::Underlined),
            Style::Link => plain
                .fg(Color::Green)
                .with(Attribute::Bold)
                .with(Attribute::Underlined),
            Style::Unknown => plain.fg(Color::Red),
        }
    }
}

/// Turns a semantic tag into decorated text.
pub trait Styler: Send + Sync {
    fn style(&self, text: &str, tag: Style) -> String;
}

/// Decorates text with ANSI SGR sequences.
///
/// Each line is styled on its own so that line count and the trailing
/// newline shape of the input are preserved. Indentation is emitted as
/// concealed spaces (SGR 8), which lets [`strip_styles`] drop it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn style(&self, text: &str, tag: Style) -> String {
        let decoration = tag.decoration();
        if decoration.is_plain() {
            return text.to_string();
        }

        let style = decoration.content_style();
        let indent = " ".repeat(decoration.indent);
        text.split('\n')
            .map(|line| {
                if line.is_empty() {
                    return String::new();
                }
                let mut styled = String::new();
                if !indent.is_empty() {
                    styled.push_str(&indent.as_str().attribute(Attribute::Hidden).to_string());
                }
                styled.push_str(&style.apply(line).to_string());
                styled
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Leaves text untouched. Used for plain-text and JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopStyler;

impl Styler for NopStyler {
    fn style(&self, text: &str, _tag: Style) -> String {
        text.to_string()
    }
}

/// Visible text of a decorated string: escape sequences and concealed
/// indentation removed, line structure kept.
pub fn strip_styles(text: &str) -> String {
    text.split('\n')
        .map(|line| match line.into_text() {
            Ok(parsed) => parsed
                .lines
                .iter()
                .flat_map(|l| l.spans.iter())
                .filter(|span| !span.style.add_modifier.contains(Modifier::HIDDEN))
                .map(|span| span.content.as_ref())
                .collect::<String>(),
            Err(_) => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Converts a decorated string into ratatui text for the canvas.
pub fn to_text(text: &str) -> Text<'static> {
    text.into_text()
        .unwrap_or_else(|_| Text::raw(text.to_string()))
}

/// Makes escape bytes visible, for inspecting raw decorations.
pub fn reveal_escapes(text: &str) -> String {
    text.replace('\x1b', "^[")
}
