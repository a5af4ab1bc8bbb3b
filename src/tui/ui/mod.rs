mod layout;
mod popups;
mod util;

use layout::{DynamicLayout, Section};

use crate::style::{reveal_escapes, strip_styles, to_text};
use crate::tui::app::{App, FocusMode};
use popups::render_loading_popup;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

/// Marks the lines of the selected section in the content pane
const GUTTER: &str = "▌ ";
const NO_GUTTER: &str = "  ";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = DynamicLayout::vertical(area)
        .section(Section::Body, Constraint::Min(0))
        .section(Section::Hints, Constraint::Length(1))
        .build();

    if let Some(body) = main_layout.get(Section::Body) {
        let outline_width = app.outline_width.min(100);
        let panes = DynamicLayout::horizontal(body)
            .section(Section::Outline, Constraint::Percentage(outline_width))
            .section(Section::Content, Constraint::Percentage(100 - outline_width))
            .build();

        if let Some(outline) = panes.get(Section::Outline) {
            render_outline(frame, app, outline);
        }
        if let Some(content) = panes.get(Section::Content) {
            render_content(frame, app, content);
        }
    }

    if let Some(hints) = main_layout.get(Section::Hints) {
        render_hint_bar(frame, app, hints);
    }

    if app.is_loading() {
        render_loading_popup(frame, app, area);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_outline(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .toc_entries()
        .into_iter()
        .map(|entry| {
            let style = if entry.emphasized {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            // Inline decorations in the title win over the outline style
            let title = to_text(&entry.title).lines.into_iter().next().unwrap_or_default();
            ListItem::new(title.patch_style(style))
        })
        .collect();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.selected_heading()));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.focus() == FocusMode::TableOfContents))
                .title(" Contents "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut state);
}

/// Lines of every section under the selected heading, separated by a blank
/// line, plus the index of the first line of the selected section.
fn content_lines(app: &App) -> (Vec<Line<'static>>, usize) {
    let focused = app.focus() == FocusMode::Content;
    let mut lines = Vec::new();
    let mut selected_start = 0;

    for (i, text) in app.section_texts().into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let selected = focused && i == app.selected_section();
        if selected {
            selected_start = lines.len();
        }
        let gutter = if selected {
            Span::styled(GUTTER, Style::default().fg(Color::Yellow))
        } else {
            Span::raw(NO_GUTTER)
        };

        for raw in text.trim_end_matches('\n').split('\n') {
            let mut spans = vec![gutter.clone()];
            spans.extend(section_line(raw, app.debug));
            lines.push(Line::from(spans));
        }
    }

    (lines, selected_start)
}

fn section_line(raw: &str, debug: bool) -> Vec<Span<'static>> {
    if debug {
        return vec![Span::raw(reveal_escapes(raw))];
    }
    to_text(raw)
        .lines
        .into_iter()
        .next()
        .map(|line| line.spans)
        .unwrap_or_default()
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let (lines, selected_start) = content_lines(app);

    // Keep the selected section at the top of the pane
    let inner_width = area.width.saturating_sub(2);
    let scroll = util::scroll_offset(&lines[..selected_start], inner_width);

    let debug_indicator = if app.debug { "[DEBUG] " } else { "" };
    let title = match app.selected_title() {
        Some(heading) => format!(" {debug_indicator}{} ", strip_styles(heading)),
        None => format!(" {debug_indicator}Content "),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.focus() == FocusMode::Content))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_hint_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bar_style = Style::default().bg(Color::Rgb(30, 30, 40)).fg(Color::Gray);
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let status = app.status_message.as_deref().map(|msg| {
        Line::from(Span::styled(
            format!("{msg} "),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    });
    let status_width = status
        .as_ref()
        .map_or(0, |line| u16::try_from(line.width()).unwrap_or(u16::MAX));
    let [hints_area, status_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area);

    let mut spans = vec![Span::raw(" ")];
    for (keys, label) in app.hints() {
        spans.push(Span::styled(keys, key_style));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), hints_area);

    if let Some(status) = status {
        frame.render_widget(Paragraph::new(status).style(bar_style), status_area);
    }
}
