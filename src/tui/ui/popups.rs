//! Modal overlays

use crate::tui::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::util::popup_area;

/// Shown until the first document arrives.
pub fn render_loading_popup(frame: &mut Frame, app: &App, area: Rect) {
    // Min 30 cols for the locator, 5 rows for border, text and padding
    let area = popup_area(area, 50, 20, 30, 5);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Loading",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.locator.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(paragraph, area);
}
