//! Layout arithmetic shared by the panes and popups.

use ratatui::layout::Rect;
use ratatui::text::Line;

/// A rectangle centered in `area`, sized as a percentage of it in each
/// direction but never smaller than `min_width` x `min_height` unless the
/// parent itself is.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16, min_width: u16, min_height: u16) -> Rect {
    let scale = |total: u16, percent: u16| (u32::from(total) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x).max(min_width).min(area.width);
    let height = scale(area.height, percent_y).max(min_height).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rows a line occupies when wrapped to `width` columns.
///
/// Approximates word wrapping by display width; an empty line still takes
/// one row.
pub fn wrapped_height(line: &Line, width: u16) -> usize {
    if width == 0 {
        return 1;
    }
    line.width().div_ceil(usize::from(width)).max(1)
}

/// Total wrapped height of `lines`, saturated to a scroll offset.
pub fn scroll_offset<'a, 'l: 'a>(lines: impl IntoIterator<Item = &'a Line<'l>>, width: u16) -> u16 {
    let rows: usize = lines.into_iter().map(|l| wrapped_height(l, width)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_respects_minimum() {
        let parent = Rect::new(0, 0, 100, 40);
        let popup = popup_area(parent, 10, 10, 30, 5);
        assert_eq!(popup, Rect::new(35, 17, 30, 5));
    }

    #[test]
    fn test_popup_never_exceeds_parent() {
        let parent = Rect::new(2, 3, 20, 4);
        let popup = popup_area(parent, 50, 50, 30, 5);
        assert_eq!(popup, parent);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height(&Line::from(""), 10), 1);
        assert_eq!(wrapped_height(&Line::from("0123456789"), 10), 1);
        assert_eq!(wrapped_height(&Line::from("0123456789a"), 10), 2);
        // Wide characters count double
        assert_eq!(wrapped_height(&Line::from("日本語"), 4), 2);
        assert_eq!(wrapped_height(&Line::from("abc"), 0), 1);
    }

    #[test]
    fn test_scroll_offset() {
        let lines = vec![Line::from("short"), Line::from(""), Line::from("x".repeat(25))];
        assert_eq!(scroll_offset(&lines, 10), 5);
        assert_eq!(scroll_offset(&[], 10), 0);
    }
}
