//! Dynamic layout builder
//!
//! Maps named areas to rects so rendering code can look panes up by id and
//! optional panes can be dropped without recomputing indices.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// Area identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Body,
    Hints,
    Outline,
    Content,
}

/// A dynamic layout that maps section IDs to their rendered areas
pub struct DynamicLayout {
    areas: HashMap<Section, Rect>,
}

impl DynamicLayout {
    /// Start building a vertical layout
    pub fn vertical(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Vertical)
    }

    /// Start building a horizontal layout
    pub fn horizontal(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Horizontal)
    }

    /// Get the area for a section by ID
    pub fn get(&self, id: Section) -> Option<Rect> {
        self.areas.get(&id).copied()
    }
}

/// Builder for creating dynamic layouts
pub struct DynamicLayoutBuilder {
    area: Rect,
    direction: Direction,
    sections: Vec<(Section, Constraint, bool)>,
}

impl DynamicLayoutBuilder {
    fn new(area: Rect, direction: Direction) -> Self {
        Self {
            area,
            direction,
            sections: Vec::new(),
        }
    }

    /// Add a section that is always visible
    pub fn section(self, id: Section, constraint: Constraint) -> Self {
        self.section_if(true, id, constraint)
    }

    /// Add a section that is conditionally visible
    pub fn section_if(mut self, visible: bool, id: Section, constraint: Constraint) -> Self {
        self.sections.push((id, constraint, visible));
        self
    }

    pub fn build(self) -> DynamicLayout {
        let visible: Vec<_> = self.sections.into_iter().filter(|s| s.2).collect();

        let chunks = Layout::default()
            .direction(self.direction)
            .constraints(visible.iter().map(|s| s.1))
            .split(self.area);

        let areas = visible
            .iter()
            .zip(chunks.iter())
            .map(|(section, rect)| (section.0, *rect))
            .collect();

        DynamicLayout { areas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_split() {
        let layout = DynamicLayout::vertical(Rect::new(0, 0, 100, 50))
            .section(Section::Body, Constraint::Min(0))
            .section(Section::Hints, Constraint::Length(1))
            .build();

        assert_eq!(layout.get(Section::Body), Some(Rect::new(0, 0, 100, 49)));
        assert_eq!(layout.get(Section::Hints), Some(Rect::new(0, 49, 100, 1)));
        assert!(layout.get(Section::Outline).is_none());
    }

    #[test]
    fn test_horizontal_split() {
        let layout = DynamicLayout::horizontal(Rect::new(0, 0, 100, 10))
            .section(Section::Outline, Constraint::Percentage(30))
            .section(Section::Content, Constraint::Percentage(70))
            .build();

        assert_eq!(layout.get(Section::Outline).map(|r| r.width), Some(30));
        assert_eq!(layout.get(Section::Content).map(|r| r.x), Some(30));
    }

    #[test]
    fn test_hidden_section() {
        let layout = DynamicLayout::horizontal(Rect::new(0, 0, 100, 10))
            .section_if(false, Section::Outline, Constraint::Percentage(30))
            .section(Section::Content, Constraint::Min(0))
            .build();

        assert!(layout.get(Section::Outline).is_none());
        assert_eq!(layout.get(Section::Content).map(|r| r.width), Some(100));
    }
}
