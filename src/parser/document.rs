//! Document model: ordered headings, each owning its sections.

use serde::Serialize;

/// A parsed markdown document.
///
/// Built once per load and never mutated afterwards; a reload produces a new
/// `Document` that replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub headings: Vec<Heading>,
}

/// A heading with the content that follows it up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Title text, possibly carrying style decorations.
    pub title: String,
    /// Heading depth (1 = `#`, 2 = `##`, ...).
    pub level: u8,
    pub sections: Vec<Section>,
}

/// One top-level block of content under a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Rendered text, always terminated by exactly one newline.
    pub text: String,
}

impl Document {
    pub fn new(headings: Vec<Heading>) -> Self {
        Self { headings }
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn heading(&self, index: usize) -> Option<&Heading> {
        self.headings.get(index)
    }

    pub fn section(&self, heading: usize, section: usize) -> Option<&Section> {
        self.heading(heading)?.sections.get(section)
    }
}

impl Section {
    /// Creates a section, normalizing the text to end with exactly one newline.
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        let trimmed = text.trim_end_matches(['\n', '\r', ' ', '\t']).len();
        text.truncate(trimmed);
        text.push('\n');
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_has_one_trailing_newline() {
        assert_eq!(Section::new("text").text, "text\n");
        assert_eq!(Section::new("text\n").text, "text\n");
        assert_eq!(Section::new("text\n\n  \n").text, "text\n");
        assert_eq!(Section::new("").text, "\n");
        assert_eq!(Section::new("a\n\nb").text, "a\n\nb\n");
    }

    #[test]
    fn test_lookup_out_of_range() {
        let doc = Document::new(vec![Heading {
            title: "Title".into(),
            level: 1,
            sections: vec![Section::new("body")],
        }]);

        assert_eq!(doc.len(), 1);
        assert!(doc.section(0, 0).is_some());
        assert!(doc.section(0, 1).is_none());
        assert!(doc.section(1, 0).is_none());
        assert!(doc.heading(7).is_none());
    }

    #[test]
    fn test_serializes_to_json() {
        let doc = Document::new(vec![Heading {
            title: "Intro".into(),
            level: 2,
            sections: vec![Section::new("Hello")],
        }]);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["headings"][0]["title"], "Intro");
        assert_eq!(json["headings"][0]["level"], 2);
        assert_eq!(json["headings"][0]["sections"][0]["text"], "Hello\n");
    }
}
