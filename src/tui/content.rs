//! Per-section display overrides.

use crate::parser::Document;
use std::collections::HashMap;

/// Sparse map from `(heading, section)` to replacement text.
///
/// An absent entry means the section renders its own text. The state knows
/// the shape of the document it was built for; writes to indices outside
/// that shape are ignored.
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    /// Section count of each heading
    shape: Vec<usize>,
    overrides: HashMap<(usize, usize), String>,
}

impl ContentState {
    pub fn new(document: &Document) -> Self {
        Self {
            shape: document.headings.iter().map(|h| h.sections.len()).collect(),
            overrides: HashMap::new(),
        }
    }

    fn in_range(&self, heading: usize, section: usize) -> bool {
        self.shape.get(heading).is_some_and(|&count| section < count)
    }

    pub fn get(&self, heading: usize, section: usize) -> Option<&str> {
        self.overrides.get(&(heading, section)).map(String::as_str)
    }

    pub fn set(&mut self, heading: usize, section: usize, text: impl Into<String>) {
        if self.in_range(heading, section) {
            self.overrides.insert((heading, section), text.into());
        }
    }

    pub fn clear(&mut self, heading: usize, section: usize) {
        self.overrides.remove(&(heading, section));
    }

    /// Flips a section between its own text and `placeholder`.
    pub fn toggle(&mut self, heading: usize, section: usize, placeholder: &str) {
        if self.get(heading, section).is_some() {
            self.clear(heading, section);
        } else {
            self.set(heading, section, placeholder);
        }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
