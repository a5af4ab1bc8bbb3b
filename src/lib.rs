//! # headway
//!
//! A terminal markdown reader library: resolve a document from a file, a URL
//! or a hosted repository, split it into headings and sections, and navigate
//! it in a two-pane terminal viewer.
//!
//! ## Example
//!
//! ```rust
//! use headway::parser::{parse_markdown, Transformer};
//!
//! let markdown = "# Introduction\nSome content here.\n\n## Background\nMore details.\n";
//!
//! let doc = parse_markdown(markdown, &Transformer::plain()).unwrap();
//! assert_eq!(doc.headings.len(), 2);
//! assert_eq!(doc.headings[1].title, "Background");
//! assert_eq!(doc.headings[1].sections[0].text, "More details.\n");
//! ```

/// Configuration file support.
///
/// Read-only settings for the viewer layout, network timeout, debug mode and
/// keybinding overrides.
pub mod config;

/// Loading errors.
pub mod error;

/// Keybindings module for customizable keyboard shortcuts.
///
/// Maps key events to navigation intents per focus mode, with overrides
/// from the configuration file.
pub mod keybindings;

/// Parser module for markdown documents.
///
/// Turns raw markdown into the heading/section [`Document`] the viewer
/// navigates.
pub mod parser;

/// Content source resolution for files, URLs and hosted repositories.
pub mod resolver;

/// Semantic styles and their terminal decoration.
pub mod style;

/// TUI module for the interactive viewer.
///
/// Provides the navigation state machine, the terminal canvas and the
/// session loop.
pub mod tui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use parser::{Document, Heading, Section, load_document, parse_markdown};
pub use tui::App;
