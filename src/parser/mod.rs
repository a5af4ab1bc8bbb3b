//! Markdown parsing and document structure extraction.
//!
//! Parsing happens in two steps: the source is tokenized into a
//! [`NodeTree`] arena, then a [`Transformer`] walks the arena and produces
//! the heading/section [`Document`] the viewer navigates.

mod document;
pub mod transform;
pub mod tree;

pub use document::{Document, Heading, Section};
pub use transform::Transformer;
pub use tree::{NodeId, NodeKind, NodeTree};

use crate::error::Result;
use crate::resolver::Resolver;
use std::time::Instant;

/// Parse raw markdown bytes into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::ParseFailed`](crate::Error::ParseFailed) if the content
/// is not valid UTF-8.
pub fn parse_markdown(content: impl Into<Vec<u8>>, transformer: &Transformer) -> Result<Document> {
    let source = String::from_utf8(content.into())?;
    let source = if source.contains('\r') {
        source.replace("\r\n", "\n")
    } else {
        source
    };
    Ok(transformer.transform(&NodeTree::parse(&source)))
}

/// Resolve `locator` and parse the result.
pub fn load_document(locator: &str, resolver: &dyn Resolver, transformer: &Transformer) -> Result<Document> {
    let started = Instant::now();
    let content = resolver.resolve(locator)?;
    let document = parse_markdown(content, transformer)?;
    log::info!(
        "loaded {locator}: {} headings in {:?}",
        document.len(),
        started.elapsed()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct StaticResolver(std::result::Result<&'static [u8], ()>);

    impl Resolver for StaticResolver {
        fn resolve(&self, _locator: &str) -> Result<Vec<u8>> {
            self.0.map(|b| b.to_vec()).map_err(|_| Error::NotApplicable)
        }
    }

    #[test]
    fn test_parse_headings() {
        let md = r#"# Title
Some content

## Section 1
More content

### Subsection
Details

## Section 2
End"#;

        let doc = parse_markdown(md, &Transformer::plain()).unwrap();
        assert_eq!(doc.headings.len(), 4);
        assert_eq!(doc.headings[0].level, 1);
        assert_eq!(doc.headings[0].title, "Title");
        assert_eq!(doc.headings[1].level, 2);
        assert_eq!(doc.headings[1].title, "Section 1");
        assert_eq!(doc.headings[2].level, 3);
        assert_eq!(doc.headings[3].sections[0].text, "End\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse_markdown("# Title\r\nline one\r\nline two\r\n", &Transformer::plain()).unwrap();
        assert_eq!(doc.headings[0].title, "Title");
        assert_eq!(doc.headings[0].sections[0].text, "line one\nline two\n");
    }

    #[test]
    fn test_invalid_utf8_is_parse_failure() {
        let err = parse_markdown(vec![b'#', b' ', 0xff, 0xfe], &Transformer::plain()).unwrap_err();
        assert!(matches!(err, Error::ParseFailed(_)));
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_markdown("", &Transformer::plain()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_load_document() {
        let resolver = StaticResolver(Ok(b"# Loaded\nbody\n"));
        let doc = load_document("anything", &resolver, &Transformer::plain()).unwrap();
        assert_eq!(doc.headings[0].title, "Loaded");
    }

    #[test]
    fn test_load_document_propagates_resolver_error() {
        let resolver = StaticResolver(Err(()));
        let err = load_document("anything", &resolver, &Transformer::plain()).unwrap_err();
        assert!(matches!(err, Error::NotApplicable));
    }
}
