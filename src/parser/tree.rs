//! Index-addressed node arena built from the `pulldown-cmark` event stream.
//!
//! The tokenizer emits a flat stream of start/end events; the transformer
//! wants a tree it can walk with parent, child and sibling links. Nodes live
//! in a single `Vec` and refer to each other by [`NodeId`], so the tree has
//! no reference cycles and no lifetimes tied to the source text.

use pulldown_cmark::{Event, Options, Parser, Tag};
use std::ops::Range;

/// Index of a node inside a [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Node types the transformer understands.
///
/// Anything else the tokenizer produces is kept as [`NodeKind::Unknown`]
/// with the construct's name, so it can still be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    Text,
    Code,
    CodeBlock,
    BlockQuote,
    Emphasis,
    Strong,
    Link,
    Image,
    List,
    Item,
    Unknown(String),
}

impl NodeKind {
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Heading => "Heading",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Text => "Text",
            NodeKind::Code => "Code",
            NodeKind::CodeBlock => "CodeBlock",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Strong => "Strong",
            NodeKind::Link => "Link",
            NodeKind::Image => "Image",
            NodeKind::List => "List",
            NodeKind::Item => "Item",
            NodeKind::Unknown(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Text content for leaves and code blocks.
    pub literal: String,
    /// Heading depth, 1..=6. Zero for every other kind.
    pub level: u8,
    /// Link or image target.
    pub destination: String,
    /// Bullet character of an unordered list, or the delimiter (`.` or `)`)
    /// of an ordered one.
    pub bullet: Option<char>,
    /// First number of an ordered list.
    pub start: Option<u64>,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            literal: String::new(),
            level: 0,
            destination: String::new(),
            bullet: None,
            start: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    fn leaf(kind: NodeKind, literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            ..Self::new(kind)
        }
    }
}

/// Arena of markdown nodes. The root is always `NodeId(0)` and is a
/// [`NodeKind::Document`].
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Tokenize `source` and build the node arena.
    ///
    /// Only task lists are enabled on top of CommonMark. Unbalanced end
    /// events are ignored rather than treated as errors.
    pub fn parse(source: &str) -> Self {
        let mut builder = Builder::new(source);
        for (event, range) in Parser::new_ext(source, Options::ENABLE_TASKLISTS).into_offset_iter() {
            builder.push(event, range);
        }
        builder.tree
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Direct children of `id`, in document order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).first_child,
        }
    }

    /// `id` itself followed by its following siblings.
    pub fn siblings_from(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: Some(id),
        }
    }

    fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        match self.nodes[parent.0].last_child {
            Some(last) => self.nodes[last.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        self.nodes.push(node);
        id
    }
}

pub struct Children<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).next_sibling;
        Some(current)
    }
}

struct Builder<'s> {
    source: &'s str,
    tree: NodeTree,
    current: NodeId,
}

impl<'s> Builder<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            tree: NodeTree {
                nodes: vec![Node::new(NodeKind::Document)],
            },
            current: NodeTree::ROOT,
        }
    }

    fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.open(tag, range),
            Event::End(_) => self.close(),
            Event::Text(text) => {
                if self.tree.get(self.current).kind == NodeKind::CodeBlock {
                    self.tree.nodes[self.current.0].literal.push_str(&text);
                } else {
                    self.text(&text);
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak | Event::HardBreak => self.text("\n"),
            Event::TaskListMarker(checked) => self.text(if checked { "[x] " } else { "[ ] " }),
            Event::Code(code) => {
                self.tree
                    .append(self.current, Node::leaf(NodeKind::Code, &*code));
            }
            other => {
                let name = variant_name(&other);
                self.tree
                    .append(self.current, Node::new(NodeKind::Unknown(name)));
            }
        }
    }

    /// Appends a text leaf, merging it into a preceding text sibling.
    fn text(&mut self, text: &str) {
        if let Some(last) = self.tree.get(self.current).last_child {
            let node = &mut self.tree.nodes[last.0];
            if node.kind == NodeKind::Text {
                node.literal.push_str(text);
                return;
            }
        }
        self.tree.append(self.current, Node::leaf(NodeKind::Text, text));
    }

    fn open(&mut self, tag: Tag<'_>, range: Range<usize>) {
        let node = match tag {
            Tag::Paragraph | Tag::HtmlBlock => Node::new(NodeKind::Paragraph),
            Tag::Heading { level, .. } => Node {
                level: level as u8,
                ..Node::new(NodeKind::Heading)
            },
            Tag::BlockQuote(_) => Node::new(NodeKind::BlockQuote),
            Tag::CodeBlock(_) => Node::new(NodeKind::CodeBlock),
            Tag::List(start) => Node {
                start,
                ..Node::new(NodeKind::List)
            },
            Tag::Item => {
                self.record_marker(range.start);
                Node::new(NodeKind::Item)
            }
            Tag::Emphasis => Node::new(NodeKind::Emphasis),
            Tag::Strong => Node::new(NodeKind::Strong),
            Tag::Link { dest_url, .. } => Node {
                destination: dest_url.into_string(),
                ..Node::new(NodeKind::Link)
            },
            Tag::Image { dest_url, .. } => Node {
                destination: dest_url.into_string(),
                ..Node::new(NodeKind::Image)
            },
            other => Node::new(NodeKind::Unknown(variant_name(&other))),
        };
        self.current = self.tree.append(self.current, node);
    }

    fn close(&mut self) {
        if let Some(parent) = self.tree.get(self.current).parent {
            self.current = parent;
        }
    }

    /// Reads the list marker from the source at the first item of a list.
    fn record_marker(&mut self, offset: usize) {
        let list = &self.tree.nodes[self.current.0];
        if list.kind != NodeKind::List || list.bullet.is_some() {
            return;
        }

        let marker = self
            .source
            .get(offset..)
            .unwrap_or_default()
            .trim_start_matches(|c: char| c.is_whitespace() || c == '>');
        let bullet = if list.start.is_some() {
            match marker.trim_start_matches(|c: char| c.is_ascii_digit()).chars().next() {
                Some(c @ ('.' | ')')) => c,
                _ => '.',
            }
        } else {
            match marker.chars().next() {
                Some(c @ ('-' | '*' | '+')) => c,
                _ => '-',
            }
        };
        self.tree.nodes[self.current.0].bullet = Some(bullet);
    }
}

/// `Rule`, `Strikethrough`, `Table(..)` -> `"Rule"`, `"Strikethrough"`, `"Table"`.
fn variant_name(value: &impl std::fmt::Debug) -> String {
    let debug = format!("{value:?}");
    debug
        .split(['(', ' ', '{'])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tree: &NodeTree, id: NodeId) -> Vec<NodeKind> {
        tree.children(id).map(|c| tree.get(c).kind.clone()).collect()
    }

    #[test]
    fn test_root_is_document() {
        let tree = NodeTree::parse("");
        assert_eq!(tree.get(NodeTree::ROOT).kind, NodeKind::Document);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_headings_and_paragraphs_are_siblings() {
        let tree = NodeTree::parse("# One\ntext\n\n## Two\n");
        assert_eq!(
            kinds(&tree, NodeTree::ROOT),
            vec![NodeKind::Heading, NodeKind::Paragraph, NodeKind::Heading]
        );

        let levels: Vec<u8> = tree
            .children(NodeTree::ROOT)
            .filter(|&id| tree.get(id).kind == NodeKind::Heading)
            .map(|id| tree.get(id).level)
            .collect();
        assert_eq!(levels, vec![1, 2]);
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let tree = NodeTree::parse("first line\nsecond &amp; line");
        let para = tree.get(NodeTree::ROOT).first_child.unwrap();
        let texts: Vec<&str> = tree
            .children(para)
            .map(|id| tree.get(id).literal.as_str())
            .collect();
        assert_eq!(texts, vec!["first line\nsecond & line"]);
    }

    #[test]
    fn test_code_block_literal_accumulates() {
        let tree = NodeTree::parse("```\nlet a = 1;\nlet b = 2;\n```\n");
        let block = tree.get(NodeTree::ROOT).first_child.unwrap();
        let node = tree.get(block);
        assert_eq!(node.kind, NodeKind::CodeBlock);
        assert_eq!(node.literal, "let a = 1;\nlet b = 2;\n");
        assert!(node.first_child.is_none());
    }

    #[test]
    fn test_list_markers_are_read_from_source() {
        let tree = NodeTree::parse("* a\n* b\n\n3) x\n4) y\n");
        let lists: Vec<&Node> = tree
            .children(NodeTree::ROOT)
            .map(|id| tree.get(id))
            .collect();

        assert_eq!(lists[0].kind, NodeKind::List);
        assert_eq!(lists[0].bullet, Some('*'));
        assert_eq!(lists[0].start, None);
        assert_eq!(lists[1].bullet, Some(')'));
        assert_eq!(lists[1].start, Some(3));
    }

    #[test]
    fn test_link_destination_and_anchor() {
        let tree = NodeTree::parse("[docs](https://docs.rs)");
        let para = tree.get(NodeTree::ROOT).first_child.unwrap();
        let link = tree.get(para).first_child.unwrap();

        assert_eq!(tree.get(link).kind, NodeKind::Link);
        assert_eq!(tree.get(link).destination, "https://docs.rs");
        assert_eq!(kinds(&tree, link), vec![NodeKind::Text]);
    }

    #[test]
    fn test_unsupported_constructs_are_unknown() {
        let tree = NodeTree::parse("before\n\n---\n\nafter\n");
        assert_eq!(
            kinds(&tree, NodeTree::ROOT),
            vec![
                NodeKind::Paragraph,
                NodeKind::Unknown("Rule".to_string()),
                NodeKind::Paragraph
            ]
        );
    }

    #[test]
    fn test_task_markers_become_text() {
        let tree = NodeTree::parse("- [x] done\n- [ ] todo\n");
        let list = tree.get(NodeTree::ROOT).first_child.unwrap();
        let items: Vec<String> = tree
            .children(list)
            .map(|item| {
                tree.children(item)
                    .map(|c| tree.get(c).literal.clone())
                    .collect()
            })
            .collect();
        assert_eq!(items, vec!["[x] done", "[ ] todo"]);
    }

    #[test]
    fn test_parent_links() {
        let tree = NodeTree::parse("> quoted\n");
        let quote = tree.get(NodeTree::ROOT).first_child.unwrap();
        let para = tree.get(quote).first_child.unwrap();
        assert_eq!(tree.get(para).parent, Some(quote));
        assert_eq!(tree.get(quote).parent, Some(NodeTree::ROOT));
    }
}
