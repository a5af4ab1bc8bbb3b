//! Node tree to [`Document`] transformation.
//!
//! Every heading found in a depth-first walk becomes a [`Heading`]; each of
//! its following siblings, up to the next heading, becomes one [`Section`]
//! whose text is the rendered subtree. Inline fragments are tagged with a
//! [`Style`] and decorated by the configured [`Styler`].

use super::document::{Document, Heading, Section};
use super::tree::{NodeId, NodeKind, NodeTree};
use crate::style::{NopStyler, Style, Styler};
use std::sync::Arc;

/// Converts a [`NodeTree`] into a [`Document`].
#[derive(Clone)]
pub struct Transformer {
    styler: Arc<dyn Styler>,
    debug: bool,
}

impl Transformer {
    pub fn new(styler: Arc<dyn Styler>) -> Self {
        Self {
            styler,
            debug: false,
        }
    }

    /// Transformer without decorations, for plain-text and JSON output.
    pub fn plain() -> Self {
        Self::new(Arc::new(NopStyler))
    }

    /// Log every visited node at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn transform(&self, tree: &NodeTree) -> Document {
        let mut headings = Vec::new();
        self.collect_headings(tree, NodeTree::ROOT, &mut headings);
        Document::new(headings)
    }

    fn collect_headings(&self, tree: &NodeTree, parent: NodeId, headings: &mut Vec<Heading>) {
        for id in tree.children(parent) {
            let node = tree.get(id);
            if node.kind != NodeKind::Heading {
                self.collect_headings(tree, id, headings);
                continue;
            }

            let sections = tree
                .siblings_from(id)
                .skip(1)
                .take_while(|&sibling| tree.get(sibling).kind != NodeKind::Heading)
                .map(|sibling| Section::new(self.render(tree, [sibling])))
                .collect();

            headings.push(Heading {
                title: self.title(tree, id),
                level: node.level.max(1),
                sections,
            });
        }
    }

    /// Renders a run of sibling subtrees into a fresh buffer.
    fn render(&self, tree: &NodeTree, ids: impl IntoIterator<Item = NodeId>) -> String {
        let mut out = String::new();
        for id in ids {
            self.visit(tree, id, &mut out);
        }
        out
    }

    fn visit(&self, tree: &NodeTree, id: NodeId, out: &mut String) {
        let node = tree.get(id);
        if self.debug {
            log::debug!("node {} literal={:?}", node.kind.name(), node.literal);
        }

        // Lists always start on their own line.
        if node.kind == NodeKind::List && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.contents(tree, id));

        match node.kind {
            // The anchor already covers every child except nested images
            NodeKind::Link => {
                for child in tree.children(id).filter(|&c| is_image(tree, c)) {
                    self.visit(tree, child, out);
                }
            }
            ref kind if renders_subtree(kind) => {}
            _ => {
                for child in tree.children(id) {
                    self.visit(tree, child, out);
                }
            }
        }

        if appends_newline(tree, id) {
            out.push('\n');
        }
    }

    /// Rendered content of a single node, without its newline.
    fn contents(&self, tree: &NodeTree, id: NodeId) -> String {
        let node = tree.get(id);
        match &node.kind {
            NodeKind::Document => String::new(),
            NodeKind::Heading => self.title(tree, id),
            NodeKind::Paragraph | NodeKind::Text => node.literal.clone(),
            NodeKind::Code => self.styler.style(&node.literal, Style::Code),
            NodeKind::CodeBlock => self.styler.style(node.literal.trim(), Style::CodeBlock),
            NodeKind::BlockQuote => {
                let quoted = self.render(tree, tree.children(id));
                self.styler.style(quoted.trim(), Style::BlockQuote)
            }
            NodeKind::Emphasis => self.styler.style(&plain_text(tree, id), Style::Italic),
            NodeKind::Strong => self.styler.style(&plain_text(tree, id), Style::Bold),
            NodeKind::Link => {
                let link = self.link_text(tree, id);
                self.styler.style(&link, Style::Link)
            }
            NodeKind::Image => {
                let image = format!("Image: {}", self.link_text(tree, id));
                self.styler.style(&image, Style::Image)
            }
            NodeKind::List => self.list(tree, id),
            NodeKind::Item => format!("{} ", node.literal),
            NodeKind::Unknown(name) => {
                self.styler.style(&format!("Unknown node: {name}"), Style::Unknown)
            }
        }
    }

    /// Heading title: starts at the first text child, so a leading code
    /// span does not swallow the title. Headings without any text child use
    /// all of their children.
    fn title(&self, tree: &NodeTree, id: NodeId) -> String {
        let children: Vec<NodeId> = tree.children(id).collect();
        let start = children
            .iter()
            .position(|&child| tree.get(child).kind == NodeKind::Text)
            .unwrap_or(0);
        self.render(tree, children[start..].iter().copied())
            .trim()
            .to_string()
    }

    /// `anchor <destination>`, or `<destination>` without an anchor.
    ///
    /// The anchor is every child except nested images, rendered in order.
    fn link_text(&self, tree: &NodeTree, id: NodeId) -> String {
        let destination = &tree.get(id).destination;
        let rendered = self.render(tree, tree.children(id).filter(|&c| !is_image(tree, c)));
        let anchor = rendered.trim();

        if anchor.is_empty() {
            format!("<{destination}>")
        } else {
            format!("{anchor} <{destination}>")
        }
    }

    fn list(&self, tree: &NodeTree, id: NodeId) -> String {
        let list = tree.get(id);
        let mut out = String::new();

        for (n, item) in tree.children(id).enumerate() {
            let marker = match list.start {
                Some(start) => format!("{}{}", start + n as u64, list.bullet.unwrap_or('.')),
                None => list.bullet.unwrap_or('-').to_string(),
            };

            let text = self.render(tree, tree.children(item));
            let mut lines = text.trim().lines();
            let first = format!("{marker} {}", lines.next().unwrap_or_default());
            out.push_str(first.trim_end());
            out.push('\n');

            for line in lines {
                if !line.is_empty() {
                    out.push_str("  ");
                    out.push_str(line);
                }
                out.push('\n');
            }
        }

        out
    }
}

/// Kinds whose [`Transformer::contents`] already covers their children.
fn renders_subtree(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Heading
            | NodeKind::Emphasis
            | NodeKind::Strong
            | NodeKind::BlockQuote
            | NodeKind::List
            | NodeKind::CodeBlock
            | NodeKind::Image
            | NodeKind::Unknown(_)
    )
}

fn is_image(tree: &NodeTree, id: NodeId) -> bool {
    tree.get(id).kind == NodeKind::Image
}

fn appends_newline(tree: &NodeTree, id: NodeId) -> bool {
    let node = tree.get(id);
    match node.kind {
        NodeKind::Paragraph | NodeKind::Heading | NodeKind::Image | NodeKind::BlockQuote => true,
        NodeKind::CodeBlock => node.literal.trim().contains('\n'),
        _ => false,
    }
}

/// Concatenated literals of every text and code leaf under `id`.
fn plain_text(tree: &NodeTree, id: NodeId) -> String {
    let mut out = String::new();
    for child in tree.children(id) {
        let node = tree.get(child);
        match node.kind {
            NodeKind::Text | NodeKind::Code => out.push_str(&node.literal),
            _ => out.push_str(&plain_text(tree, child)),
        }
    }
    out
}
