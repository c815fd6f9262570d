/// A markdown fragment parsed into a tree of block and inline nodes.
/// Panes render one of these per markdown fragment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<DocumentNode>,
}

impl Document {
    pub fn empty() -> Self {
        Document { nodes: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every link in document order, including links nested in lists and quotes.
    pub fn links(&self) -> Vec<LinkRef> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.collect_links(&mut out);
        }
        out
    }

    /// Text content with markup stripped, blocks separated by newlines.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(DocumentNode::plain_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Paragraph(Vec<InlineNode>),
    /// Inline content of a tight list item, rendered without a wrapper.
    Plain(Vec<InlineNode>),
    Heading {
        level: u8,
        content: Vec<InlineNode>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    Blockquote(Document),
    Table {
        alignments: Vec<ColumnAlignment>,
        headers: Vec<Vec<InlineNode>>,
        rows: Vec<Vec<Vec<InlineNode>>>,
    },
    OrderedList {
        start: u64,
        items: Vec<Document>,
    },
    UnorderedList {
        items: Vec<Document>,
    },
    HorizontalRule,
}

impl DocumentNode {
    /// The HTML tag this node renders as; `None` for wrapper-less content.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            DocumentNode::Paragraph(_) => Some("p"),
            DocumentNode::Plain(_) => None,
            DocumentNode::Heading { level, .. } => Some(heading_tag(*level)),
            DocumentNode::CodeBlock { .. } => Some("pre"),
            DocumentNode::Blockquote(_) => Some("blockquote"),
            DocumentNode::Table { .. } => Some("table"),
            DocumentNode::OrderedList { .. } => Some("ol"),
            DocumentNode::UnorderedList { .. } => Some("ul"),
            DocumentNode::HorizontalRule => Some("hr"),
        }
    }

    fn collect_links(&self, out: &mut Vec<LinkRef>) {
        match self {
            DocumentNode::Paragraph(inlines)
            | DocumentNode::Plain(inlines)
            | DocumentNode::Heading {
                content: inlines, ..
            } => collect_inline_links(inlines, out),
            DocumentNode::Blockquote(doc) => {
                for node in &doc.nodes {
                    node.collect_links(out);
                }
            }
            DocumentNode::OrderedList { items, .. } | DocumentNode::UnorderedList { items } => {
                for item in items {
                    for node in &item.nodes {
                        node.collect_links(out);
                    }
                }
            }
            DocumentNode::Table { headers, rows, .. } => {
                for cell in headers.iter().chain(rows.iter().flatten()) {
                    collect_inline_links(cell, out);
                }
            }
            DocumentNode::CodeBlock { .. } | DocumentNode::HorizontalRule => {}
        }
    }

    fn plain_text(&self) -> String {
        match self {
            DocumentNode::Paragraph(inlines)
            | DocumentNode::Plain(inlines)
            | DocumentNode::Heading {
                content: inlines, ..
            } => inline_text(inlines),
            DocumentNode::CodeBlock { content, .. } => content.trim_end().to_string(),
            DocumentNode::Blockquote(doc) => doc.plain_text(),
            DocumentNode::OrderedList { items, .. } | DocumentNode::UnorderedList { items } => items
                .iter()
                .map(Document::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            DocumentNode::Table { headers, rows, .. } => std::iter::once(headers)
                .chain(rows.iter())
                .map(|row| row.iter().map(|c| inline_text(c)).collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            DocumentNode::HorizontalRule => String::new(),
        }
    }
}

/// Inline elements that appear within a line of text.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text(String),
    Strong(Vec<InlineNode>),
    Emphasis(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    CodeSpan(String),
    Link {
        dest: String,
        title: String,
        content: Vec<InlineNode>,
    },
    Image {
        dest: String,
        title: String,
        alt: Vec<InlineNode>,
    },
    SoftBreak,
    HardBreak,
}

impl InlineNode {
    /// The HTML tag this node renders as; `None` for text and soft breaks.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            InlineNode::Strong(_) => Some("strong"),
            InlineNode::Emphasis(_) => Some("em"),
            InlineNode::Strikethrough(_) => Some("s"),
            InlineNode::CodeSpan(_) => Some("code"),
            InlineNode::Link { .. } => Some("a"),
            InlineNode::Image { .. } => Some("img"),
            InlineNode::HardBreak => Some("br"),
            InlineNode::Text(_) | InlineNode::SoftBreak => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnAlignment {
    None,
    Left,
    Center,
    Right,
}

/// A link found in a document: its destination and its visible text.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRef {
    pub dest: String,
    pub text: String,
}

pub fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

/// Concatenated text of inline nodes.
pub fn inline_text(inlines: &[InlineNode]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            InlineNode::Text(s) | InlineNode::CodeSpan(s) => out.push_str(s),
            InlineNode::Strong(children)
            | InlineNode::Emphasis(children)
            | InlineNode::Strikethrough(children)
            | InlineNode::Link {
                content: children, ..
            }
            | InlineNode::Image { alt: children, .. } => out.push_str(&inline_text(children)),
            InlineNode::SoftBreak | InlineNode::HardBreak => out.push(' '),
        }
    }
    out
}

fn collect_inline_links(inlines: &[InlineNode], out: &mut Vec<LinkRef>) {
    for inline in inlines {
        match inline {
            InlineNode::Link { dest, content, .. } => {
                out.push(LinkRef {
                    dest: dest.clone(),
                    text: inline_text(content),
                });
                collect_inline_links(content, out);
            }
            InlineNode::Strong(children)
            | InlineNode::Emphasis(children)
            | InlineNode::Strikethrough(children) => collect_inline_links(children, out),
            _ => {}
        }
    }
}
