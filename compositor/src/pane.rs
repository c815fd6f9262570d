//! Markdown pane rendering.
//!
//! A pane's markdown is rendered to HTML with the reduced class payload
//! applied: every element receives the responsive class string for its tag at
//! its position among elements of that tag, links that name a button become
//! styled buttons, and action expressions are resolved to hrefs.

use std::collections::HashMap;

use indexmap::IndexMap;
use pulldown_cmark_escape::{escape_href, escape_html};
use storykeep::action::{Node, format_number};
use storykeep::document::{Document, DocumentNode, InlineNode, heading_tag};
use storykeep::payload::MarkdownPayload;

use crate::action::pre_parse_action;
use crate::config::Config;
use crate::events::{EventRecord, pre_parse_clicked};
use crate::reducer::{ReducedClasses, reduce_button, reduce_element, reduce_modal, reduce_parent, reduce_record};

/// Where a pane is rendered.
#[derive(Debug, Clone, Copy)]
pub struct PaneContext<'a> {
    /// Pane ID; recorded as the source of click events.
    pub id: &'a str,
    /// Slug of the page the pane is shown on.
    pub slug: &'a str,
    pub is_context: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    /// Click events for each resolved action, in document order.
    pub events: Vec<EventRecord>,
}

pub fn render_pane(doc: &Document, payload: &MarkdownPayload, ctx: &PaneContext<'_>, config: &Config) -> Rendered {
    let mut renderer = Renderer::new(payload, ctx, config);
    renderer.blocks(&doc.nodes);
    let Renderer { out, events, .. } = renderer;

    let mut html = out;
    if let Some(modal) = &payload.modal {
        let modal = reduce_modal(modal);
        let mut style = format!(
            "padding-left:{}px;padding-top:{}px",
            format_number(modal.padding_left),
            format_number(modal.padding_top)
        );
        if modal.zoom_factor != 1.0 {
            style.push_str(&format!(";transform:scale({})", format_number(modal.zoom_factor)));
        }
        html = format!(
            "<div{} style=\"{}\">\n{}</div>\n",
            class_attr(&modal.classes.all_string()),
            style,
            html
        );
    }
    if let Some(parent) = &payload.parent {
        for wrapper in reduce_parent(parent).iter().rev() {
            html = format!("<div{}>\n{}</div>\n", class_attr(&wrapper.all_string()), html);
        }
    }

    Rendered { html, events }
}

/// Per-position classes for one tag, and what positions past `count` get.
struct TagClasses {
    positions: Vec<ReducedClasses>,
    base: ReducedClasses,
}

struct Renderer<'a> {
    payload: &'a MarkdownPayload,
    ctx: &'a PaneContext<'a>,
    config: &'a Config,
    tags: IndexMap<&'a str, TagClasses>,
    seen: HashMap<&'static str, usize>,
    out: String,
    events: Vec<EventRecord>,
}

impl<'a> Renderer<'a> {
    fn new(payload: &'a MarkdownPayload, ctx: &'a PaneContext<'a>, config: &'a Config) -> Self {
        let tags = payload
            .classes
            .iter()
            .map(|(tag, element)| {
                let classes = TagClasses {
                    positions: reduce_element(element),
                    base: reduce_record(&element.classes),
                };
                (tag.as_str(), classes)
            })
            .collect();
        Renderer {
            payload,
            ctx,
            config,
            tags,
            seen: HashMap::new(),
            out: String::new(),
            events: Vec::new(),
        }
    }

    /// ` class="..."` for the next element with `tag`, or nothing.
    fn next_class(&mut self, tag: &'static str) -> String {
        let position = self.seen.entry(tag).or_insert(0);
        let index = *position;
        *position += 1;

        match self.tags.get(tag) {
            Some(classes) => {
                let reduced = classes.positions.get(index).unwrap_or(&classes.base);
                class_attr(&reduced.all_string())
            }
            None => String::new(),
        }
    }

    fn open(&mut self, tag: &'static str) {
        let class = self.next_class(tag);
        self.out.push_str(&format!("<{}{}>", tag, class));
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str(&format!("</{}>", tag));
    }

    fn blocks(&mut self, nodes: &[DocumentNode]) {
        for node in nodes {
            self.block(node);
        }
    }

    fn block(&mut self, node: &DocumentNode) {
        match node {
            DocumentNode::Paragraph(inlines) => {
                self.open("p");
                self.inlines(inlines);
                self.close("p");
                self.out.push('\n');
            }
            DocumentNode::Plain(inlines) => self.inlines(inlines),
            DocumentNode::Heading { level, content } => {
                let tag = heading_tag(*level);
                self.open(tag);
                self.inlines(content);
                self.close(tag);
                self.out.push('\n');
            }
            DocumentNode::CodeBlock { language, content } => {
                self.open("pre");
                match language {
                    Some(lang) => self.out.push_str(&format!("<code class=\"language-{}\">", escape(lang))),
                    None => self.out.push_str("<code>"),
                }
                self.out.push_str(&escape(content));
                self.out.push_str("</code></pre>\n");
            }
            DocumentNode::Blockquote(doc) => {
                self.open("blockquote");
                self.out.push('\n');
                self.blocks(&doc.nodes);
                self.close("blockquote");
                self.out.push('\n');
            }
            DocumentNode::OrderedList { start, items } => {
                let class = self.next_class("ol");
                if *start == 1 {
                    self.out.push_str(&format!("<ol{}>\n", class));
                } else {
                    self.out.push_str(&format!("<ol{} start=\"{}\">\n", class, start));
                }
                self.list_items(items);
                self.out.push_str("</ol>\n");
            }
            DocumentNode::UnorderedList { items } => {
                self.open("ul");
                self.out.push('\n');
                self.list_items(items);
                self.out.push_str("</ul>\n");
            }
            DocumentNode::Table { headers, rows, .. } => {
                self.open("table");
                self.out.push_str("\n<thead>");
                self.open("tr");
                for cell in headers {
                    self.open("th");
                    self.inlines(cell);
                    self.close("th");
                }
                self.out.push_str("</tr></thead>\n<tbody>\n");
                for row in rows {
                    self.open("tr");
                    for cell in row {
                        self.open("td");
                        self.inlines(cell);
                        self.close("td");
                    }
                    self.out.push_str("</tr>\n");
                }
                self.out.push_str("</tbody>\n</table>\n");
            }
            DocumentNode::HorizontalRule => {
                let class = self.next_class("hr");
                self.out.push_str(&format!("<hr{} />\n", class));
            }
        }
    }

    fn list_items(&mut self, items: &[Document]) {
        for item in items {
            self.open("li");
            self.blocks(&item.nodes);
            self.close("li");
            self.out.push('\n');
        }
    }

    fn inlines(&mut self, inlines: &[InlineNode]) {
        for inline in inlines {
            self.inline(inline);
        }
    }

    fn inline(&mut self, inline: &InlineNode) {
        match inline {
            InlineNode::Text(text) => self.out.push_str(&escape(text)),
            InlineNode::Strong(children) => self.wrapped("strong", children),
            InlineNode::Emphasis(children) => self.wrapped("em", children),
            InlineNode::Strikethrough(children) => self.wrapped("s", children),
            InlineNode::CodeSpan(code) => {
                self.open("code");
                self.out.push_str(&escape(code));
                self.close("code");
            }
            InlineNode::Link { dest, title, content } => self.link(dest, title, content),
            InlineNode::Image { dest, title, alt } => {
                let class = self.next_class("img");
                let alt = storykeep::document::inline_text(alt);
                self.out.push_str(&format!("<img{} src=\"{}\" alt=\"{}\"", class, escape_url(dest), escape(&alt)));
                if !title.is_empty() {
                    self.out.push_str(&format!(" title=\"{}\"", escape(title)));
                }
                self.out.push_str(" />");
            }
            InlineNode::SoftBreak => self.out.push('\n'),
            InlineNode::HardBreak => {
                let class = self.next_class("br");
                self.out.push_str(&format!("<br{} />\n", class));
            }
        }
    }

    fn wrapped(&mut self, tag: &'static str, children: &[InlineNode]) {
        self.open(tag);
        self.inlines(children);
        self.close(tag);
    }

    fn link(&mut self, dest: &str, title: &str, content: &[InlineNode]) {
        let payload = self.payload;
        let (class, href) = match payload.button_for(dest) {
            Some(button) => {
                let class = class_attr(&reduce_button(button).all_string());
                let target = if button.callback_payload.trim().is_empty() {
                    dest
                } else {
                    button.callback_payload.as_str()
                };
                (class, self.resolve(target))
            }
            None => {
                let class = self.next_class("a");
                (class, self.resolve(dest))
            }
        };

        self.out.push_str(&format!("<a{} href=\"{}\"", class, escape_url(&href)));
        if !title.is_empty() {
            self.out.push_str(&format!(" title=\"{}\"", escape(title)));
        }
        self.out.push('>');
        self.inlines(content);
        self.out.push_str("</a>");
    }

    /// Action expressions resolve to hrefs and record a click event; any
    /// other destination is used as written.
    fn resolve(&mut self, dest: &str) -> String {
        if !dest.trim_start().starts_with('(') {
            return dest.to_string();
        }
        let lexed = storykeep::parser::lex(dest, 0);
        let nodes: &[Node] = &lexed.nodes;
        if let Some(event) = pre_parse_clicked(self.ctx.id, nodes, self.config) {
            self.events.push(event);
        }
        pre_parse_action(nodes, self.ctx.slug, self.ctx.is_context)
    }
}

fn class_attr(classes: &str) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape(classes))
    }
}

/// Escape text for HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut out, text);
    out
}

/// Escape a link destination for a double-quoted `href` or `src`: unsafe
/// bytes are percent-encoded, `&` and `'` become entities.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let _ = escape_href(&mut out, url);
    out
}
