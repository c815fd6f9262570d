use std::ops::Range;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd};

use crate::document::{ColumnAlignment, Document, DocumentNode, InlineNode};

type Events<'a> = [(Event<'a>, Range<usize>)];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a markdown fragment into a Document.
pub(super) fn parse_document(source: &str) -> Document {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = CmarkParser::new_ext(source, options);
    let events: Vec<(Event<'_>, Range<usize>)> = parser.into_offset_iter().collect();

    let mut i = 0;
    let nodes = collect_blocks(&events, &mut i, &|_| false);
    Document { nodes }
}

// ---------------------------------------------------------------------------
// Block collection
// ---------------------------------------------------------------------------

/// Collect block nodes until a matching End tag (or the end of input).
/// Advances `i` past the End tag.
fn collect_blocks(events: &Events<'_>, i: &mut usize, is_end: &dyn Fn(&TagEnd) -> bool) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();
    // Loose text directly inside a tight list item.
    let mut plain: Vec<InlineNode> = Vec::new();

    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(tag_end) if is_end(tag_end) => {
                *i += 1;
                break;
            }

            Event::Start(Tag::Paragraph) => {
                flush_plain(&mut plain, &mut nodes);
                *i += 1;
                let inlines = collect_inlines(events, i, &|e| matches!(e, TagEnd::Paragraph));
                nodes.push(DocumentNode::Paragraph(inlines));
            }

            Event::Start(Tag::Heading { level, .. }) => {
                flush_plain(&mut plain, &mut nodes);
                let level = heading_level_to_u8(level);
                *i += 1;
                let content = collect_inlines(events, i, &|e| matches!(e, TagEnd::Heading(_)));
                nodes.push(DocumentNode::Heading { level, content });
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                flush_plain(&mut plain, &mut nodes);
                let language = match kind {
                    CodeBlockKind::Fenced(lang) => {
                        let lang = lang.to_string();
                        if lang.is_empty() { None } else { Some(lang) }
                    }
                    CodeBlockKind::Indented => None,
                };
                *i += 1;
                let content = collect_text_until(events, i, |e| matches!(e, TagEnd::CodeBlock));
                nodes.push(DocumentNode::CodeBlock { language, content });
            }

            Event::Start(Tag::BlockQuote(_)) => {
                flush_plain(&mut plain, &mut nodes);
                *i += 1;
                let inner = collect_blocks(events, i, &|e| matches!(e, TagEnd::BlockQuote(_)));
                nodes.push(DocumentNode::Blockquote(Document { nodes: inner }));
            }

            Event::Start(Tag::List(start)) => {
                flush_plain(&mut plain, &mut nodes);
                let start = *start;
                *i += 1;
                let items = collect_list_items(events, i);
                nodes.push(match start {
                    Some(start) => DocumentNode::OrderedList { start, items },
                    None => DocumentNode::UnorderedList { items },
                });
            }

            Event::Start(Tag::Table(alignments)) => {
                flush_plain(&mut plain, &mut nodes);
                let alignments = alignments
                    .iter()
                    .map(|a| match a {
                        Alignment::None => ColumnAlignment::None,
                        Alignment::Left => ColumnAlignment::Left,
                        Alignment::Center => ColumnAlignment::Center,
                        Alignment::Right => ColumnAlignment::Right,
                    })
                    .collect();
                *i += 1;
                let (headers, rows) = collect_table(events, i);
                nodes.push(DocumentNode::Table {
                    alignments,
                    headers,
                    rows,
                });
            }

            Event::Rule => {
                flush_plain(&mut plain, &mut nodes);
                nodes.push(DocumentNode::HorizontalRule);
                *i += 1;
            }

            // Tight list items carry their inline content without a paragraph.
            Event::Text(_)
            | Event::Code(_)
            | Event::SoftBreak
            | Event::HardBreak
            | Event::Start(Tag::Strong)
            | Event::Start(Tag::Emphasis)
            | Event::Start(Tag::Strikethrough)
            | Event::Start(Tag::Link { .. })
            | Event::Start(Tag::Image { .. }) => {
                if let Some(inline) = next_inline(events, i) {
                    plain.push(inline);
                }
            }

            _ => {
                *i += 1;
            }
        }
    }

    flush_plain(&mut plain, &mut nodes);
    nodes
}

fn flush_plain(plain: &mut Vec<InlineNode>, nodes: &mut Vec<DocumentNode>) {
    if !plain.is_empty() {
        nodes.push(DocumentNode::Plain(std::mem::take(plain)));
    }
}

/// Collect list items until End(List). Each item becomes a Document.
fn collect_list_items(events: &Events<'_>, i: &mut usize) -> Vec<Document> {
    let mut items = Vec::new();

    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(TagEnd::List(_)) => {
                *i += 1;
                break;
            }
            Event::Start(Tag::Item) => {
                *i += 1;
                let nodes = collect_blocks(events, i, &|e| matches!(e, TagEnd::Item));
                items.push(Document { nodes });
            }
            _ => {
                *i += 1;
            }
        }
    }

    items
}

/// Collect table headers and rows.
fn collect_table(events: &Events<'_>, i: &mut usize) -> (Vec<Vec<InlineNode>>, Vec<Vec<Vec<InlineNode>>>) {
    let mut headers: Vec<Vec<InlineNode>> = Vec::new();
    let mut rows: Vec<Vec<Vec<InlineNode>>> = Vec::new();
    let mut in_head = false;
    let mut current_row: Vec<Vec<InlineNode>> = Vec::new();

    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(TagEnd::Table) => {
                *i += 1;
                break;
            }
            Event::Start(Tag::TableHead) => {
                in_head = true;
                *i += 1;
            }
            Event::End(TagEnd::TableHead) => {
                in_head = false;
                headers = std::mem::take(&mut current_row);
                *i += 1;
            }
            Event::Start(Tag::TableRow) => {
                current_row = Vec::new();
                *i += 1;
            }
            Event::End(TagEnd::TableRow) => {
                if !in_head {
                    rows.push(std::mem::take(&mut current_row));
                }
                *i += 1;
            }
            Event::Start(Tag::TableCell) => {
                *i += 1;
                current_row.push(collect_inlines(events, i, &|e| matches!(e, TagEnd::TableCell)));
            }
            _ => {
                *i += 1;
            }
        }
    }

    (headers, rows)
}

// ---------------------------------------------------------------------------
// Inline collection
// ---------------------------------------------------------------------------

/// Collect inline nodes until a matching End tag.
fn collect_inlines(events: &Events<'_>, i: &mut usize, is_end: &dyn Fn(&TagEnd) -> bool) -> Vec<InlineNode> {
    let mut inlines = Vec::new();

    while *i < events.len() {
        if let Event::End(tag_end) = &events[*i].0 {
            if is_end(tag_end) {
                *i += 1;
                break;
            }
        }
        if let Some(inline) = next_inline(events, i) {
            inlines.push(inline);
        }
    }

    inlines
}

/// Read one inline node starting at `i`, or skip one unrecognised event.
fn next_inline(events: &Events<'_>, i: &mut usize) -> Option<InlineNode> {
    let (ref ev, _) = events[*i];
    *i += 1;
    match ev {
        Event::Text(s) => Some(InlineNode::Text(s.to_string())),
        Event::Code(s) => Some(InlineNode::CodeSpan(s.to_string())),
        Event::SoftBreak => Some(InlineNode::SoftBreak),
        Event::HardBreak => Some(InlineNode::HardBreak),
        Event::Start(Tag::Strong) => Some(InlineNode::Strong(collect_inlines(events, i, &|e| {
            matches!(e, TagEnd::Strong)
        }))),
        Event::Start(Tag::Emphasis) => Some(InlineNode::Emphasis(collect_inlines(events, i, &|e| {
            matches!(e, TagEnd::Emphasis)
        }))),
        Event::Start(Tag::Strikethrough) => Some(InlineNode::Strikethrough(collect_inlines(events, i, &|e| {
            matches!(e, TagEnd::Strikethrough)
        }))),
        Event::Start(Tag::Link { dest_url, title, .. }) => {
            let dest = dest_url.to_string();
            let title = title.to_string();
            let content = collect_inlines(events, i, &|e| matches!(e, TagEnd::Link));
            Some(InlineNode::Link { dest, title, content })
        }
        Event::Start(Tag::Image { dest_url, title, .. }) => {
            let dest = dest_url.to_string();
            let title = title.to_string();
            let alt = collect_inlines(events, i, &|e| matches!(e, TagEnd::Image));
            Some(InlineNode::Image { dest, title, alt })
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn heading_level_to_u8(level: &HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Collect all text content until a matching End tag.
fn collect_text_until(events: &Events<'_>, i: &mut usize, is_end: impl Fn(&TagEnd) -> bool) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(tag_end) if is_end(tag_end) => {
                *i += 1;
                break;
            }
            Event::Text(s) => {
                text.push_str(s);
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    text
}
