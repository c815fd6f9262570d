//! Declarative style and content payloads as the editor stores them.
//!
//! All types deserialize from the editor's JSON shape (camelCase keys) and
//! equally from TOML, which the CLI and the fixture runner use.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One cell of a responsive tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Per-breakpoint values: `[all]`, `[mobile, rest]` or `[mobile, tablet, desktop]`.
/// `null` cells suppress the class at that breakpoint.
pub type Tuple = Vec<Option<StyleValue>>;

/// Semantic selector (`textCOLOR`, `bgOPACITY`, ...) to tuple, in payload order.
pub type StyleRecord = IndexMap<String, Tuple>;

/// Classes for one markdown tag, applied to each of its `count` occurrences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPayload {
    pub classes: StyleRecord,
    /// Number of rendered positions; `0` is treated as one.
    pub count: usize,
    /// Position-specific replacements: `override[selector][position]`.
    #[serde(rename = "override")]
    pub overrides: IndexMap<String, Vec<Option<Tuple>>>,
}

impl ElementPayload {
    pub fn positions(&self) -> usize {
        self.count.max(1)
    }
}

/// Wrapper `div`s around a pane's content, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentPayload {
    pub classes: Vec<StyleRecord>,
}

/// A modal shape wrapping the pane text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModalPayload {
    pub classes: StyleRecord,
    pub zoom_factor: f64,
    pub padding_left: f64,
    pub padding_top: f64,
}

impl Default for ModalPayload {
    fn default() -> Self {
        ModalPayload {
            classes: StyleRecord::new(),
            zoom_factor: 1.0,
            padding_left: 0.0,
            padding_top: 0.0,
        }
    }
}

/// A link rendered as a button. The link's href names it via `url_target`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonPayload {
    pub url_target: String,
    /// Action expression fired on click, e.g. `(goto (storyFragment about))`.
    pub callback_payload: String,
    pub classes: StyleRecord,
    pub hover: StyleRecord,
}

/// Everything needed to style one markdown fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkdownPayload {
    /// Tag name (`p`, `h2`, `li`, ...) to its classes.
    pub classes: IndexMap<String, ElementPayload>,
    /// Keyed by the link href that turns into the button.
    pub buttons: IndexMap<String, ButtonPayload>,
    pub parent: Option<ParentPayload>,
    pub modal: Option<ModalPayload>,
}

impl MarkdownPayload {
    /// Look up a button by link href, falling back to each button's `url_target`.
    pub fn button_for(&self, href: &str) -> Option<&ButtonPayload> {
        self.buttons
            .get(href)
            .or_else(|| self.buttons.values().find(|b| b.url_target == href))
    }
}

/// A call-to-action impression shown alongside a pane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Impression {
    pub id: String,
    pub title: String,
    pub body: String,
    pub button_text: String,
    pub actions_lisp: String,
    pub parent_id: String,
}
