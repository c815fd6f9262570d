use storykeep::Lexed;
use storykeep::action::{Node, format_number};
use storykeep::parser::coerce_number;
use tracing::{trace, warn};

use crate::error::ActionError;

/// A decoded `goto` action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Home,
    Concierge(String),
    Context(String),
    Product(String),
    StoryFragment(String),
    StoryFragmentPane { slug: String, pane: String },
    /// Seek the embedded video on a story fragment to `t` seconds.
    Bunny { slug: String, t: f64 },
    /// Seek the embedded video on a context pane to `t` seconds.
    BunnyContext { slug: String, t: f64 },
    Url(String),
    StoryKeep(StoryKeepTarget),
}

/// Editor pages reachable with `(goto (storykeep ...))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryKeepTarget {
    Dashboard,
    Settings,
    Login,
    Logout,
}

impl Action {
    /// Decode a lexed tree. Accepts both `(goto sub arg...)` and the nested
    /// `(goto (sub arg...))` the editor stores.
    pub fn from_nodes(nodes: &[Node]) -> Result<Action, ActionError> {
        let form = match nodes.first() {
            None => return Err(ActionError::Empty),
            Some(Node::List(items, _)) => items.as_slice(),
            Some(_) => nodes,
        };

        let (command, rest) = form.split_first().ok_or(ActionError::Empty)?;
        let command = command
            .unquoted()
            .to_text()
            .ok_or_else(|| ActionError::UnknownCommand(command.to_string()))?;
        if command != "goto" {
            return Err(ActionError::UnknownCommand(command.into_owned()));
        }

        let target = match rest {
            [Node::List(items, _)] => items.as_slice(),
            _ => rest,
        };
        let (sub, args) = target.split_first().ok_or_else(|| ActionError::MissingArgument {
            target: "goto".to_string(),
            index: 0,
        })?;
        let Some(sub) = sub.unquoted().as_str() else {
            return Err(ActionError::UnknownTarget {
                command: "goto".to_string(),
                target: sub.to_string(),
            });
        };

        let args = Args { target: sub, args };
        let action = match sub {
            "home" => Action::Home,
            "concierge" => Action::Concierge(args.text(1)?),
            "context" => Action::Context(args.text(1)?),
            "product" => Action::Product(args.text(1)?),
            "storyFragment" => Action::StoryFragment(args.text(1)?),
            "storyFragmentPane" => Action::StoryFragmentPane {
                slug: args.string(1)?,
                pane: args.string(2)?,
            },
            "bunny" => Action::Bunny {
                slug: args.text(1)?,
                t: args.seconds(2)?,
            },
            "bunnyContext" => Action::BunnyContext {
                slug: args.text(1)?,
                t: args.seconds(2)?,
            },
            "url" => Action::Url(args.text(1)?),
            "storykeep" => Action::StoryKeep(match args.text(1)?.as_str() {
                "dashboard" => StoryKeepTarget::Dashboard,
                "settings" => StoryKeepTarget::Settings,
                "login" => StoryKeepTarget::Login,
                "logout" => StoryKeepTarget::Logout,
                other => {
                    return Err(ActionError::UnknownTarget {
                        command: "storykeep".to_string(),
                        target: other.to_string(),
                    });
                }
            }),
            other => {
                return Err(ActionError::UnknownTarget {
                    command: "goto".to_string(),
                    target: other.to_string(),
                });
            }
        };
        trace!(?action, "decoded action");
        Ok(action)
    }

    pub fn from_lexed(lexed: &Lexed) -> Result<Action, ActionError> {
        Self::from_nodes(&lexed.nodes)
    }

    /// Lex and decode in one step. Lexer recoveries are logged, not fatal.
    pub fn parse(source: &str) -> Result<Action, ActionError> {
        let lexed = storykeep::parser::lex(source, 0);
        for diagnostic in &lexed.diagnostics {
            warn!(payload = source, "{}", diagnostic.message);
        }
        Self::from_lexed(&lexed)
    }

    /// The link this action navigates to, from a page with `slug`.
    pub fn href(&self, slug: &str, is_context: bool) -> String {
        match self {
            Action::Home => "/".to_string(),
            Action::Concierge(target) => format!("/concierge/{}", target),
            Action::Context(target) => format!("/context/{}", target),
            Action::Product(target) => format!("/products/{}", target),
            Action::StoryFragment(target) => format!("/{}", target),
            Action::StoryFragmentPane { slug, pane } => format!("/{}#{}", slug, pane),
            Action::Bunny { slug: target, t } => {
                if target == slug && !is_context {
                    format!("#t={}s", format_number(*t))
                } else {
                    format!("/{}?t={}s", target, format_number(*t))
                }
            }
            Action::BunnyContext { slug: target, t } => {
                if target == slug && is_context {
                    format!("#t={}s", format_number(*t))
                } else {
                    format!("/context/{}?t={}s", target, format_number(*t))
                }
            }
            Action::Url(url) => url.clone(),
            Action::StoryKeep(target) => match target {
                StoryKeepTarget::Dashboard => "/storykeep".to_string(),
                StoryKeepTarget::Settings => "/storykeep/settings".to_string(),
                StoryKeepTarget::Login => "/storykeep/login?force=true".to_string(),
                StoryKeepTarget::Logout => "/storykeep/logout".to_string(),
            },
        }
    }
}

/// Resolve a lexed action to a URL. Anything undecodable is logged and
/// degrades to an empty href.
pub fn pre_parse_action(nodes: &[Node], slug: &str, is_context: bool) -> String {
    match Action::from_nodes(nodes) {
        Ok(action) => action.href(slug, is_context),
        Err(error) => {
            warn!(%error, payload = %display_nodes(nodes), "action misfire");
            String::new()
        }
    }
}

pub(crate) fn display_nodes(nodes: &[Node]) -> String {
    nodes.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Positional arguments of a `goto` target, 1-based as written.
struct Args<'a> {
    target: &'a str,
    args: &'a [Node],
}

impl Args<'_> {
    /// The argument at `index`, with a quoted string read as its atom.
    fn get(&self, index: usize) -> Result<&Node, ActionError> {
        self.args.get(index - 1).map(Node::unquoted).ok_or_else(|| ActionError::MissingArgument {
            target: self.target.to_string(),
            index,
        })
    }

    fn bad(&self, index: usize, expected: &'static str, got: &Node) -> ActionError {
        ActionError::BadArgument {
            target: self.target.to_string(),
            index,
            expected,
            got: got.kind_name(),
        }
    }

    /// Any atom, numbers rendered as text.
    fn text(&self, index: usize) -> Result<String, ActionError> {
        let node = self.get(index)?;
        node.to_text()
            .map(|t| t.into_owned())
            .ok_or_else(|| self.bad(index, "an atom", node))
    }

    /// A symbol, quoted or bare; numbers are rejected.
    fn string(&self, index: usize) -> Result<String, ActionError> {
        let node = self.get(index)?;
        node.as_str()
            .map(str::to_string)
            .ok_or_else(|| self.bad(index, "a string", node))
    }

    fn seconds(&self, index: usize) -> Result<f64, ActionError> {
        let node = self.get(index)?;
        match node {
            Node::Number(n, _) => Ok(*n),
            Node::Symbol(s, _) => coerce_number(s)
                .or_else(|| s.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
                .ok_or_else(|| self.bad(index, "a number of seconds", node)),
            Node::List(..) => Err(self.bad(index, "a number of seconds", node)),
        }
    }
}

/// Where an embedded-video seek lands.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BunnySeek {
    pub slug: String,
    pub t: f64,
    pub is_context: bool,
}

/// Extract the video seek from a `bunny`/`bunnyContext` action.
pub fn pre_parse_bunny(nodes: &[Node]) -> Option<BunnySeek> {
    match Action::from_nodes(nodes).ok()? {
        Action::Bunny { slug, t } => Some(BunnySeek {
            slug,
            t,
            is_context: false,
        }),
        Action::BunnyContext { slug, t } => Some(BunnySeek {
            slug,
            t,
            is_context: true,
        }),
        _ => None,
    }
}
