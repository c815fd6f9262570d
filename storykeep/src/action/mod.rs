use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// A node of a lexed action expression.
///
/// Action expressions are pure prefix-call trees: `(goto (storyFragment about))`
/// lexes to a `List` holding the symbol `goto` and a nested `List`.
#[derive(Debug, Clone)]
pub enum Node {
    /// A bare token that coerced to a number.
    Number(f64, Range<usize>),
    /// A bare token that did not coerce to a number.
    Symbol(String, Range<usize>),
    /// A parenthesised form. A double-quoted string lexes to a list holding
    /// its body as one atom.
    List(Vec<Node>, Range<usize>),
}

/// Equality ignores spans.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Number(a, _), Node::Number(b, _)) => a == b,
            (Node::Symbol(a, _), Node::Symbol(b, _)) => a == b,
            (Node::List(a, _), Node::List(b, _)) => a == b,
            _ => false,
        }
    }
}

impl Node {
    pub fn span(&self) -> &Range<usize> {
        match self {
            Node::Number(_, span)
            | Node::Symbol(_, span)
            | Node::List(_, span) => span,
        }
    }

    /// The atom a one-item list wraps, as a quoted string lexes; any other
    /// node as it is.
    pub fn unquoted(&self) -> &Node {
        match self {
            Node::List(items, _) if items.len() == 1 && !matches!(items[0], Node::List(..)) => &items[0],
            _ => self,
        }
    }

    /// Symbol contents. Numbers are not text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Symbol(s, _) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(n, _) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items, _) => Some(items),
            _ => None,
        }
    }

    /// Render an atom the way it reads when interpolated into a URL.
    /// Numbers print without a trailing `.0`; lists have no text form.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Node::Symbol(s, _) => Some(Cow::Borrowed(s)),
            Node::Number(n, _) => Some(Cow::Owned(format_number(*n))),
            Node::List(..) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Number(..) => "number",
            Node::Symbol(..) => "symbol",
            Node::List(..) => "list",
        }
    }
}

/// Format a number the way JavaScript's `String(n)` does for the values
/// that appear in payloads: integral values drop the fraction.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n.is_finite() && n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n, _) => write!(f, "{}", format_number(*n)),
            Node::Symbol(s, _) => write!(f, "{}", s),
            Node::List(items, _) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
