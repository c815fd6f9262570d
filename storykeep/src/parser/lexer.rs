use std::ops::Range;

use tracing::trace;

use crate::action::Node;
use crate::parser::error::ParseError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Lex an action expression into its top-level forms.
///
/// Single left-to-right scan over an index cursor. `(` and an opening `"`
/// recurse; whitespace, `(`, `)`, `"` and `;` end the pending bare token.
pub(super) fn lex(source: &str, file_id: usize) -> (Vec<Node>, Vec<ParseError>) {
    let mut lexer = Lexer {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        file_id,
        diagnostics: Vec::new(),
    };

    let (nodes, closed_at) = lexer.list_items();
    if let Some(at) = closed_at {
        // A `)` with nothing open ends the scan.
        trace!(at, "stray `)` at top level");
        lexer
            .diagnostics
            .push(ParseError::stray_close(at, source.len(), file_id));
    }

    (nodes, lexer.diagnostics)
}

/// Coerce a bare token to a number the way JavaScript's unary `+` does,
/// keeping only truthy results: `"0"` and anything that is NaN stay text.
pub fn coerce_number(token: &str) -> Option<f64> {
    let n = unary_plus(token.trim())?;
    if n == 0.0 || n.is_nan() { None } else { Some(n) }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    file_id: usize,
    diagnostics: Vec<ParseError>,
}

impl Lexer<'_> {
    /// Collect items until the matching `)` (returned as its offset) or the
    /// end of input (`None`).
    fn list_items(&mut self) -> (Vec<Node>, Option<usize>) {
        let mut items = Vec::new();
        let mut token_start: Option<usize> = None;

        while self.pos < self.bytes.len() {
            let at = self.pos;
            match self.bytes[at] {
                b'(' => {
                    self.flush(&mut token_start, at, &mut items);
                    self.pos += 1;
                    let (children, closed_at) = self.list_items();
                    let end = match closed_at {
                        Some(close) => close + 1,
                        None => {
                            trace!(at, "unclosed list");
                            self.diagnostics.push(ParseError::unclosed_list(
                                at,
                                self.src.len(),
                                self.file_id,
                            ));
                            self.src.len()
                        }
                    };
                    items.push(Node::List(children, at..end));
                }
                b')' => {
                    self.flush(&mut token_start, at, &mut items);
                    self.pos += 1;
                    return (items, Some(at));
                }
                b'"' => {
                    self.flush(&mut token_start, at, &mut items);
                    items.push(self.string(at));
                }
                b';' => {
                    self.flush(&mut token_start, at, &mut items);
                    self.skip_comment();
                }
                b if b.is_ascii_whitespace() => {
                    self.flush(&mut token_start, at, &mut items);
                    self.pos += 1;
                }
                _ => {
                    token_start.get_or_insert(at);
                    self.pos += 1;
                }
            }
        }

        let end = self.bytes.len();
        self.flush(&mut token_start, end, &mut items);
        (items, None)
    }

    /// Read a string whose opening quote is at `open`. No escapes: the
    /// string ends at the next `"`. The body is one token, whitespace
    /// included, flushed into its own list with the usual coercion, so
    /// `"42"` lexes like `(42)` and `""` like `()`.
    fn string(&mut self, open: usize) -> Node {
        let body_start = open + 1;
        let (body_end, end) = match self.bytes[body_start..].iter().position(|&b| b == b'"') {
            Some(len) => (body_start + len, body_start + len + 1),
            None => {
                trace!(open, "unterminated string");
                self.diagnostics.push(ParseError::unterminated_string(
                    open,
                    self.src.len(),
                    self.file_id,
                ));
                (self.src.len(), self.src.len())
            }
        };
        self.pos = end;

        let mut items = Vec::with_capacity(1);
        let mut token_start = (body_end > body_start).then_some(body_start);
        self.flush(&mut token_start, body_end, &mut items);
        Node::List(items, open..end)
    }

    fn skip_comment(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn flush(&self, token_start: &mut Option<usize>, end: usize, items: &mut Vec<Node>) {
        if let Some(start) = token_start.take() {
            items.push(atom(&self.src[start..end], start..end));
        }
    }
}

fn atom(text: &str, span: Range<usize>) -> Node {
    match coerce_number(text) {
        Some(n) => Node::Number(n, span),
        None => Node::Symbol(text.to_string(), span),
    }
}

/// `+token` for the forms a bare token can take. `None` stands for NaN.
fn unary_plus(token: &str) -> Option<f64> {
    match token {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = token.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            // Folded into an f64 so literals past u64::MAX stay finite.
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }

    // Rust also accepts `inf`, `nan` and friends; JavaScript does not.
    if !token
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    token.parse::<f64>().ok()
}
