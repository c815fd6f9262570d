pub mod action;
pub mod document;
pub mod parser;
pub mod payload;

use crate::action::Node;
use crate::parser::ParseError;

/// The result of lexing an action expression.
///
/// Lexing never fails outright: malformed input is recovered from and the
/// recoveries are reported as warnings alongside the tree.
#[derive(Debug, Clone)]
pub struct Lexed {
    /// Top-level forms, in source order.
    pub nodes: Vec<Node>,
    /// Warnings produced while recovering from malformed input.
    pub diagnostics: Vec<ParseError>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}

impl Lexed {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
