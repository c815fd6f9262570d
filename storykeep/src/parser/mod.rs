pub mod error;
mod lexer;
mod markdown;

pub use error::ParseError;
pub use lexer::coerce_number;

use crate::Lexed;
use crate::document::Document;

/// Parser entry point for action expressions and markdown fragments.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: impl Into<String>, file_id: usize) -> Self {
        Parser {
            source: source.into(),
            file_id,
        }
    }

    /// Lex the source as an action expression.
    pub fn lex_action(&self) -> Lexed {
        lex(&self.source, self.file_id)
    }

    /// Parse the source as a markdown fragment.
    pub fn parse_markdown(&self) -> Document {
        markdown::parse_document(&self.source)
    }
}

/// Lex an action expression such as `(goto (storyFragment about))`.
pub fn lex(source: &str, file_id: usize) -> Lexed {
    let (nodes, diagnostics) = lexer::lex(source, file_id);
    Lexed {
        nodes,
        diagnostics,
        source_id: file_id,
    }
}

/// Parse a markdown fragment into a [`Document`].
pub fn parse_markdown(source: &str) -> Document {
    markdown::parse_document(source)
}
