use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// A lexer or markdown diagnostic with source location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub severity: Severity,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn error(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError {
            message: message.into(),
            span,
            file_id,
            severity: Severity::Error,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError {
            message: message.into(),
            span,
            file_id,
            severity: Severity::Warning,
            notes: Vec::new(),
        }
    }

    /// `(` with no matching `)` before the end of input.
    pub fn unclosed_list(open_at: usize, end: usize, file_id: usize) -> Self {
        ParseError::warning("unclosed `(`", open_at..end, file_id)
            .with_note("the form was closed at the end of the expression")
    }

    /// `"` with no closing quote before the end of input.
    pub fn unterminated_string(open_at: usize, end: usize, file_id: usize) -> Self {
        ParseError::warning("unterminated string", open_at..end, file_id)
            .with_note("the string runs to the end of the expression")
    }

    /// `)` at the top level. Everything after it is ignored.
    pub fn stray_close(at: usize, end: usize, file_id: usize) -> Self {
        ParseError::warning("unmatched `)`", at..end, file_id)
            .with_note("input after this point was ignored")
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(self.severity)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}
