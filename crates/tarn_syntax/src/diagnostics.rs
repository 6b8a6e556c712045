//! Syntax diagnostics for the Tarn frontend.
//!
//! Every error the lexer or parser can detect is recoverable: the component
//! that finds it appends a [`SyntaxError`] to the run's error log and keeps
//! going. Nothing in this crate unwinds on malformed input; the driver decides
//! after the run whether the accumulated log blocks later stages.
//!
//! ## Notes
//! - [`SyntaxError`] records the `(position, kind, reporting parser)` triple.
//! - Errors implement [`miette::Diagnostic`] so the driver can render them
//!   against the source text; the stable per-kind code (for example
//!   `missing-when`) is surfaced through `Diagnostic::code`.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::lexer::tokens::Span;

/// The closed set of syntax error kinds. All are non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("missing '->' after the exit condition")]
    MissingBreakArrow,
    #[error("loop has no WHEN exit clause")]
    MissingWhen,
    #[error("missing AGAIN")]
    MissingAgain,
    #[error("missing ':='")]
    MissingColonEquals,
    #[error("missing THEN")]
    MissingThen,
    #[error("missing DO")]
    MissingDo,
    #[error("missing END")]
    MissingEnd,
    #[error("missing ';'")]
    MissingSemicolon,
    #[error("missing ')'")]
    MissingRightParen,
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
}

impl SyntaxErrorKind {
    /// Stable kebab-case identifier for this kind, used as the diagnostic
    /// code and in machine-readable output.
    pub const fn code(self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedToken => "unexpected-token",
            SyntaxErrorKind::MissingBreakArrow => "missing-break-arrow",
            SyntaxErrorKind::MissingWhen => "missing-when",
            SyntaxErrorKind::MissingAgain => "missing-again",
            SyntaxErrorKind::MissingColonEquals => "missing-colon-equals",
            SyntaxErrorKind::MissingThen => "missing-then",
            SyntaxErrorKind::MissingDo => "missing-do",
            SyntaxErrorKind::MissingEnd => "missing-end",
            SyntaxErrorKind::MissingSemicolon => "missing-semicolon",
            SyntaxErrorKind::MissingRightParen => "missing-right-paren",
            SyntaxErrorKind::InvalidNumber => "invalid-number",
            SyntaxErrorKind::InvalidCharacter => "invalid-character",
            SyntaxErrorKind::UnterminatedString => "unterminated-string",
            SyntaxErrorKind::UnterminatedComment => "unterminated-comment",
        }
    }
}

/// The component that detected and reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
    Lexer,
    Program,
    Statement,
    Compound,
    Assignment,
    If,
    While,
    Loop,
    Expression,
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseContext::Lexer => "lexer",
            ParseContext::Program => "program",
            ParseContext::Statement => "statement",
            ParseContext::Compound => "compound statement",
            ParseContext::Assignment => "assignment",
            ParseContext::If => "IF statement",
            ParseContext::While => "WHILE statement",
            ParseContext::Loop => "LOOP statement",
            ParseContext::Expression => "expression",
        };
        f.write_str(name)
    }
}

/// A recorded syntax error: position, kind, and reporting parser.
///
/// Appended to the run's error log at the point of detection; never removed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Spelling of the token at the detection point, when one was present.
    pub found: Option<String>,
    pub span: Span,
    /// 1-based source line of the detection point.
    pub line: u32,
    /// Which parser reported the error.
    pub context: ParseContext,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Span, line: u32, context: ParseContext) -> Self {
        Self {
            kind,
            found: None,
            span,
            line,
            context,
        }
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        let found = found.into();
        if !found.is_empty() {
            self.found = Some(found);
        }
        self
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = match &self.found {
            Some(found) => format!("in {}, found '{}'", self.context, found),
            None => format!("in {}", self.context),
        };
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(label),
            self.span,
        ))))
    }
}
