/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the [`ParseOutcome`] it produces,
/// and the top-level `parse()` driver loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
/// - The cursor only ever moves forward. Every loop in the parser either
///   consumes at least one token per iteration or forces an advance when a
///   sub-parser made no net progress.

/// Result of a parse run: the node arena, the root of the tree, and every
/// error detected along the way.
///
/// The tree is always structurally valid; callers inspect `errors` to decide
/// whether downstream stages should run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub icode: ICode,
    pub root: NodeId,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    /// `true` when no error was recorded during the run.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parser state.
///
/// ## Notes
/// - The parser is intentionally single-pass and recovers from errors by
///   synchronizing on shared token-classification sets (see `sets`).
/// - Most parsing helpers are implemented on `Parser` but split across
///   multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Fallback token returned once the slice is exhausted, so a stream that
    /// does not end in `Eof` still terminates cleanly.
    eof: Token,
    icode: ICode,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `tarn_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token::eof(last.span.end, last.line),
            None => Token::eof(0, 1),
        };
        Self {
            tokens,
            pos: 0,
            eof,
            icode: ICode::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream.
    ///
    /// The top level is a statement list running to end of input; a trailing
    /// `.` (old-style program terminator) is accepted and consumed but not
    /// required. The returned root is a `Compound` node.
    pub fn parse(mut self) -> ParseOutcome {
        let root = self.icode.node(NodeKind::Compound, self.current_span());
        self.statement_list(root, TokenKind::Dot, None, ParseContext::Program);
        ParseOutcome {
            icode: self.icode,
            root,
            errors: self.errors,
        }
    }
}
