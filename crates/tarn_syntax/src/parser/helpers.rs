/// Token-stream helpers, error reporting, and recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Kind checks and conditional consumption (`check`, `match_kind`)
/// - Error reporting (`flag`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if self.pos < self.tokens.len() && !self.is_at_end() {
            self.pos += 1;
        }
        self.tokens.get(self.pos.saturating_sub(1)).unwrap_or(&self.eof)
    }

    /// Return `true` if the current token has the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// If the current token has the given kind, consume it and return `true`.
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn current_line(&self) -> u32 {
        self.peek().line
    }

    // ========================================================================
    // Error reporting
    // ========================================================================

    /// Record a syntax error at the current token.
    ///
    /// Reporting is a pure side effect on the run's error log; it never
    /// unwinds, and the caller decides how to continue. Several flags for the
    /// same construct are expected under cascading malformed input.
    fn flag(&mut self, kind: SyntaxErrorKind, context: ParseContext) {
        let token = self.peek();
        let (span, line, found) = (token.span, token.line, token.text.clone());
        tracing::debug!(
            code = kind.code(),
            context = %context,
            line,
            found = %found,
            "recorded syntax error"
        );
        self.errors.push(SyntaxError::new(kind, span, line, context).with_found(found));
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Discard tokens until the current token belongs to `set` or input is
    /// exhausted.
    ///
    /// On return the current token is either a member of `set` or `Eof`;
    /// callers must handle both. Termination is bounded by the remaining
    /// input length.
    fn synchronize(&mut self, set: TokenSet) {
        let mut discarded = 0usize;
        while !self.is_at_end() && !set.contains(self.peek().kind) {
            self.advance();
            discarded += 1;
        }
        if discarded > 0 {
            tracing::debug!(discarded, "synchronized past unparsable tokens");
        }
    }
}
