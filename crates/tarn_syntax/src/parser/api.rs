/// Parse a token stream into an intermediate-code tree.
///
/// This is the main public entrypoint for parsing. It always returns: every
/// detected problem is recorded in [`ParseOutcome::errors`] rather than
/// aborting the run, and the returned tree is structurally valid even for
/// badly malformed input.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `tarn_syntax::lexer`.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    Parser::new(tokens).parse()
}
