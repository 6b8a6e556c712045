/// Statement dispatch and the per-construct statement parsers.
///
/// `statement()` is the single polymorphic decision point: it selects the
/// construct parser whose grammar starts with the current token kind. Each
/// construct parser consumes its own grammar fragment, recursing back into
/// `statement()` for nested statements and into `expression()` for
/// conditions, and returns one intermediate-tree subtree.
impl<'a> Parser<'a> {
    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Parse one statement, selected by the current token's kind.
    ///
    /// When no construct matches, an `UnexpectedToken` error is recorded and
    /// a placeholder node of the neutral `Error` kind is returned without
    /// consuming anything, so callers keep a structurally valid tree and the
    /// enclosing list guarantees forward progress.
    fn statement(&mut self) -> NodeId {
        let line = self.current_line();
        let node = match self.peek().kind {
            TokenKind::Begin => self.compound_statement(),
            TokenKind::Identifier => self.assignment_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Loop => self.loop_statement(),
            TokenKind::Semicolon => {
                // Empty statement; the separator itself is left for the caller.
                let span = self.current_span();
                self.icode.node(NodeKind::NoOp, span)
            }
            _ => {
                self.flag(SyntaxErrorKind::UnexpectedToken, ParseContext::Statement);
                let span = self.current_span();
                self.icode.node(NodeKind::Error, span)
            }
        };
        self.icode.set_attr(node, AttrKey::Line, AttrValue::Integer(i64::from(line)));
        node
    }

    /// Parse a statement list terminated by `terminator`, appending each
    /// statement to `parent`.
    ///
    /// Shared by the compound statement (`END` terminator) and the top level
    /// (`.` terminator, where `missing` is `None` because end of input is a
    /// legitimate finish). The loop synchronizes after every statement and
    /// forces a one-token advance whenever an iteration consumed nothing.
    fn statement_list(
        &mut self,
        parent: NodeId,
        terminator: TokenKind,
        missing: Option<SyntaxErrorKind>,
        context: ParseContext,
    ) {
        let recovery = STMT_START_SET.union(STMT_FOLLOW_SET).with(terminator);

        while !self.check(terminator) && !self.is_at_end() {
            let before = self.pos;

            let stmt = self.statement();
            self.icode.add_child(parent, stmt);

            if self.check(TokenKind::Semicolon) {
                self.advance();
            } else if STMT_START_SET.contains(self.peek().kind) {
                // Two statements abut with no separator between them.
                self.flag(SyntaxErrorKind::MissingSemicolon, context);
            }

            self.synchronize(recovery);
            if self.pos == before {
                self.advance();
            }
        }

        if self.check(terminator) {
            self.advance();
        } else if let Some(missing) = missing {
            self.flag(missing, context);
        }
    }

    // ========================================================================
    // Per-construct parsers
    // ========================================================================

    /// `BEGIN stmt-list END`
    fn compound_statement(&mut self) -> NodeId {
        let span = self.current_span();
        self.advance(); // consume the BEGIN
        let node = self.icode.node(NodeKind::Compound, span);
        self.statement_list(
            node,
            TokenKind::End,
            Some(SyntaxErrorKind::MissingEnd),
            ParseContext::Compound,
        );
        node
    }

    /// `ident := expr`
    fn assignment_statement(&mut self) -> NodeId {
        let span = self.current_span();
        let name = self.peek().text.clone();
        self.advance(); // consume the identifier

        let variable = self.icode.node(NodeKind::Variable, span);
        self.icode.set_attr(variable, AttrKey::Id, AttrValue::Str(name));

        let assign = self.icode.node(NodeKind::Assign, span);
        self.icode.add_child(assign, variable);

        if !self.match_kind(TokenKind::ColonEquals) {
            self.flag(SyntaxErrorKind::MissingColonEquals, ParseContext::Assignment);
        }

        let value = self.expression();
        self.icode.add_child(assign, value);
        assign
    }

    /// `IF expr THEN stmt [ELSE stmt]`
    fn if_statement(&mut self) -> NodeId {
        let span = self.current_span();
        self.advance(); // consume the IF
        let node = self.icode.node(NodeKind::If, span);

        let condition = self.expression();
        self.icode.add_child(node, condition);

        // Land on THEN even if the condition left the cursor elsewhere.
        self.synchronize(IF_THEN_SET);
        if !self.match_kind(TokenKind::Then) {
            self.flag(SyntaxErrorKind::MissingThen, ParseContext::If);
        }

        let then_branch = self.statement();
        self.icode.add_child(node, then_branch);

        if self.match_kind(TokenKind::Else) {
            let else_branch = self.statement();
            self.icode.add_child(node, else_branch);
        }

        node
    }

    /// `WHILE expr DO stmt`
    ///
    /// Lowered to the same `Loop`/`Test` shape the interpreter executes for
    /// every loop: the guard under `Test` is the *negated* condition, so the
    /// loop exits exactly when `expr` turns false.
    fn while_statement(&mut self) -> NodeId {
        let span = self.current_span();
        self.advance(); // consume the WHILE

        let loop_node = self.icode.node(NodeKind::Loop, span);
        let test_node = self.icode.node(NodeKind::Test, span);
        let not_node = self.icode.node(NodeKind::Not, span);
        self.icode.add_child(loop_node, test_node);
        self.icode.add_child(test_node, not_node);

        let condition = self.expression();
        self.icode.add_child(not_node, condition);

        self.synchronize(WHILE_DO_SET);
        if !self.match_kind(TokenKind::Do) {
            self.flag(SyntaxErrorKind::MissingDo, ParseContext::While);
        }

        let body = self.statement();
        self.icode.add_child(loop_node, body);
        loop_node
    }

    /// `LOOP (stmt | WHEN expr ->)* AGAIN`
    ///
    /// The body interleaves ordinary statements with guarded-exit clauses.
    /// All guard conditions accumulate under one shared `Test` node, attached
    /// to the loop at the first clause; `attach_unique` keeps later clauses
    /// from attaching it again.
    fn loop_statement(&mut self) -> NodeId {
        let span = self.current_span();
        self.advance(); // consume the LOOP
        let loop_node = self.icode.node(NodeKind::Loop, span);
        let mut test_node: Option<NodeId> = None;

        while !self.check(TokenKind::Again) && !self.is_at_end() {
            let before = self.pos;

            if self.check(TokenKind::When) {
                let when_span = self.current_span();
                self.advance(); // consume the WHEN

                let test = *test_node.get_or_insert_with(|| self.icode.node(NodeKind::Test, when_span));
                let condition = self.expression();
                self.icode.add_child(test, condition);
                self.icode.attach_unique(loop_node, test);

                // The exit arrow is mandatory. When it is missing, recovery
                // continues from the current token; nothing is consumed for it.
                if !self.match_kind(TokenKind::BreakArrow) {
                    self.flag(SyntaxErrorKind::MissingBreakArrow, ParseContext::Loop);
                }
            } else {
                let stmt = self.statement();
                self.icode.add_child(loop_node, stmt);
                self.match_kind(TokenKind::Semicolon);
            }

            // The body can never iterate without consuming at least one token,
            // even when a sub-parser made no net progress.
            if self.pos == before {
                self.advance();
            }
        }

        // A loop with no exit condition is accepted structurally but flagged.
        if test_node.is_none_or(|test| self.icode.children(test).is_empty()) {
            self.flag(SyntaxErrorKind::MissingWhen, ParseContext::Loop);
        }

        self.synchronize(LOOP_AGAIN_SET);
        if self.check(TokenKind::Again) {
            self.advance();
        } else {
            self.flag(SyntaxErrorKind::MissingAgain, ParseContext::Loop);
        }

        loop_node
    }
}
