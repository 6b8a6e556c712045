/// Expression parsing methods.
///
/// The grammar is the classic ladder: `expression` is a simple expression
/// optionally followed by one relational operator, a simple expression is a
/// signed sequence of terms under additive operators, and a term is a
/// sequence of factors under multiplicative operators.
///
/// Like the statement parsers, expression parsing never fails: a malformed
/// factor records `UnexpectedToken` and yields an `Error`-kind node without
/// consuming, leaving recovery to the enclosing statement machinery.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> NodeId {
        let left = self.simple_expression();

        let kind = match self.peek().kind {
            TokenKind::Equals => NodeKind::Eq,
            TokenKind::NotEquals => NodeKind::Ne,
            TokenKind::Lt => NodeKind::Lt,
            TokenKind::LtEq => NodeKind::Le,
            TokenKind::Gt => NodeKind::Gt,
            TokenKind::GtEq => NodeKind::Ge,
            _ => return left,
        };
        let span = self.current_span();
        self.advance();

        let node = self.icode.node(kind, span);
        let right = self.simple_expression();
        self.icode.add_child(node, left);
        self.icode.add_child(node, right);
        node
    }

    fn simple_expression(&mut self) -> NodeId {
        // Leading sign: a unary plus is dropped, a unary minus becomes Negate.
        let mut left = match self.peek().kind {
            TokenKind::Plus => {
                self.advance();
                self.term()
            }
            TokenKind::Minus => {
                let span = self.current_span();
                self.advance();
                let node = self.icode.node(NodeKind::Negate, span);
                let operand = self.term();
                self.icode.add_child(node, operand);
                node
            }
            _ => self.term(),
        };

        loop {
            let kind = match self.peek().kind {
                TokenKind::Plus => NodeKind::Add,
                TokenKind::Minus => NodeKind::Subtract,
                TokenKind::Or => NodeKind::Or,
                _ => break,
            };
            let span = self.current_span();
            self.advance();

            let node = self.icode.node(kind, span);
            let right = self.term();
            self.icode.add_child(node, left);
            self.icode.add_child(node, right);
            left = node;
        }

        left
    }

    fn term(&mut self) -> NodeId {
        let mut left = self.factor();

        loop {
            let kind = match self.peek().kind {
                TokenKind::Star => NodeKind::Multiply,
                TokenKind::Slash => NodeKind::FloatDivide,
                TokenKind::Div => NodeKind::IntegerDivide,
                TokenKind::Mod => NodeKind::Modulo,
                TokenKind::And => NodeKind::And,
                _ => break,
            };
            let span = self.current_span();
            self.advance();

            let node = self.icode.node(kind, span);
            let right = self.factor();
            self.icode.add_child(node, left);
            self.icode.add_child(node, right);
            left = node;
        }

        left
    }

    fn factor(&mut self) -> NodeId {
        let span = self.current_span();
        match self.peek().kind {
            TokenKind::Identifier => {
                let name = self.peek().text.clone();
                self.advance();
                let node = self.icode.node(NodeKind::Variable, span);
                self.icode.set_attr(node, AttrKey::Id, AttrValue::Str(name));
                node
            }
            TokenKind::IntegerLiteral | TokenKind::RealLiteral | TokenKind::StringLiteral => {
                let kind = match self.peek().kind {
                    TokenKind::IntegerLiteral => NodeKind::IntegerConstant,
                    TokenKind::RealLiteral => NodeKind::RealConstant,
                    _ => NodeKind::StringConstant,
                };
                let value = self.peek().value.clone();
                self.advance();
                let node = self.icode.node(kind, span);
                if let Some(value) = value {
                    self.icode.set_attr(node, AttrKey::Value, value.into());
                }
                node
            }
            TokenKind::Not => {
                self.advance();
                let node = self.icode.node(NodeKind::Not, span);
                let operand = self.factor();
                self.icode.add_child(node, operand);
                node
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression();
                if !self.match_kind(TokenKind::RightParen) {
                    self.flag(SyntaxErrorKind::MissingRightParen, ParseContext::Expression);
                }
                inner
            }
            _ => {
                self.flag(SyntaxErrorKind::UnexpectedToken, ParseContext::Expression);
                self.icode.node(NodeKind::Error, span)
            }
        }
    }
}
