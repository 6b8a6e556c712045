//! Lexer for the Tarn programming language.
//!
//! Handles tokenization including:
//! - Case-insensitive keywords (`begin`, `loop`, `when`, `again`, ...)
//! - Identifiers and literals (integer, real, quoted string)
//! - Special symbols (`:=`, `<>`, `<=`, `>=`, `->`, ...)
//! - Brace comments `{ ... }`
//!
//! Lexing never aborts: an unclassifiable lexeme becomes a
//! [`TokenKind::Error`] token, the problem is logged as a [`SyntaxError`]
//! with context [`ParseContext::Lexer`], and scanning continues. The token
//! stream always ends with an `Eof` token.

pub mod tokens;

pub use tokens::{Span, Token, TokenKind, TokenSet, TokenValue, keyword_kind};

use crate::diagnostics::{ParseContext, SyntaxError, SyntaxErrorKind};

/// Result of a lex run: the token stream plus any recoverable errors.
#[derive(Debug, Clone, PartialEq)]
pub struct LexOutcome {
    pub tokens: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

/// Tokenize `source` into a [`LexOutcome`].
pub fn lex(source: &str) -> LexOutcome {
    Lexer::new(source).tokenize()
}

/// Lexer state: a cursor over the source characters plus the output buffers.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: u32,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scan the entire source.
    pub fn tokenize(mut self) -> LexOutcome {
        while let Some(&(start, c)) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.chars.next();
                }
                '\n' => {
                    self.line += 1;
                    self.chars.next();
                }
                '{' => self.skip_comment(start),
                '\'' => self.scan_string(start),
                c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(start),
                c if c.is_ascii_digit() => self.scan_number(start),
                _ => self.scan_symbol(start, c),
            }
        }

        self.tokens.push(Token::eof(self.source.len(), self.line));
        LexOutcome {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Scanners
    // ========================================================================

    fn scan_word(&mut self, start: usize) {
        let end = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = &self.source[start..end];
        let kind = keyword_kind(text).unwrap_or(TokenKind::Identifier);
        self.push(kind, start, end, None);
    }

    fn scan_number(&mut self, start: usize) {
        let mut end = self.take_while(|c| c.is_ascii_digit());
        let mut is_real = false;

        // Fraction: a '.' counts only when a digit follows, so a trailing
        // program period after a number still lexes as its own token.
        if self.peek_char() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.chars.next();
            end = self.take_while(|c| c.is_ascii_digit());
            is_real = true;
        }

        // Exponent.
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let exp_ok = match self.peek_second() {
                Some('+' | '-') => self.peek_third().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exp_ok {
                self.chars.next();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.chars.next();
                }
                end = self.take_while(|c| c.is_ascii_digit());
                is_real = true;
            }
        }

        let text = &self.source[start..end];
        if is_real {
            match text.parse::<f64>() {
                Ok(value) => self.push(TokenKind::RealLiteral, start, end, Some(TokenValue::Real(value))),
                Err(_) => self.flag_lexeme(SyntaxErrorKind::InvalidNumber, start, end),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => self.push(TokenKind::IntegerLiteral, start, end, Some(TokenValue::Integer(value))),
                Err(_) => self.flag_lexeme(SyntaxErrorKind::InvalidNumber, start, end),
            }
        }
    }

    fn scan_string(&mut self, start: usize) {
        self.chars.next(); // opening quote
        let mut value = String::new();
        loop {
            match self.chars.peek().copied() {
                None | Some((_, '\n')) => {
                    // String ends at the line break or end of input.
                    let end = self.current_offset();
                    self.flag_lexeme(SyntaxErrorKind::UnterminatedString, start, end);
                    return;
                }
                Some((i, '\'')) => {
                    self.chars.next();
                    // A doubled quote is an embedded quote.
                    if self.peek_char() == Some('\'') {
                        self.chars.next();
                        value.push('\'');
                    } else {
                        self.push(TokenKind::StringLiteral, start, i + 1, Some(TokenValue::Str(value)));
                        return;
                    }
                }
                Some((_, c)) => {
                    self.chars.next();
                    value.push(c);
                }
            }
        }
    }

    fn scan_symbol(&mut self, start: usize, c: char) {
        self.chars.next();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => {
                if self.eat('>') {
                    TokenKind::BreakArrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equals,
            '<' => {
                if self.eat('=') {
                    TokenKind::LtEq
                } else if self.eat('>') {
                    TokenKind::NotEquals
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            ':' => {
                if self.eat('=') {
                    TokenKind::ColonEquals
                } else {
                    let end = self.current_offset();
                    self.flag_lexeme(SyntaxErrorKind::InvalidCharacter, start, end);
                    return;
                }
            }
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            _ => {
                let end = self.current_offset();
                self.flag_lexeme(SyntaxErrorKind::InvalidCharacter, start, end);
                return;
            }
        };
        let end = self.current_offset();
        self.push(kind, start, end, None);
    }

    fn skip_comment(&mut self, start: usize) {
        self.chars.next(); // '{'
        loop {
            match self.chars.next() {
                Some((_, '}')) => return,
                Some((_, '\n')) => self.line += 1,
                Some(_) => {}
                None => {
                    let end = self.source.len();
                    self.errors.push(
                        SyntaxError::new(
                            SyntaxErrorKind::UnterminatedComment,
                            Span::new(start, end),
                            self.line,
                            ParseContext::Lexer,
                        ),
                    );
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Lookahead past the current character without consuming anything.
    fn peek_second(&self) -> Option<char> {
        let mut clone = self.chars.clone();
        clone.next();
        clone.next().map(|(_, c)| c)
    }

    fn peek_third(&self) -> Option<char> {
        let mut clone = self.chars.clone();
        clone.next();
        clone.next();
        clone.next().map(|(_, c)| c)
    }

    /// Consume the next character if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds; returns the end offset.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            self.chars.next();
        }
        self.current_offset()
    }

    /// Byte offset of the next unconsumed character.
    fn current_offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize, value: Option<TokenValue>) {
        let mut token = Token::new(kind, &self.source[start..end], Span::new(start, end), self.line);
        if let Some(value) = value {
            token = token.with_value(value);
        }
        self.tokens.push(token);
    }

    /// Log an error for the lexeme and emit an `Error` token in its place.
    fn flag_lexeme(&mut self, kind: SyntaxErrorKind, start: usize, end: usize) {
        let text = &self.source[start..end];
        self.errors.push(
            SyntaxError::new(kind, Span::new(start, end), self.line, ParseContext::Lexer)
                .with_found(text),
        );
        self.push(TokenKind::Error, start, end, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_keywords_case_insensitively() {
        assert_eq!(
            kinds("LOOP loop Loop"),
            vec![TokenKind::Loop, TokenKind::Loop, TokenKind::Loop, TokenKind::Eof]
        );
    }

    #[test]
    fn scans_special_symbols() {
        assert_eq!(
            kinds(":= <> <= >= -> < > = ;"),
            vec![
                TokenKind::ColonEquals,
                TokenKind::NotEquals,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::BreakArrow,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Equals,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_numbers_with_values() {
        let out = lex("42 3.5 2e3");
        assert!(out.errors.is_empty());
        assert_eq!(out.tokens[0].value, Some(TokenValue::Integer(42)));
        assert_eq!(out.tokens[1].value, Some(TokenValue::Real(3.5)));
        assert_eq!(out.tokens[2].value, Some(TokenValue::Real(2000.0)));
    }

    #[test]
    fn number_followed_by_program_period() {
        // `1.` must lex as an integer then a Dot, not a malformed real.
        assert_eq!(
            kinds("x := 1."),
            vec![
                TokenKind::Identifier,
                TokenKind::ColonEquals,
                TokenKind::IntegerLiteral,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_string_with_embedded_quote() {
        let out = lex("'don''t'");
        assert!(out.errors.is_empty());
        assert_eq!(out.tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(out.tokens[0].value, Some(TokenValue::Str("don't".into())));
    }

    #[test]
    fn unterminated_string_is_recoverable() {
        let out = lex("'abc\nx := 1");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, SyntaxErrorKind::UnterminatedString);
        assert_eq!(out.errors[0].context, ParseContext::Lexer);
        // Scanning continued on the next line.
        assert!(out.tokens.iter().any(|t| t.kind == TokenKind::ColonEquals));
    }

    #[test]
    fn invalid_character_becomes_error_token() {
        let out = lex("x @ y");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, SyntaxErrorKind::InvalidCharacter);
        assert_eq!(
            out.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Identifier, TokenKind::Error, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let out = lex("{ first\nline }\nx := 1");
        assert!(out.errors.is_empty());
        assert_eq!(out.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(out.tokens[0].line, 3);
    }

    #[test]
    fn unterminated_comment_is_flagged() {
        let out = lex("x { never closed");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, SyntaxErrorKind::UnterminatedComment);
    }

    #[test]
    fn spans_cover_the_lexeme() {
        let out = lex("when x");
        assert_eq!(out.tokens[0].span, Span::new(0, 4));
        assert_eq!(out.tokens[1].span, Span::new(5, 6));
        assert_eq!(out.tokens[2].span, Span::new(6, 6));
    }

    #[test]
    fn empty_source_yields_lone_eof() {
        let out = lex("");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::Eof);
    }
}
