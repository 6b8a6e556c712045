/// Token classification sets shared across the statement parsers.
///
/// Each set is a [`TokenSet`] built in `const` context from the two shared
/// base sets plus the terminator kind(s) of the construct being parsed.
/// Construction is a pure function of the listed kinds, so the sets are
/// immutable for the life of the process and safe to share between
/// independent parse runs.

/// Token kinds that can start a statement.
pub const STMT_START_SET: TokenSet = TokenSet::of(&[
    TokenKind::Begin,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Loop,
    TokenKind::Identifier,
    TokenKind::Semicolon,
]);

/// Token kinds that naturally follow a statement.
pub const STMT_FOLLOW_SET: TokenSet = TokenSet::of(&[
    TokenKind::Semicolon,
    TokenKind::End,
    TokenKind::Else,
    TokenKind::Again,
    TokenKind::Dot,
]);

/// Recovery set for the `LOOP` construct: anything that can start or follow a
/// statement, plus the loop's own terminator.
pub const LOOP_AGAIN_SET: TokenSet = STMT_START_SET.union(STMT_FOLLOW_SET).with(TokenKind::Again);

/// Recovery set used to land on `THEN` after an `IF` condition.
pub const IF_THEN_SET: TokenSet = STMT_START_SET.union(STMT_FOLLOW_SET).with(TokenKind::Then);

/// Recovery set used to land on `DO` after a `WHILE` condition.
pub const WHILE_DO_SET: TokenSet = STMT_START_SET.union(STMT_FOLLOW_SET).with(TokenKind::Do);
