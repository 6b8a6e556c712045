//! Parser for the Tarn programming language.
//!
//! Converts a token stream into an intermediate-code tree. The parser is
//! single-pass, never backtracks, and never aborts: every structural problem
//! is recorded in the run's error log and parsing resumes at the nearest
//! recovery point, so a malformed file still produces a usable tree plus a
//! complete list of diagnostics.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use tarn_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex("x := 1");
//! let parsed = parser::parse(&lexed.tokens);
//! assert!(lexed.errors.is_empty() && parsed.errors.is_empty());
//! ```

use crate::diagnostics::{ParseContext, SyntaxError, SyntaxErrorKind};
use crate::icode::{AttrKey, AttrValue, ICode, NodeId, NodeKind};
use crate::lexer::tokens::{Span, Token, TokenKind, TokenSet};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/sets.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
