#![forbid(unsafe_code)]
//! Syntax frontend for the Tarn language: lexer, parser, intermediate code, diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler driver and
//! future tooling.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do symbol resolution, type
//!   checking, or interpretation. The intermediate-code tree it produces is an in-memory
//!   handoff to those stages.
//! - Everything the lexer and parser can detect is recoverable: errors accumulate in the
//!   run's log and a structurally valid tree always comes back.
//!
//! ## Examples
//! ```rust,no_run
//! use tarn_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex("loop i := i + 1; when i > 10 -> again");
//! let parsed = parser::parse(&lexed.tokens);
//! assert!(lexed.errors.is_empty() && parsed.errors.is_empty());
//! ```

pub mod diagnostics;
pub mod icode;
pub mod lexer;
pub mod parser;
