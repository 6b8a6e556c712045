#![no_main]

use libfuzzer_sys::fuzz_target;
use tarn::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Lexing and parsing are both total: they log errors instead of
        // failing, so the only thing to find here is a panic.
        let lexed = lexer::lex(s);
        let _ = parser::parse(&lexed.tokens);
    }
});
