//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use miette::NamedSource;
use tarn_syntax::diagnostics::SyntaxError;
use tarn_syntax::icode::{ICode, NodeId};
use tarn_syntax::{lexer, parser};

use super::{CliResult, CliError, ExitCode};

/// A source file taken through the full syntax frontend.
struct ParsedFile {
    source: String,
    icode: ICode,
    root: NodeId,
    /// Lexer and parser errors merged in source order.
    errors: Vec<SyntaxError>,
}

/// Read, lex, and parse one source file.
fn load_and_parse(path: &Path) -> CliResult<ParsedFile> {
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("cannot read {}: {e}", path.display())))?;

    let lexed = lexer::lex(&source);
    let parsed = parser::parse(&lexed.tokens);
    tracing::debug!(
        tokens = lexed.tokens.len(),
        nodes = parsed.icode.len(),
        lex_errors = lexed.errors.len(),
        parse_errors = parsed.errors.len(),
        "frontend run finished"
    );

    let mut errors = lexed.errors;
    errors.extend(parsed.errors);
    errors.sort_by_key(|e| e.span.start);

    Ok(ParsedFile {
        source,
        icode: parsed.icode,
        root: parsed.root,
        errors,
    })
}

/// Render every diagnostic against the source it came from.
fn report_errors(path: &Path, parsed: &ParsedFile) {
    let name = path.display().to_string();
    for error in &parsed.errors {
        let report = miette::Report::new(error.clone())
            .with_source_code(NamedSource::new(&name, parsed.source.clone()));
        eprintln!("{report:?}");
    }
}

/// `tarn check <file>`: parse and report syntax diagnostics.
pub fn check_file(path: &Path) -> CliResult<ExitCode> {
    let parsed = load_and_parse(path)?;

    if parsed.errors.is_empty() {
        println!("{}: ok", path.display());
        Ok(ExitCode::SUCCESS)
    } else {
        report_errors(path, &parsed);
        eprintln!(
            "{}: {} syntax error(s)",
            path.display(),
            parsed.errors.len()
        );
        Ok(ExitCode::FAILURE)
    }
}

/// `tarn tree <file>`: parse and print the intermediate-code tree.
///
/// The tree goes to stdout; diagnostics, if any, go to stderr. The tree is
/// printed even for malformed input, since error recovery always produces a
/// structurally valid tree.
pub fn tree_file(path: &Path) -> CliResult<ExitCode> {
    let parsed = load_and_parse(path)?;

    println!("{}", parsed.icode.dump(parsed.root));

    if parsed.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        report_errors(path, &parsed);
        Ok(ExitCode::FAILURE)
    }
}
