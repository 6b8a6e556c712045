//! Integration tests for the Tarn syntax frontend
//!
//! These run whole source files through the lexer and parser via the public
//! API and check the combined error log and the resulting tree, the same way
//! the CLI driver consumes the frontend.

use tarn::diagnostics::{ParseContext, SyntaxError, SyntaxErrorKind};
use tarn::icode::NodeKind;
use tarn::parser::ParseOutcome;
use tarn::{lexer, parser};

/// Run the full pipeline and merge lexer + parser errors in source order.
fn compile(source: &str) -> (ParseOutcome, Vec<SyntaxError>) {
    let lexed = lexer::lex(source);
    let parsed = parser::parse(&lexed.tokens);
    let mut errors = lexed.errors;
    errors.extend(parsed.errors.clone());
    errors.sort_by_key(|e| e.span.start);
    (parsed, errors)
}

#[test]
fn test_well_formed_program_is_clean() {
    let source = "\
{ accumulate until the guard trips }
begin
    total := 0;
    i := 1;
    loop
        total := total + i;
        i := i + 1;
        when total >= 100 ->
    again;
    if total = 105 then
        flag := 1
    else
        flag := 0
end.
";
    let (parsed, errors) = compile(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    // One top-level compound holding four statements.
    let outer = parsed.icode.children(parsed.root);
    assert_eq!(outer.len(), 1);
    assert_eq!(parsed.icode.kind(outer[0]), NodeKind::Compound);
    assert_eq!(parsed.icode.children(outer[0]).len(), 4);
}

#[test]
fn test_malformed_program_reports_each_problem_once() {
    // Two distinct problems: a guard missing its arrow inside the loop, and a
    // statement pair missing its separator in the enclosing compound.
    let source = "\
begin
    loop
        when x > 0
        x := 1
    again;
    z := 3 q := 4
end
";
    let (_, errors) = compile(source);
    let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxErrorKind::MissingBreakArrow, SyntaxErrorKind::MissingSemicolon]
    );
}

#[test]
fn test_cascading_recovery_terminates_with_one_flag_per_detection() {
    // The loop swallows the compound's END while hunting for AGAIN; recovery
    // cascades but each detection point is flagged exactly once.
    let source = "\
begin
    loop
        when x > 0
        x := 1 y := 2
end
";
    let (_, errors) = compile(source);
    let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();

    for expected in [
        SyntaxErrorKind::MissingBreakArrow,
        SyntaxErrorKind::UnexpectedToken,
        SyntaxErrorKind::MissingAgain,
        SyntaxErrorKind::MissingEnd,
    ] {
        assert_eq!(
            kinds.iter().filter(|&&k| k == expected).count(),
            1,
            "expected exactly one {expected:?} in {kinds:?}"
        );
    }
    assert!(!kinds.contains(&SyntaxErrorKind::MissingWhen));
}

#[test]
fn test_errors_carry_position_and_stable_code() {
    let source = "loop x := 1 again";
    let (_, errors) = compile(source);
    assert_eq!(errors.len(), 1);

    let error = &errors[0];
    assert_eq!(error.kind, SyntaxErrorKind::MissingWhen);
    assert_eq!(error.kind.code(), "missing-when");
    assert_eq!(error.context, ParseContext::Loop);
    assert_eq!(error.line, 1);
    // Flagged at the loop terminator.
    assert_eq!(&source[error.span.start..error.span.end], "again");
}

#[test]
fn test_lexer_and_parser_errors_merge_in_source_order() {
    // '@' is a lexer error; the parser then finds the loop has no guard.
    let source = "loop x := @ again";
    let (_, errors) = compile(source);
    let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();

    let invalid = kinds
        .iter()
        .position(|&k| k == SyntaxErrorKind::InvalidCharacter)
        .expect("lexer error missing");
    let missing_when = kinds
        .iter()
        .position(|&k| k == SyntaxErrorKind::MissingWhen)
        .expect("parser error missing");
    assert!(invalid < missing_when, "errors not in source order: {kinds:?}");
}

#[test]
fn test_error_recovery_never_drops_the_tree() {
    // Every input, however broken, produces a Compound root.
    for source in [
        "",
        ".",
        ";;;",
        "loop",
        "again",
        "when x -> again",
        "begin begin begin",
        "x := := := 1",
        "loop when -> again",
        ") ( -> <> :=",
    ] {
        let (parsed, _) = compile(source);
        assert_eq!(
            parsed.icode.kind(parsed.root),
            NodeKind::Compound,
            "no tree for {source:?}"
        );
    }
}

#[test]
fn test_check_command_exit_codes() {
    use tarn::cli::{ExitCode, commands};

    let dir = std::env::temp_dir();

    let good = dir.join("tarn_check_ok.tarn");
    std::fs::write(&good, "x := 1\n").unwrap();
    assert_eq!(commands::check_file(&good).unwrap(), ExitCode::SUCCESS);

    let bad = dir.join("tarn_check_bad.tarn");
    std::fs::write(&bad, "loop x := 1\n").unwrap();
    assert_eq!(commands::check_file(&bad).unwrap(), ExitCode::FAILURE);

    let missing = dir.join("tarn_check_does_not_exist.tarn");
    let _ = std::fs::remove_file(&missing);
    assert!(commands::check_file(&missing).is_err());
}

#[test]
fn test_nested_loops_each_get_their_own_test_node() {
    let source = "\
loop
    loop
        when inner > 0 ->
    again;
    when outer > 0 ->
again
";
    let (parsed, errors) = compile(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let outer = parsed.icode.children(parsed.root)[0];
    assert_eq!(parsed.icode.kind(outer), NodeKind::Loop);

    let outer_children = parsed.icode.children(outer);
    assert_eq!(outer_children.len(), 2);
    let inner = outer_children[0];
    assert_eq!(parsed.icode.kind(inner), NodeKind::Loop);
    assert_eq!(parsed.icode.kind(outer_children[1]), NodeKind::Test);

    // The inner loop's Test holds only the inner guard.
    let inner_test = parsed.icode.children(inner)[0];
    assert_eq!(parsed.icode.kind(inner_test), NodeKind::Test);
    assert_eq!(parsed.icode.children(inner_test).len(), 1);
}
