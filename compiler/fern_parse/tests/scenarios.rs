//! End-to-end parses through the public API.
//!
//! One test per documented example (variable statements, recovery at end
//! of file, arrow functions, divide versus regular expression, and the
//! edit of a function body), plus incremental parses that exercise node
//! reuse and edit sequences.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::{codes, init_tracing};
use fern_diagnostic::ErrorCode;
use fern_parse::{parse, parse_incremental, IncrementalError, ParseOptions, SyntaxTree, TextChange};
use fern_syntax::{SyntaxKind, SyntaxNode};
use pretty_assertions::assert_eq;

fn first_statement(tree: &SyntaxTree) -> SyntaxNode {
    tree.root()
        .child_node(0)
        .and_then(|list| list.child_node(0))
        .cloned()
        .expect("a statement")
}

fn declarator(statement: &SyntaxNode) -> SyntaxNode {
    assert_eq!(statement.kind(), SyntaxKind::VariableStatement);
    statement
        .child_node(1)
        .and_then(|declaration| declaration.child_node(1))
        .and_then(|list| list.child_node(0))
        .cloned()
        .expect("a declarator")
}

#[test]
fn variable_statement() {
    init_tracing();
    let tree = parse("var x = 1;", ParseOptions::default());
    assert_eq!(codes(&tree), vec![]);

    let declarators = first_statement(&tree)
        .child_node(1)
        .and_then(|declaration| declaration.child_node(1))
        .cloned()
        .unwrap();
    assert_eq!(declarators.child_count(), 1);

    let declarator = declarator(&first_statement(&tree));
    assert_eq!(declarator.child_token(0).unwrap().text(), "x");
    assert!(declarator.child(1).is_none());
    let value = declarator.child_node(2).unwrap();
    assert_eq!(value.kind(), SyntaxKind::EqualsValueClause);
    assert_eq!(value.child_token(1).unwrap().text(), "1");
}

#[test]
fn missing_initializer_at_end_of_file() {
    init_tracing();
    let text = "var x = ";
    let tree = parse(text, ParseOptions::default());
    assert_eq!(tree.full_text(), text);
    assert_eq!(codes(&tree), vec![(8, ErrorCode::E1002)]);

    let value = declarator(&first_statement(&tree)).child_node(2).cloned().unwrap();
    let missing = value.child_token(1).unwrap();
    assert!(missing.is_missing());
    assert_eq!(missing.kind(), SyntaxKind::IdentifierName);

    let strict_semicolons = ParseOptions::default().with_automatic_semicolon_insertion(false);
    let tree = parse(text, strict_semicolons);
    assert_eq!(
        codes(&tree),
        vec![(7, ErrorCode::E1005), (8, ErrorCode::E1002)]
    );
    assert_eq!(
        tree.diagnostics()[0].message(),
        "Automatic semicolon insertion not allowed."
    );
}

#[test]
fn parenthesized_arrow_function() {
    init_tracing();
    let tree = parse("(a, b) => a + b", ParseOptions::default());
    assert_eq!(codes(&tree), vec![]);

    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::ExpressionStatement);
    let arrow = statement.child_node(0).unwrap();
    assert_eq!(arrow.kind(), SyntaxKind::ParenthesizedArrowFunctionExpression);
    let parameters = arrow
        .child_node(0)
        .and_then(|signature| signature.child_node(1))
        .and_then(|list| list.child_node(1))
        .unwrap();
    assert_eq!(parameters.child_count(), 3);
    assert_eq!(
        arrow.child_node(2).unwrap().kind(),
        SyntaxKind::BinaryExpression
    );
}

#[test]
fn slash_after_identifier_divides() {
    init_tracing();
    let tree = parse("a / b", ParseOptions::default());
    assert_eq!(codes(&tree), vec![]);

    let binary = first_statement(&tree).child_node(0).cloned().unwrap();
    assert_eq!(binary.kind(), SyntaxKind::BinaryExpression);
    assert_eq!(binary.child_token(1).unwrap().kind(), SyntaxKind::SlashToken);
    assert!(tree
        .tokens()
        .all(|(_, token)| token.kind() != SyntaxKind::RegularExpressionLiteral));
}

#[test]
fn slash_after_return_starts_a_regular_expression() {
    init_tracing();
    let tree = parse("return /abc/;", ParseOptions::default());
    assert_eq!(codes(&tree), vec![]);

    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::ReturnStatement);
    let literal = statement.child_token(1).unwrap();
    assert_eq!(literal.kind(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(literal.text(), "/abc/");
}

#[test]
fn editing_a_function_body_rescans_only_the_affected_tokens() {
    init_tracing();
    let old = parse("function f() { return 1; }", ParseOptions::default());
    let new_text = "function f() { return 42; }";
    let tree = parse_incremental(&old, new_text, &[TextChange::replace(22, 1, 2)]).unwrap();

    assert!(tree.is_equivalent_to(&parse(new_text, ParseOptions::default())));
    assert_eq!(tree.full_text(), new_text);

    // Only `{ return 42` is scanned again: the edited literal and the two
    // tokens before it, whose scan may have looked into the edit. Once past
    // the edit the parser is back in step with the old tree, so
    // `function f()`, `; }` and end-of-file are all reused.
    let stats = tree.stats();
    assert_eq!(stats.tokens_scanned, 3);
    assert_eq!(stats.tokens_reused, 7);

    let (old_function, _) = old.find_token(0).unwrap();
    let (new_function, _) = tree.find_token(0).unwrap();
    assert!(new_function.ptr_eq(&old_function));
}

#[test]
fn statements_away_from_the_edit_are_reused_whole() {
    init_tracing();
    let old_text = "var a = 1;\nvar b = 2;\nvar c = 3;\n";
    let old = parse(old_text, ParseOptions::default());
    let new_text = "var a = 1;\nvar b = 2;\nvar c = 30;\n";
    let tree = parse_incremental(&old, new_text, &[TextChange::replace(30, 1, 2)]).unwrap();

    assert!(tree.is_equivalent_to(&parse(new_text, ParseOptions::default())));
    assert_eq!(tree.stats().nodes_reused, 2);

    let old_second = old.root().child_node(0).unwrap().child_node(1).unwrap();
    let new_second = tree.root().child_node(0).unwrap().child_node(1).unwrap();
    assert!(new_second.ptr_eq(old_second));
}

#[test]
fn edit_sequences_are_applied_in_order() {
    init_tracing();
    let old = parse("a; b; c;", ParseOptions::default());
    // "a; b; c;" -> "aaa; b; c;" -> "aaa; b; c;d;"
    let changes = [TextChange::replace(0, 1, 3), TextChange::insert(10, 2)];
    let new_text = "aaa; b; c;d;";
    let tree = parse_incremental(&old, new_text, &changes).unwrap();
    assert!(tree.is_equivalent_to(&parse(new_text, ParseOptions::default())));
}

#[test]
fn nodes_from_another_strict_mode_are_not_reused() {
    init_tracing();
    let old = parse("x;\nvar y;", ParseOptions::default());
    let prologue = "'use strict';\n";
    let new_text = format!("{prologue}x;\nvar y;");
    let change = TextChange::insert(0, u32::try_from(prologue.len()).unwrap());
    let tree = parse_incremental(&old, &new_text, &[change]).unwrap();

    assert!(tree.is_equivalent_to(&parse(&new_text, ParseOptions::default())));
    assert_eq!(tree.stats().nodes_reused, 0);
    let last = tree.root().child_node(0).unwrap().child_node(2).unwrap();
    assert!(last.parsed_in_strict_mode());
}

#[test]
fn incremental_parse_keeps_the_old_options() {
    init_tracing();
    let options = ParseOptions::default().with_automatic_semicolon_insertion(false);
    let old = parse("a\n", options);
    let tree = parse_incremental(&old, "ab\n", &[TextChange::insert(1, 1)]).unwrap();
    assert_eq!(tree.options(), options);
    assert_eq!(codes(&tree), vec![(2, ErrorCode::E1005)]);
}

#[test]
fn mismatched_new_text_is_rejected() {
    let old = parse("a;", ParseOptions::default());
    let error = parse_incremental(&old, "abc;", &[]).unwrap_err();
    assert_eq!(
        error,
        IncrementalError::LengthMismatch {
            expected: 2,
            actual: 4
        }
    );
    assert_eq!(
        error.to_string(),
        "edits produce a 2-byte text, but the new text is 4 bytes"
    );
}

fn nested_parentheses(depth: usize, tail: &str) -> String {
    format!("x = {}1{}{tail}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn ten_thousand_nested_parentheses() {
    init_tracing();
    let text = nested_parentheses(10_000, ";");
    let tree = parse(&text, ParseOptions::default());
    assert_eq!(codes(&tree), vec![]);
    assert_eq!(tree.full_text(), text);

    let edited = text.replacen('1', "2", 1);
    let change = TextChange::replace(10_004, 1, 1);
    let incremental = parse_incremental(&tree, &edited, &[change]).unwrap();
    let fresh = parse(&edited, ParseOptions::default());
    assert!(incremental.is_equivalent_to(&fresh));
    drop(tree);
    drop(fresh);
    assert_eq!(incremental.full_text(), edited);
}

#[test]
fn skipped_token_after_deep_nesting_is_attached() {
    init_tracing();
    let text = nested_parentheses(10_000, ") ;");
    let tree = parse(&text, ParseOptions::default());
    assert_eq!(tree.full_text(), text);
    assert!(!codes(&tree).is_empty());
}

#[test]
fn comment_opened_by_an_edit_runs_to_end_of_file() {
    init_tracing();
    let old = parse("function f(a) { return a * a; }\n", ParseOptions::default());
    let new_text = "function f(a) { return a /* a; }\n";
    let incremental = parse_incremental(&old, new_text, &[TextChange::insert(25, 1)]).unwrap();
    let fresh = parse(new_text, ParseOptions::default());
    assert_eq!(codes(&incremental), codes(&fresh));
    assert_eq!(codes(&incremental)[0], (33, ErrorCode::E0003));
    assert!(incremental.is_equivalent_to(&fresh));
}
