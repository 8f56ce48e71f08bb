#![allow(clippy::unwrap_used, clippy::expect_used)]

use fern_diagnostic::ErrorCode;
use fern_syntax::SyntaxKind;
use pretty_assertions::assert_eq;

use super::FreshSource;
use crate::source::ParserSource;

fn kinds(source: &mut FreshSource<'_>) -> Vec<SyntaxKind> {
    let mut out = Vec::new();
    loop {
        let token = source.current_token();
        out.push(token.kind());
        if token.kind() == SyntaxKind::EndOfFileToken {
            return out;
        }
        source.move_to_next_token();
    }
}

#[test]
fn walks_tokens_and_tracks_positions() {
    let mut source = FreshSource::new("var x = 1;");
    assert_eq!(source.absolute_position(), 0);
    assert!(source.previous_token().is_none());
    source.move_to_next_token();
    assert_eq!(source.absolute_position(), 4);
    assert_eq!(source.previous_token().map(|t| t.kind()), Some(SyntaxKind::VarKeyword));
    assert_eq!(
        kinds(&mut source),
        vec![
            SyntaxKind::IdentifierName,
            SyntaxKind::EqualsToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn peek_does_not_move() {
    let mut source = FreshSource::new("a ( b");
    assert_eq!(source.peek_token(2).text(), "b");
    assert_eq!(source.peek_token(0).text(), "a");
    assert_eq!(source.current_token().text(), "a");
    assert_eq!(source.absolute_position(), 0);
}

#[test]
fn rewind_restores_position_and_previous_token() {
    let mut source = FreshSource::new("a b c d");
    source.move_to_next_token();
    let point = source.get_rewind_point();
    assert!(source.is_pinned());
    source.move_to_next_token();
    source.move_to_next_token();
    assert_eq!(source.current_token().text(), "d");

    source.rewind(&point);
    assert_eq!(source.current_token().text(), "b");
    assert_eq!(source.absolute_position(), 2);
    assert_eq!(source.previous_token().map(|t| t.text().to_owned()), Some("a".into()));
    source.release_rewind_point(point);
    assert!(!source.is_pinned());
}

#[test]
fn rewinding_does_not_rescan() {
    let mut source = FreshSource::new("a b c");
    let point = source.get_rewind_point();
    source.move_to_next_token();
    source.move_to_next_token();
    assert_eq!(source.current_token().text(), "c");
    let scanned = source.stats().tokens_scanned;
    assert_eq!(scanned, 3);
    source.rewind(&point);
    source.move_to_next_token();
    source.move_to_next_token();
    assert_eq!(source.current_token().text(), "c");
    assert_eq!(source.stats().tokens_scanned, scanned);
    source.release_rewind_point(point);
}

#[test]
fn divide_relexes_as_regular_expression() {
    let mut source = FreshSource::new("return /ab+c/g;");
    source.move_to_next_token();
    assert_eq!(source.current_token().kind(), SyntaxKind::SlashToken);
    let regex = source.current_token_allowing_regular_expression();
    assert_eq!(regex.kind(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.text(), "/ab+c/g");
    source.move_to_next_token();
    assert_eq!(source.current_token().kind(), SyntaxKind::SemicolonToken);
}

#[test]
fn relex_without_closing_slash_stays_divide() {
    let mut source = FreshSource::new("/ 2");
    let token = source.current_token_allowing_regular_expression();
    assert_eq!(token.kind(), SyntaxKind::SlashToken);
}

#[test]
fn greater_than_merges_on_request() {
    let mut source = FreshSource::new("a >>= b");
    source.move_to_next_token();
    assert_eq!(source.current_token().kind(), SyntaxKind::GreaterThanToken);
    let merged = source.current_token_merging_greater_than();
    assert_eq!(merged.kind(), SyntaxKind::GreaterThanGreaterThanEqualsToken);
    source.move_to_next_token();
    assert_eq!(source.current_token().text(), "b");
}

#[test]
fn relex_drops_diagnostics_of_discarded_tokens() {
    // Scanning ahead in normal mode sees an unterminated string after the
    // `/`; as a regular expression the quote is part of the literal.
    let mut source = FreshSource::new("x = /'/;");
    source.move_to_next_token();
    source.move_to_next_token();
    source.peek_token(2);
    let regex = source.current_token_allowing_regular_expression();
    assert_eq!(regex.text(), "/'/");
    let _ = kinds(&mut source);
    assert!(source
        .take_token_diagnostics()
        .iter()
        .all(|d| d.code() != ErrorCode::E0001));
}

#[test]
fn reset_to_position_continues_scanning_there() {
    let mut source = FreshSource::new("aa bb cc");
    source.current_token();
    source.reset_to_position(6, None);
    assert_eq!(source.current_token().text(), "cc");
    assert_eq!(source.absolute_position(), 6);
}

#[test]
fn reset_keeps_diagnostics_of_consumed_tokens() {
    // The comment is trailing trivia of `a`, so its error sits at the full
    // start of the next token.
    let mut source = FreshSource::new("a /* open");
    source.move_to_next_token();
    assert_eq!(source.absolute_position(), 9);
    let previous = source.previous_token();
    source.reset_to_position(9, previous);
    let codes: Vec<(u32, ErrorCode)> = source
        .take_token_diagnostics()
        .iter()
        .map(|d| (d.position(), d.code()))
        .collect();
    assert_eq!(codes, vec![(9, ErrorCode::E0003)]);
}

#[test]
fn reset_drops_diagnostics_of_lookahead_tokens() {
    let mut source = FreshSource::new("a 'open");
    source.peek_token(1);
    source.move_to_next_token();
    let previous = source.previous_token();
    source.reset_to_position(2, previous);
    let _ = kinds(&mut source);
    let diagnostics = source.take_token_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), ErrorCode::E0001);
}
