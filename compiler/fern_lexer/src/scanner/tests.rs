use fern_diagnostic::{DiagnosticBag, ErrorCode};
use fern_syntax::{SyntaxKind, SyntaxToken, TokenFlags, TriviaKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::Scanner;
use crate::LexMode;

/// Scan `text` to end of file in normal mode.
fn scan_all(text: &str) -> (Vec<SyntaxToken>, DiagnosticBag) {
    let mut scanner = Scanner::new(text);
    let mut diagnostics = DiagnosticBag::new();
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan(&mut diagnostics, LexMode::Normal);
        let done = token.kind() == SyntaxKind::EndOfFileToken;
        tokens.push(token);
        if done {
            return (tokens, diagnostics);
        }
    }
}

fn kinds(tokens: &[SyntaxToken]) -> Vec<SyntaxKind> {
    tokens.iter().map(SyntaxToken::kind).collect()
}

#[test]
fn var_statement_tokens_and_trivia() {
    let (tokens, diagnostics) = scan_all("var x = 1;");
    assert!(diagnostics.is_empty());
    assert_eq!(
        kinds(&tokens),
        vec![
            SyntaxKind::VarKeyword,
            SyntaxKind::IdentifierName,
            SyntaxKind::EqualsToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
    assert_eq!(tokens[0].full_text(), "var ");
    assert_eq!(tokens[0].width(), 3);
    assert_eq!(tokens[0].full_width(), 4);
}

#[test]
fn trailing_trivia_stops_after_newline() {
    let (tokens, _) = scan_all("a // note\n\n  b");
    let a = &tokens[0];
    let trailing: Vec<TriviaKind> = a.trailing_trivia().iter().map(|t| t.kind()).collect();
    assert_eq!(
        trailing,
        vec![
            TriviaKind::Whitespace,
            TriviaKind::SingleLineComment,
            TriviaKind::Newline,
        ]
    );
    assert!(a.has_trailing_newline());

    let b = &tokens[1];
    let leading: Vec<TriviaKind> = b.leading_trivia().iter().map(|t| t.kind()).collect();
    assert_eq!(leading, vec![TriviaKind::Newline, TriviaKind::Whitespace]);
    assert!(!b.has_trailing_newline());
}

#[test]
fn multi_line_comment_with_newline_ends_trailing_trivia() {
    let (tokens, _) = scan_all("a /* x\n */ b");
    assert_eq!(tokens[0].full_text(), "a /* x\n */");
    assert!(tokens[0].has_trailing_newline());
    assert!(tokens[0].trailing_trivia().iter().any(|t| t.is_comment()));
    assert_eq!(tokens[1].full_text(), " b");
}

#[test]
fn eof_token_owns_final_trivia() {
    let (tokens, _) = scan_all("x;\n// end");
    let eof = &tokens[2];
    assert_eq!(eof.kind(), SyntaxKind::EndOfFileToken);
    assert_eq!(eof.full_text(), "// end");
    assert_eq!(eof.width(), 0);
}

#[test]
fn full_text_round_trips() {
    let text = "function f(a) {\r\n  return a >> 2; /* done */\n}\n";
    let (tokens, _) = scan_all(text);
    let rebuilt: String = tokens.iter().map(SyntaxToken::full_text).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn keyword_kinds() {
    let (tokens, _) = scan_all("class static module foo");
    assert_eq!(tokens[0].kind(), SyntaxKind::ClassKeyword);
    assert_eq!(tokens[1].kind(), SyntaxKind::StaticKeyword);
    assert_eq!(tokens[2].kind(), SyntaxKind::IdentifierName);
    assert_eq!(tokens[2].keyword_kind(), Some(SyntaxKind::ModuleKeyword));
    assert_eq!(tokens[3].keyword_kind(), None);
}

#[test]
fn scan_diagnostics_flag_the_token() {
    let (tokens, diagnostics) = scan_all("'open\n0x @ '\\x1'");
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code()).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E0001, ErrorCode::E0004, ErrorCode::E0002, ErrorCode::E0005]
    );
    assert!(tokens[0].flags().contains(TokenFlags::HAS_DIAGNOSTIC));
    assert!(tokens[0].is_incrementally_unusable());
    assert_eq!(tokens[2].kind(), SyntaxKind::ErrorToken);
    assert_eq!(diagnostics.as_slice()[0].span().to_range(), 0..5);
}

#[test]
fn unterminated_comment_reports_at_end() {
    let (tokens, diagnostics) = scan_all("x /* never closed");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.as_slice()[0].code(), ErrorCode::E0003);
    assert_eq!(diagnostics.as_slice()[0].position(), 17);
    assert!(tokens[0].flags().contains(TokenFlags::HAS_DIAGNOSTIC));
}

#[test]
fn rescan_in_regex_mode() {
    let text = "x = /a+/g;";
    let mut scanner = Scanner::new(text);
    let mut diagnostics = DiagnosticBag::new();
    scanner.scan(&mut diagnostics, LexMode::Normal);
    scanner.scan(&mut diagnostics, LexMode::Normal);
    let slash_start = scanner.absolute_index();
    let slash = scanner.scan(&mut diagnostics, LexMode::Normal);
    assert_eq!(slash.kind(), SyntaxKind::SlashToken);

    scanner.set_absolute_index(slash_start);
    let regex = scanner.scan(&mut diagnostics, LexMode::RegularExpression);
    assert_eq!(regex.kind(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.text(), "/a+/g");
    assert!(regex.flags().contains(TokenFlags::RELEXED));
    assert_eq!(scanner.tokens_scanned(), 4);
}

#[test]
fn greater_than_compound_mode() {
    let mut scanner = Scanner::new(">>= 1");
    let mut diagnostics = DiagnosticBag::new();
    let single = scanner.scan(&mut diagnostics, LexMode::Normal);
    assert_eq!(single.kind(), SyntaxKind::GreaterThanToken);
    assert_eq!(single.full_width(), 1);

    scanner.set_absolute_index(0);
    let merged = scanner.scan(&mut diagnostics, LexMode::GreaterThanCompound);
    assert_eq!(merged.kind(), SyntaxKind::GreaterThanGreaterThanEqualsToken);
    assert_eq!(merged.full_text(), ">>= ");
    assert!(merged.is_incrementally_unusable());
}

proptest! {
    #[test]
    fn scanning_is_lossless(text in "[a-z0-9 \\n/*'\"=<>{}();.\\\\@]{0,64}") {
        let (tokens, _) = scan_all(&text);
        let rebuilt: String = tokens.iter().map(SyntaxToken::full_text).collect();
        prop_assert_eq!(rebuilt, text);
        let non_eof_zero_width = tokens
            .iter()
            .filter(|t| t.kind() != SyntaxKind::EndOfFileToken)
            .any(|t| t.width() == 0);
        prop_assert!(!non_eof_zero_width);
    }
}
