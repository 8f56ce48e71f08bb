use smallvec::smallvec;

use super::{SyntaxToken, TokenFlags};
use crate::{SyntaxKind, Trivia, TriviaKind, TriviaList};

fn ws(text: &str) -> Trivia {
    Trivia::new(TriviaKind::Whitespace, text)
}

fn ident(text: &str, leading: TriviaList, trailing: TriviaList) -> SyntaxToken {
    SyntaxToken::new(
        SyntaxKind::IdentifierName,
        None,
        text,
        leading,
        trailing,
        TokenFlags::empty(),
    )
}

#[test]
fn widths_include_trivia() {
    let token = ident("foo", smallvec![ws("  ")], smallvec![ws(" ")]);
    assert_eq!(token.width(), 3);
    assert_eq!(token.full_width(), 6);
    assert_eq!(token.leading_trivia_width(), 2);
    assert_eq!(token.full_text(), "  foo ");
}

#[test]
fn missing_token_is_zero_width_and_unusable() {
    let token = SyntaxToken::missing(SyntaxKind::SemicolonToken);
    assert!(token.is_missing());
    assert_eq!(token.full_width(), 0);
    assert!(token.is_incrementally_unusable());
}

#[test]
fn automatic_semicolon_is_not_missing() {
    let token = SyntaxToken::automatic_semicolon();
    assert!(!token.is_missing());
    assert_eq!(token.full_width(), 0);
    assert!(!token.is_incrementally_unusable());
}

#[test]
fn trailing_newline_is_derived() {
    let token = ident(
        "a",
        TriviaList::new(),
        smallvec![Trivia::new(TriviaKind::Newline, "\n")],
    );
    assert!(token.has_trailing_newline());
    assert!(!ident("a", TriviaList::new(), TriviaList::new()).has_trailing_newline());
}

#[test]
fn skipped_text_trivia_marks_token_unusable() {
    let base = ident("a", TriviaList::new(), TriviaList::new());
    let skipped = base.with_trailing_trivia(smallvec![Trivia::new(TriviaKind::SkippedText, ")")]);
    assert!(skipped.has_skipped_text());
    assert!(skipped.is_incrementally_unusable());
    assert_eq!(skipped.full_text(), "a)");
}

#[test]
fn to_skipped_trivia_preserves_every_character() {
    let token = ident("bad", smallvec![ws(" ")], smallvec![ws("  ")]);
    let text: String = token.to_skipped_trivia().map(|t| t.text().to_owned()).collect();
    assert_eq!(text, token.full_text());
    let kinds: Vec<_> = token.to_skipped_trivia().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        [TriviaKind::Whitespace, TriviaKind::SkippedText, TriviaKind::Whitespace]
    );
}

#[test]
fn equality_is_structural_identity_is_not() {
    let a = ident("x", TriviaList::new(), TriviaList::new());
    let b = ident("x", TriviaList::new(), TriviaList::new());
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
    assert_ne!(a.identity(), b.identity());
}
