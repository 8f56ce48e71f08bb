#![allow(clippy::unwrap_used, clippy::expect_used)]

use fern_syntax::SyntaxKind;
use pretty_assertions::assert_eq;

use crate::parser::Parser;
use crate::source::FreshSource;
use crate::ParseOptions;

/// Consume the first token, then parse a primary expression.
fn primary_after_first_token(text: &str, options: ParseOptions) -> SyntaxKind {
    let mut parser = Parser::new(FreshSource::new(text), options);
    parser.eat_any_token();
    parser.parse_primary_expression().kind()
}

#[test]
fn slash_after_an_operand_is_not_a_regex() {
    for text in [
        "a /x/",
        "yield /x/",
        "this /x/",
        "super /x/",
        "null /x/",
        "'s' /x/",
        "++ /x/",
        ") /x/",
        "] /x/",
    ] {
        assert_eq!(
            primary_after_first_token(text, ParseOptions::default()),
            SyntaxKind::IdentifierName,
            "{text:?}"
        );
    }
}

#[test]
fn slash_after_an_operator_or_keyword_is_a_regex() {
    for text in ["= /x/", "( /x/", "{ /x/", "return /x/", "typeof /x/"] {
        assert_eq!(
            primary_after_first_token(text, ParseOptions::default()),
            SyntaxKind::RegularExpressionLiteral,
            "{text:?}"
        );
    }
}

#[test]
fn reserved_word_ends_an_operand_only_outside_strict_mode() {
    let strict = ParseOptions::default().with_initial_strict_mode(true);
    assert_eq!(
        primary_after_first_token("yield /x/", strict),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(
        primary_after_first_token("yield /x/", ParseOptions::default()),
        SyntaxKind::IdentifierName
    );
}
