use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::SourceBuffer;

/// Scan `source` in `mode` and collect all tokens (excluding Eof).
fn scan_in(source: &str, mode: LexMode) -> Vec<RawToken> {
    let buf = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buf.cursor(), mode);
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.next_token();
        if tok.tag == RawTag::Eof {
            break;
        }
        tokens.push(tok);
    }
    tokens
}

fn scan(source: &str) -> Vec<RawToken> {
    scan_in(source, LexMode::Normal)
}

fn scan_tags(source: &str) -> Vec<RawTag> {
    scan(source).iter().map(|t| t.tag).collect()
}

/// First token of `source` in `mode`.
fn first(source: &str, mode: LexMode) -> RawToken {
    let buf = SourceBuffer::new(source);
    RawScanner::new(buf.cursor(), mode).next_token()
}

// ─── Coverage ──────────────────────────────────────────────────

#[test]
fn total_len_equals_source_len() {
    let sources = [
        "",
        "x",
        "var x = 1;",
        "function f(a, b) { return a >>> b; }",
        "'str' \"str\" 0xFF 1.5e10 .5",
        "/* c */ // line\n\r\n\t",
        "a\u{2028}b\u{00A0}é",
        "@#`\\",
        "'unterminated\nnext",
        "/* open",
    ];
    for source in sources {
        for mode in [
            LexMode::Normal,
            LexMode::RegularExpression,
            LexMode::GreaterThanCompound,
        ] {
            let total: u32 = scan_in(source, mode).iter().map(|t| t.len).sum();
            assert_eq!(total as usize, source.len(), "{source:?} in {mode:?}");
        }
    }
}

#[test]
fn eof_repeats_with_zero_length() {
    let buf = SourceBuffer::new(" ");
    let mut scanner = RawScanner::new(buf.cursor(), LexMode::Normal);
    assert_eq!(scanner.next_token().tag, RawTag::Whitespace);
    for _ in 0..3 {
        assert_eq!(
            scanner.next_token(),
            RawToken {
                tag: RawTag::Eof,
                len: 0
            }
        );
    }
}

// ─── Tokens ────────────────────────────────────────────────────

#[test]
fn var_statement() {
    assert_eq!(
        scan_tags("var x = 1;"),
        vec![
            RawTag::Ident,
            RawTag::Whitespace,
            RawTag::Ident,
            RawTag::Whitespace,
            RawTag::Equal,
            RawTag::Whitespace,
            RawTag::Number,
            RawTag::Semicolon,
        ]
    );
}

#[test]
fn compound_punctuation() {
    assert_eq!(
        scan_tags("=== !== => <<= ... ++ -= && |= ^"),
        vec![
            RawTag::EqualEqualEqual,
            RawTag::Whitespace,
            RawTag::BangEqualEqual,
            RawTag::Whitespace,
            RawTag::FatArrow,
            RawTag::Whitespace,
            RawTag::ShlEqual,
            RawTag::Whitespace,
            RawTag::DotDotDot,
            RawTag::Whitespace,
            RawTag::PlusPlus,
            RawTag::Whitespace,
            RawTag::MinusEqual,
            RawTag::Whitespace,
            RawTag::AmpersandAmpersand,
            RawTag::Whitespace,
            RawTag::PipeEqual,
            RawTag::Whitespace,
            RawTag::Caret,
        ]
    );
}

#[test]
fn newlines() {
    assert_eq!(
        scan("\r\n\n\r"),
        vec![
            RawToken {
                tag: RawTag::Newline,
                len: 2
            },
            RawToken {
                tag: RawTag::Newline,
                len: 1
            },
            RawToken {
                tag: RawTag::Newline,
                len: 1
            },
        ]
    );
}

#[test]
fn numbers() {
    for (source, tag) in [
        ("0", RawTag::Number),
        ("12.5", RawTag::Number),
        ("1e10", RawTag::Number),
        ("1E-3", RawTag::Number),
        (".25", RawTag::Number),
        ("0xBEEF", RawTag::Number),
        ("0x", RawTag::InvalidNumber),
        ("1e", RawTag::InvalidNumber),
        ("3in", RawTag::InvalidNumber),
    ] {
        let tok = first(source, LexMode::Normal);
        assert_eq!(tok.tag, tag, "{source:?}");
        assert_eq!(tok.len as usize, source.len(), "{source:?}");
    }
}

#[test]
fn strings() {
    let tok = first(r#""a\"b""#, LexMode::Normal);
    assert_eq!(tok.tag, RawTag::String);
    assert_eq!(tok.len, 6);

    let tok = first("'abc\ndef'", LexMode::Normal);
    assert_eq!(tok.tag, RawTag::UnterminatedString);
    assert_eq!(tok.len, 4);

    // Line continuation.
    let tok = first("'a\\\r\nb'", LexMode::Normal);
    assert_eq!(tok.tag, RawTag::String);
    assert_eq!(tok.len, 7);
}

#[test]
fn comments() {
    assert_eq!(
        scan_tags("// a\n/* b */ /* c"),
        vec![
            RawTag::LineComment,
            RawTag::Newline,
            RawTag::BlockComment,
            RawTag::Whitespace,
            RawTag::UnterminatedBlockComment,
        ]
    );
}

#[test]
fn unicode() {
    assert_eq!(
        scan_tags("é\u{00A0}\u{2029}\u{1F600}"),
        vec![
            RawTag::Ident,
            RawTag::Whitespace,
            RawTag::Newline,
            RawTag::InvalidChar,
        ]
    );
}

// ─── Modes ─────────────────────────────────────────────────────

#[test]
fn slash_depends_on_mode() {
    assert_eq!(first("/ab/g", LexMode::Normal).tag, RawTag::Slash);
    assert_eq!(first("/=a/", LexMode::Normal).tag, RawTag::SlashEqual);

    let tok = first("/ab/g;", LexMode::RegularExpression);
    assert_eq!(tok.tag, RawTag::Regex);
    assert_eq!(tok.len, 5);

    let tok = first("/[/]\\//i", LexMode::RegularExpression);
    assert_eq!(tok.tag, RawTag::Regex);
    assert_eq!(tok.len, 8);
}

#[test]
fn unterminated_regex_falls_back_to_divide() {
    let tok = first("/ab\n/", LexMode::RegularExpression);
    assert_eq!(tok, RawToken { tag: RawTag::Slash, len: 1 });
    let tok = first("/= 2", LexMode::RegularExpression);
    assert_eq!(tok, RawToken { tag: RawTag::SlashEqual, len: 2 });
}

#[test]
fn comments_win_over_regex() {
    assert_eq!(first("// x/", LexMode::RegularExpression).tag, RawTag::LineComment);
    assert_eq!(first("/* x */", LexMode::RegularExpression).tag, RawTag::BlockComment);
}

#[test]
fn greater_than_depends_on_mode() {
    for source in [">", ">=", ">>", ">>>", ">>=", ">>>="] {
        let tok = first(source, LexMode::Normal);
        assert_eq!(tok, RawToken { tag: RawTag::Greater, len: 1 }, "{source:?}");
    }
    for (source, tag) in [
        (">", RawTag::Greater),
        (">=", RawTag::GreaterEqual),
        (">>", RawTag::Shr),
        (">>>", RawTag::UnsignedShr),
        (">>=", RawTag::ShrEqual),
        (">>>=", RawTag::UnsignedShrEqual),
    ] {
        let tok = first(source, LexMode::GreaterThanCompound);
        assert_eq!(tok.tag, tag, "{source:?}");
        assert_eq!(tok.len as usize, source.len(), "{source:?}");
    }
}

// ─── Property Tests ────────────────────────────────────────────

proptest! {
    #[test]
    fn lengths_cover_any_input(source in "\\PC{0,64}") {
        for mode in [LexMode::Normal, LexMode::RegularExpression, LexMode::GreaterThanCompound] {
            let tokens = scan_in(&source, mode);
            let total: u32 = tokens.iter().map(|t| t.len).sum();
            prop_assert_eq!(total as usize, source.len());
            prop_assert!(tokens.iter().all(|t| t.len > 0));
        }
    }

    #[test]
    fn tokens_end_on_char_boundaries(source in "[a-z0-9 /*'\"\\n=<>.é\u{2028}]{0,48}") {
        let mut pos = 0usize;
        for tok in scan_in(&source, LexMode::RegularExpression) {
            pos += tok.len as usize;
            prop_assert!(source.is_char_boundary(pos));
        }
    }
}
