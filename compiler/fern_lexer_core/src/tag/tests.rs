use super::*;

#[test]
fn repr_u8_semantic_ranges() {
    assert_eq!(RawTag::Ident as u8, 0);
    assert_eq!(RawTag::LeftBrace as u8, 32);
    assert_eq!(RawTag::Whitespace as u8, 112);
    assert_eq!(RawTag::InvalidChar as u8, 240);
    assert_eq!(RawTag::Eof as u8, 255);
    assert!((RawTag::SlashEqual as u8) < RawTag::Whitespace as u8);
}

#[test]
fn fixed_lexemes() {
    assert_eq!(RawTag::UnsignedShrEqual.lexeme(), Some(">>>="));
    assert_eq!(RawTag::FatArrow.lexeme(), Some("=>"));
    assert_eq!(RawTag::DotDotDot.lexeme(), Some("..."));
    assert_eq!(RawTag::SlashEqual.lexeme(), Some("/="));
}

#[test]
fn variable_lexeme_returns_none() {
    for tag in [
        RawTag::Ident,
        RawTag::Number,
        RawTag::String,
        RawTag::Regex,
        RawTag::Whitespace,
        RawTag::InvalidChar,
        RawTag::Eof,
    ] {
        assert_eq!(tag.lexeme(), None, "{tag:?}");
    }
}

#[test]
fn classification() {
    assert!(RawTag::BlockComment.is_trivia());
    assert!(RawTag::UnterminatedBlockComment.is_trivia());
    assert!(RawTag::UnterminatedBlockComment.is_error());
    assert!(!RawTag::Eof.is_error());
    assert!(!RawTag::Ident.is_trivia());
    assert!(RawTag::ShrEqual.is_greater_than_family());
    assert!(!RawTag::GreaterEqual.is_trivia());
}

#[test]
fn names() {
    assert_eq!(RawTag::Ident.name(), "identifier");
    assert_eq!(RawTag::Shl.name(), "<<");
    assert_eq!(RawTag::Eof.name(), "end of file");
}
