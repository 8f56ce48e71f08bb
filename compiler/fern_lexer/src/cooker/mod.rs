//! Mapping from raw tags to syntax kinds.

use fern_lexer_core::RawTag;
use fern_syntax::{SyntaxKind, TriviaKind};

/// Token kind and keyword kind for a non-trivia raw token.
///
/// Reserved and strict-mode reserved words get their keyword kind; contextual
/// keywords stay identifier names and only carry the keyword kind.
pub(crate) fn token_kind(tag: RawTag, text: &str) -> (SyntaxKind, Option<SyntaxKind>) {
    use SyntaxKind as K;
    let kind = match tag {
        RawTag::Ident => {
            return match SyntaxKind::from_keyword(text) {
                Some(keyword) if keyword.is_contextual_keyword() => {
                    (K::IdentifierName, Some(keyword))
                }
                Some(keyword) => (keyword, Some(keyword)),
                None => (K::IdentifierName, None),
            };
        }
        RawTag::Number | RawTag::InvalidNumber => K::NumericLiteral,
        RawTag::String | RawTag::UnterminatedString => K::StringLiteral,
        RawTag::Regex => K::RegularExpressionLiteral,
        RawTag::LeftBrace => K::OpenBraceToken,
        RawTag::RightBrace => K::CloseBraceToken,
        RawTag::LeftParen => K::OpenParenToken,
        RawTag::RightParen => K::CloseParenToken,
        RawTag::LeftBracket => K::OpenBracketToken,
        RawTag::RightBracket => K::CloseBracketToken,
        RawTag::Dot => K::DotToken,
        RawTag::DotDotDot => K::DotDotDotToken,
        RawTag::Semicolon => K::SemicolonToken,
        RawTag::Comma => K::CommaToken,
        RawTag::Less => K::LessThanToken,
        RawTag::Greater => K::GreaterThanToken,
        RawTag::LessEqual => K::LessThanEqualsToken,
        RawTag::GreaterEqual => K::GreaterThanEqualsToken,
        RawTag::EqualEqual => K::EqualsEqualsToken,
        RawTag::FatArrow => K::EqualsGreaterThanToken,
        RawTag::BangEqual => K::ExclamationEqualsToken,
        RawTag::EqualEqualEqual => K::EqualsEqualsEqualsToken,
        RawTag::BangEqualEqual => K::ExclamationEqualsEqualsToken,
        RawTag::Plus => K::PlusToken,
        RawTag::Minus => K::MinusToken,
        RawTag::Star => K::AsteriskToken,
        RawTag::Percent => K::PercentToken,
        RawTag::PlusPlus => K::PlusPlusToken,
        RawTag::MinusMinus => K::MinusMinusToken,
        RawTag::Shl => K::LessThanLessThanToken,
        RawTag::Shr => K::GreaterThanGreaterThanToken,
        RawTag::UnsignedShr => K::GreaterThanGreaterThanGreaterThanToken,
        RawTag::Ampersand => K::AmpersandToken,
        RawTag::Pipe => K::BarToken,
        RawTag::Caret => K::CaretToken,
        RawTag::Bang => K::ExclamationToken,
        RawTag::Tilde => K::TildeToken,
        RawTag::AmpersandAmpersand => K::AmpersandAmpersandToken,
        RawTag::PipePipe => K::BarBarToken,
        RawTag::Question => K::QuestionToken,
        RawTag::Colon => K::ColonToken,
        RawTag::Equal => K::EqualsToken,
        RawTag::PlusEqual => K::PlusEqualsToken,
        RawTag::MinusEqual => K::MinusEqualsToken,
        RawTag::StarEqual => K::AsteriskEqualsToken,
        RawTag::PercentEqual => K::PercentEqualsToken,
        RawTag::ShlEqual => K::LessThanLessThanEqualsToken,
        RawTag::ShrEqual => K::GreaterThanGreaterThanEqualsToken,
        RawTag::UnsignedShrEqual => K::GreaterThanGreaterThanGreaterThanEqualsToken,
        RawTag::AmpersandEqual => K::AmpersandEqualsToken,
        RawTag::PipeEqual => K::BarEqualsToken,
        RawTag::CaretEqual => K::CaretEqualsToken,
        RawTag::Slash => K::SlashToken,
        RawTag::SlashEqual => K::SlashEqualsToken,
        RawTag::Eof => K::EndOfFileToken,
        RawTag::InvalidChar
        | RawTag::Whitespace
        | RawTag::Newline
        | RawTag::LineComment
        | RawTag::BlockComment
        | RawTag::UnterminatedBlockComment => K::ErrorToken,
    };
    (kind, None)
}

/// Trivia kind for a trivia raw tag.
pub(crate) fn trivia_kind(tag: RawTag) -> Option<TriviaKind> {
    match tag {
        RawTag::Whitespace => Some(TriviaKind::Whitespace),
        RawTag::Newline => Some(TriviaKind::Newline),
        RawTag::LineComment => Some(TriviaKind::SingleLineComment),
        RawTag::BlockComment | RawTag::UnterminatedBlockComment => {
            Some(TriviaKind::MultiLineComment)
        }
        _ => None,
    }
}
