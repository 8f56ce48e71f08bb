//! Raw token tags.

/// What a raw lexeme is, before keyword resolution and trivia attachment.
///
/// Discriminants are grouped by category so range checks stay cheap.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum RawTag {
    // Identifiers & literals: 0-15
    Ident = 0,
    Number = 1,
    String = 2,
    Regex = 3,

    // Punctuation: 32-95
    LeftBrace = 32,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    DotDotDot,
    Semicolon,
    Comma,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    FatArrow,
    BangEqual,
    EqualEqualEqual,
    BangEqualEqual,
    Plus,
    Minus,
    Star,
    Percent,
    PlusPlus,
    MinusMinus,
    Shl,
    Shr,
    UnsignedShr,
    Ampersand,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpersandAmpersand,
    PipePipe,
    Question,
    Colon,
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    PercentEqual,
    ShlEqual,
    ShrEqual,
    UnsignedShrEqual,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,
    Slash,
    SlashEqual,

    // Trivia: 112-119
    Whitespace = 112,
    Newline,
    LineComment,
    BlockComment,

    // Errors: 240-247
    InvalidChar = 240,
    UnterminatedString,
    UnterminatedBlockComment,
    InvalidNumber,

    // Control: 255
    Eof = 255,
}

const _: () = assert!(std::mem::size_of::<RawTag>() == 1);

/// A lexeme's tag and byte length.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

impl RawTag {
    /// Fixed source text, for tags that always spell the same thing.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            RawTag::LeftBrace => "{",
            RawTag::RightBrace => "}",
            RawTag::LeftParen => "(",
            RawTag::RightParen => ")",
            RawTag::LeftBracket => "[",
            RawTag::RightBracket => "]",
            RawTag::Dot => ".",
            RawTag::DotDotDot => "...",
            RawTag::Semicolon => ";",
            RawTag::Comma => ",",
            RawTag::Less => "<",
            RawTag::Greater => ">",
            RawTag::LessEqual => "<=",
            RawTag::GreaterEqual => ">=",
            RawTag::EqualEqual => "==",
            RawTag::FatArrow => "=>",
            RawTag::BangEqual => "!=",
            RawTag::EqualEqualEqual => "===",
            RawTag::BangEqualEqual => "!==",
            RawTag::Plus => "+",
            RawTag::Minus => "-",
            RawTag::Star => "*",
            RawTag::Percent => "%",
            RawTag::PlusPlus => "++",
            RawTag::MinusMinus => "--",
            RawTag::Shl => "<<",
            RawTag::Shr => ">>",
            RawTag::UnsignedShr => ">>>",
            RawTag::Ampersand => "&",
            RawTag::Pipe => "|",
            RawTag::Caret => "^",
            RawTag::Bang => "!",
            RawTag::Tilde => "~",
            RawTag::AmpersandAmpersand => "&&",
            RawTag::PipePipe => "||",
            RawTag::Question => "?",
            RawTag::Colon => ":",
            RawTag::Equal => "=",
            RawTag::PlusEqual => "+=",
            RawTag::MinusEqual => "-=",
            RawTag::StarEqual => "*=",
            RawTag::PercentEqual => "%=",
            RawTag::ShlEqual => "<<=",
            RawTag::ShrEqual => ">>=",
            RawTag::UnsignedShrEqual => ">>>=",
            RawTag::AmpersandEqual => "&=",
            RawTag::PipeEqual => "|=",
            RawTag::CaretEqual => "^=",
            RawTag::Slash => "/",
            RawTag::SlashEqual => "/=",
            _ => return None,
        };
        Some(text)
    }

    /// Whitespace, newlines and comments (terminated or not).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace
                | RawTag::Newline
                | RawTag::LineComment
                | RawTag::BlockComment
                | RawTag::UnterminatedBlockComment
        )
    }

    /// Tags that carry a scan error.
    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= RawTag::InvalidChar as u8 && self != RawTag::Eof
    }

    /// `>` and the operators that start with it.
    #[inline]
    pub fn is_greater_than_family(self) -> bool {
        matches!(
            self,
            RawTag::Greater
                | RawTag::GreaterEqual
                | RawTag::Shr
                | RawTag::UnsignedShr
                | RawTag::ShrEqual
                | RawTag::UnsignedShrEqual
        )
    }

    /// Human-readable description.
    pub fn name(self) -> &'static str {
        match self {
            RawTag::Ident => "identifier",
            RawTag::Number => "numeric literal",
            RawTag::String => "string literal",
            RawTag::Regex => "regular expression literal",
            RawTag::Whitespace => "whitespace",
            RawTag::Newline => "newline",
            RawTag::LineComment => "line comment",
            RawTag::BlockComment => "block comment",
            RawTag::InvalidChar => "invalid character",
            RawTag::UnterminatedString => "unterminated string",
            RawTag::UnterminatedBlockComment => "unterminated block comment",
            RawTag::InvalidNumber => "invalid numeric literal",
            RawTag::Eof => "end of file",
            _ => self.lexeme().unwrap_or("token"),
        }
    }
}

#[cfg(test)]
mod tests;
