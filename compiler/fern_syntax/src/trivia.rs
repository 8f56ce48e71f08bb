//! Non-grammatical text attached to tokens.

use std::fmt;

use smallvec::SmallVec;

/// Kind of a trivia piece.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriviaKind {
    /// Spaces, tabs, form feeds and other non-newline whitespace.
    Whitespace,
    /// One line terminator (`\n`, `\r\n`, `\r`, U+2028, U+2029).
    Newline,
    /// `// ...` up to (not including) the line terminator.
    SingleLineComment,
    /// `/* ... */`, possibly unterminated.
    MultiLineComment,
    /// Text of a token the parser could not place in the grammar.
    SkippedText,
}

/// One piece of trivia with its verbatim text.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Trivia {
    kind: TriviaKind,
    text: Box<str>,
}

/// Leading or trailing trivia of a token. Most tokens carry at most two pieces.
pub type TriviaList = SmallVec<[Trivia; 2]>;

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<Box<str>>) -> Self {
        Trivia {
            kind,
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "trivia comes from a source text bounded by u32::MAX"
    )]
    pub fn width(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment
        )
    }

    /// Whether this piece contains a line break.
    pub fn has_newline(&self) -> bool {
        match self.kind {
            TriviaKind::Newline => true,
            TriviaKind::MultiLineComment => self
                .text
                .chars()
                .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')),
            TriviaKind::Whitespace | TriviaKind::SingleLineComment | TriviaKind::SkippedText => {
                false
            }
        }
    }
}

impl fmt::Debug for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

/// Total width of a trivia list.
pub(crate) fn trivia_width(list: &[Trivia]) -> u32 {
    list.iter().map(Trivia::width).sum()
}
