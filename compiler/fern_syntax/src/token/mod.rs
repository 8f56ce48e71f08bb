//! Immutable, shareable tokens.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::trivia::trivia_width;
use crate::{SyntaxKind, Trivia, TriviaKind, TriviaList};

bitflags! {
    /// Facts about a token that the parser and the incremental source care about.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// Synthesized by the parser for an expected but absent token.
        const MISSING = 1 << 0;
        /// The scanner reported a diagnostic while producing this token.
        const HAS_DIAGNOSTIC = 1 << 1;
        /// Produced by a context-sensitive re-lex (regex literal, `>>` and friends).
        const RELEXED = 1 << 2;
        /// Leading or trailing trivia contains skipped text.
        const HAS_SKIPPED_TEXT = 1 << 3;
        /// Trailing trivia contains a line break.
        const HAS_TRAILING_NEWLINE = 1 << 4;
    }
}

impl TokenFlags {
    /// Flags that forbid reusing the token, or any node containing it, in an
    /// incremental parse.
    pub const INCREMENTALLY_UNUSABLE: TokenFlags = TokenFlags::MISSING
        .union(TokenFlags::HAS_DIAGNOSTIC)
        .union(TokenFlags::RELEXED)
        .union(TokenFlags::HAS_SKIPPED_TEXT);
}

#[derive(PartialEq, Eq, Hash)]
struct TokenData {
    kind: SyntaxKind,
    keyword_kind: Option<SyntaxKind>,
    flags: TokenFlags,
    full_width: u32,
    text: Box<str>,
    leading: TriviaList,
    trailing: TriviaList,
}

/// A leaf of the syntax tree: kind, text and attached trivia.
///
/// Cloning is a reference-count bump. Equality is structural; use
/// [`SyntaxToken::ptr_eq`] for identity.
#[derive(Clone)]
pub struct SyntaxToken(Arc<TokenData>);

impl SyntaxToken {
    /// Create a token. Derived flags (skipped text, trailing newline) are
    /// computed here; `flags` carries the ones only the producer knows.
    pub fn new(
        kind: SyntaxKind,
        keyword_kind: Option<SyntaxKind>,
        text: impl Into<Box<str>>,
        leading: TriviaList,
        trailing: TriviaList,
        flags: TokenFlags,
    ) -> Self {
        debug_assert!(kind.is_token(), "{kind:?} is not a token kind");
        let text = text.into();
        let mut flags = flags
            - TokenFlags::HAS_SKIPPED_TEXT
            - TokenFlags::HAS_TRAILING_NEWLINE;
        let is_skipped = |t: &Trivia| t.kind() == TriviaKind::SkippedText;
        if leading.iter().any(is_skipped) || trailing.iter().any(is_skipped) {
            flags |= TokenFlags::HAS_SKIPPED_TEXT;
        }
        if trailing.iter().any(Trivia::has_newline) {
            flags |= TokenFlags::HAS_TRAILING_NEWLINE;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "token text comes from a source text bounded by u32::MAX"
        )]
        let full_width = trivia_width(&leading) + text.len() as u32 + trivia_width(&trailing);
        SyntaxToken(Arc::new(TokenData {
            kind,
            keyword_kind,
            flags,
            full_width,
            text,
            leading,
            trailing,
        }))
    }

    /// A zero-width placeholder for an expected but absent token.
    pub fn missing(kind: SyntaxKind) -> Self {
        SyntaxToken::new(
            kind,
            None,
            "",
            TriviaList::new(),
            TriviaList::new(),
            TokenFlags::MISSING,
        )
    }

    /// A zero-width semicolon inserted by automatic semicolon insertion.
    ///
    /// Unlike [`SyntaxToken::missing`] it does not stand for an error.
    pub fn automatic_semicolon() -> Self {
        SyntaxToken::new(
            SyntaxKind::SemicolonToken,
            None,
            "",
            TriviaList::new(),
            TriviaList::new(),
            TokenFlags::empty(),
        )
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Keyword this token spells, for reserved and contextual keywords alike.
    ///
    /// Contextual keywords have `kind() == IdentifierName` and carry their
    /// keyword here.
    #[inline]
    pub fn keyword_kind(&self) -> Option<SyntaxKind> {
        self.0.keyword_kind
    }

    #[inline]
    pub fn flags(&self) -> TokenFlags {
        self.0.flags
    }

    /// Token text without trivia.
    #[inline]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    #[inline]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.0.leading
    }

    #[inline]
    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.0.trailing
    }

    /// Width including leading and trailing trivia.
    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.full_width
    }

    /// Width of the token text alone.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "token text comes from a source text bounded by u32::MAX"
    )]
    pub fn width(&self) -> u32 {
        self.0.text.len() as u32
    }

    #[inline]
    pub fn leading_trivia_width(&self) -> u32 {
        trivia_width(&self.0.leading)
    }

    #[inline]
    pub fn trailing_trivia_width(&self) -> u32 {
        trivia_width(&self.0.trailing)
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.0.flags.contains(TokenFlags::MISSING)
    }

    #[inline]
    pub fn has_trailing_newline(&self) -> bool {
        self.0.flags.contains(TokenFlags::HAS_TRAILING_NEWLINE)
    }

    #[inline]
    pub fn has_skipped_text(&self) -> bool {
        self.0.flags.contains(TokenFlags::HAS_SKIPPED_TEXT)
    }

    /// Whether an incremental parse must rescan rather than reuse this token.
    #[inline]
    pub fn is_incrementally_unusable(&self) -> bool {
        self.0.flags.intersects(TokenFlags::INCREMENTALLY_UNUSABLE)
    }

    /// Identifier name or any keyword: usable where an identifier *name*
    /// (not a binding identifier) is expected, e.g. after `.`.
    #[inline]
    pub fn is_identifier_name_or_any_keyword(&self) -> bool {
        self.0.kind == SyntaxKind::IdentifierName || self.0.kind.is_any_keyword()
    }

    /// Same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Stable identity key for the lifetime of this allocation.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Copy of this token with new leading trivia.
    #[must_use]
    pub fn with_leading_trivia(&self, leading: TriviaList) -> Self {
        SyntaxToken::new(
            self.0.kind,
            self.0.keyword_kind,
            self.0.text.clone(),
            leading,
            self.0.trailing.clone(),
            self.0.flags,
        )
    }

    /// Copy of this token with new trailing trivia.
    #[must_use]
    pub fn with_trailing_trivia(&self, trailing: TriviaList) -> Self {
        SyntaxToken::new(
            self.0.kind,
            self.0.keyword_kind,
            self.0.text.clone(),
            self.0.leading.clone(),
            trailing,
            self.0.flags,
        )
    }

    /// Append the token's leading trivia, text and trailing trivia to `out`.
    pub fn write_full_text(&self, out: &mut String) {
        for trivia in &self.0.leading {
            out.push_str(trivia.text());
        }
        out.push_str(&self.0.text);
        for trivia in &self.0.trailing {
            out.push_str(trivia.text());
        }
    }

    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.0.full_width as usize);
        self.write_full_text(&mut out);
        out
    }

    /// Convert this token into trivia: leading trivia, its text as
    /// [`TriviaKind::SkippedText`], then trailing trivia.
    pub fn to_skipped_trivia(&self) -> impl Iterator<Item = Trivia> + '_ {
        let text = (!self.0.text.is_empty())
            .then(|| Trivia::new(TriviaKind::SkippedText, self.0.text.clone()));
        self.0
            .leading
            .iter()
            .cloned()
            .chain(text)
            .chain(self.0.trailing.iter().cloned())
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.kind)?;
        if self.is_missing() {
            f.write_str("<missing>")?;
        } else {
            write!(f, "({:?})", self.0.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
