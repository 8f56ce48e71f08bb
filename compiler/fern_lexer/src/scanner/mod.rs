//! The scanner the parser sources pull tokens from.

use fern_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use fern_lexer_core::{LexMode, RawScanner, RawTag, RawToken, SourceBuffer};
use fern_syntax::{Span, SyntaxToken, TokenFlags, Trivia, TriviaKind, TriviaList};

use crate::cooker::{token_kind, trivia_kind};
use crate::escape::invalid_escapes;

/// Produces one trivia-carrying token per call from an absolute position.
///
/// The scanner keeps no state besides its position, so the parser can move
/// it backward (rewind, re-lex) or forward (incremental reuse) freely.
pub struct Scanner<'src> {
    text: &'src str,
    buffer: SourceBuffer,
    pos: u32,
    tokens_scanned: u32,
}

/// Trivia collected in one pass, plus whether any piece was malformed.
struct TriviaRun {
    pieces: TriviaList,
    has_diagnostic: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(text: &'src str) -> Self {
        Scanner {
            text,
            buffer: SourceBuffer::new(text),
            pos: 0,
            tokens_scanned: 0,
        }
    }

    #[inline]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Offset where the next scan starts.
    #[inline]
    pub fn absolute_index(&self) -> u32 {
        self.pos
    }

    /// Move to `pos`, which must be a token's full start.
    pub fn set_absolute_index(&mut self, pos: u32) {
        debug_assert!(pos <= self.buffer.len(), "{pos} past end of text");
        self.pos = pos.min(self.buffer.len());
    }

    /// Number of [`Scanner::scan`] calls so far, re-lexes included.
    #[inline]
    pub fn tokens_scanned(&self) -> u32 {
        self.tokens_scanned
    }

    /// Scan the token at the current position with its leading and trailing
    /// trivia, reporting malformed input into `diagnostics`.
    ///
    /// `mode` only affects the token itself; trivia is mode-independent.
    pub fn scan(&mut self, diagnostics: &mut DiagnosticBag, mode: LexMode) -> SyntaxToken {
        self.tokens_scanned += 1;
        let mut raw = RawScanner::new(self.buffer.cursor_at(self.pos), mode);

        let leading = self.leading_trivia(&mut raw, diagnostics);

        let start = raw.pos();
        let token = raw.next_token();
        let text = self.slice(start, token.len);
        let (kind, keyword_kind) = token_kind(token.tag, text);
        let mut flags = TokenFlags::empty();
        if self.report_token_errors(token, start, text, diagnostics) {
            flags |= TokenFlags::HAS_DIAGNOSTIC;
        }
        if mode != LexMode::Normal
            && (token.tag == RawTag::Regex || (token.tag.is_greater_than_family() && token.len > 1))
        {
            flags |= TokenFlags::RELEXED;
        }

        raw.set_mode(LexMode::Normal);
        let trailing = if token.tag == RawTag::Eof {
            TriviaRun {
                pieces: TriviaList::new(),
                has_diagnostic: false,
            }
        } else {
            self.trailing_trivia(&mut raw, diagnostics)
        };
        if leading.has_diagnostic || trailing.has_diagnostic {
            flags |= TokenFlags::HAS_DIAGNOSTIC;
        }
        self.pos = raw.pos();

        SyntaxToken::new(kind, keyword_kind, text, leading.pieces, trailing.pieces, flags)
    }

    fn slice(&self, start: u32, len: u32) -> &'src str {
        let range = start as usize..(start + len) as usize;
        self.text.get(range).unwrap_or_default()
    }

    /// Everything up to the next token.
    fn leading_trivia(&self, raw: &mut RawScanner<'_>, diagnostics: &mut DiagnosticBag) -> TriviaRun {
        let mut run = TriviaRun {
            pieces: TriviaList::new(),
            has_diagnostic: false,
        };
        loop {
            let before = raw.pos();
            let token = raw.next_token();
            let Some(kind) = trivia_kind(token.tag) else {
                raw.reset_to(before);
                return run;
            };
            self.push_trivia(&mut run, kind, token, before, diagnostics);
        }
    }

    /// Whitespace and comments up to and including the first line break.
    fn trailing_trivia(&self, raw: &mut RawScanner<'_>, diagnostics: &mut DiagnosticBag) -> TriviaRun {
        let mut run = TriviaRun {
            pieces: TriviaList::new(),
            has_diagnostic: false,
        };
        loop {
            let before = raw.pos();
            let token = raw.next_token();
            let Some(kind) = trivia_kind(token.tag) else {
                raw.reset_to(before);
                return run;
            };
            self.push_trivia(&mut run, kind, token, before, diagnostics);
            let ends_line = match kind {
                TriviaKind::Newline => true,
                TriviaKind::MultiLineComment => run.pieces.last().is_some_and(Trivia::has_newline),
                _ => false,
            };
            if ends_line {
                return run;
            }
        }
    }

    fn push_trivia(
        &self,
        run: &mut TriviaRun,
        kind: TriviaKind,
        token: RawToken,
        start: u32,
        diagnostics: &mut DiagnosticBag,
    ) {
        if token.tag == RawTag::UnterminatedBlockComment {
            diagnostics.push(Diagnostic::simple(
                ErrorCode::E0003,
                Span::point(start + token.len),
            ));
            run.has_diagnostic = true;
        }
        run.pieces.push(Trivia::new(kind, self.slice(start, token.len)));
    }

    /// Push diagnostics for a malformed token; returns whether any were pushed.
    fn report_token_errors(
        &self,
        token: RawToken,
        start: u32,
        text: &str,
        diagnostics: &mut DiagnosticBag,
    ) -> bool {
        let span = Span::at(start, token.len);
        match token.tag {
            RawTag::InvalidChar => diagnostics.push(Diagnostic::simple(ErrorCode::E0002, span)),
            RawTag::InvalidNumber => diagnostics.push(Diagnostic::simple(ErrorCode::E0004, span)),
            RawTag::UnterminatedString => {
                diagnostics.push(Diagnostic::simple(ErrorCode::E0001, span));
            }
            _ => {}
        }
        let mut reported = token.tag.is_error();
        if matches!(token.tag, RawTag::String | RawTag::UnterminatedString) {
            for (from, to) in invalid_escapes(text) {
                diagnostics.push(Diagnostic::simple(
                    ErrorCode::E0005,
                    Span::new(start + from, start + to),
                ));
                reported = true;
            }
        }
        reported
    }
}

#[cfg(test)]
mod tests;
