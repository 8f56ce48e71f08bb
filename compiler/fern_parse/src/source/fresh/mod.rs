//! Parser source that scans the text on demand.

use std::collections::VecDeque;

use fern_diagnostic::{Diagnostic, DiagnosticBag};
use fern_lexer::{LexMode, Scanner};
use fern_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use tracing::trace;

use super::{ParserSource, RewindPoint, SourceStats};
use crate::window::{SlidingWindow, WindowSource};

/// The scanner plus the diagnostics it reports, fed into the window.
struct ScanFeed<'src> {
    scanner: Scanner<'src>,
    diagnostics: DiagnosticBag,
    /// `(window index, bag length before the scan)` per buffered token,
    /// ascending by index.
    marks: VecDeque<(usize, usize)>,
}

impl ScanFeed<'_> {
    /// Drop the diagnostics reported while scanning the tokens at window
    /// index `index` and after. Earlier tokens keep theirs, even when they
    /// point at the same offset.
    fn discard_from_index(&mut self, index: usize) {
        let keep = self.marks.partition_point(|&(at, _)| at < index);
        if let Some(&(_, len)) = self.marks.get(keep) {
            self.diagnostics.truncate(len);
        }
        self.marks.truncate(keep);
    }

    fn forget_marks_before(&mut self, index: usize) {
        while self.marks.front().is_some_and(|&(at, _)| at < index) {
            self.marks.pop_front();
        }
    }
}

impl WindowSource<SyntaxToken> for ScanFeed<'_> {
    type Argument = LexMode;

    fn fetch_more_items(
        &mut self,
        mode: LexMode,
        start: usize,
        out: &mut Vec<SyntaxToken>,
        _space: usize,
    ) -> usize {
        self.marks.push_back((start, self.diagnostics.len()));
        let token = self.scanner.scan(&mut self.diagnostics, mode);
        trace!(index = start, kind = %token.kind(), width = token.full_width(), "scanned");
        out.push(token);
        1
    }
}

/// State captured by [`ParserSource::get_rewind_point`].
struct SavedPosition {
    absolute_index: usize,
    absolute_position: u32,
    previous_token: Option<SyntaxToken>,
}

/// Scans tokens lazily into a [`SlidingWindow`].
///
/// Re-lexing (`/` as a regular expression, `>` merged into `>>` and
/// friends) rewinds the scanner to the current token's full start, drops
/// everything buffered from there on, and scans again in the new mode.
pub struct FreshSource<'src> {
    feed: ScanFeed<'src>,
    window: SlidingWindow<SyntaxToken>,
    /// Full start of the current token.
    absolute_position: u32,
    previous_token: Option<SyntaxToken>,
    /// Outstanding rewind points, innermost last. Capacity is kept across
    /// speculations.
    rewind_points: Vec<SavedPosition>,
}

impl<'src> FreshSource<'src> {
    pub fn new(text: &'src str) -> Self {
        FreshSource {
            feed: ScanFeed {
                scanner: Scanner::new(text),
                diagnostics: DiagnosticBag::new(),
                marks: VecDeque::new(),
            },
            window: SlidingWindow::new(SyntaxToken::missing(SyntaxKind::EndOfFileToken)),
            absolute_position: 0,
            previous_token: None,
            rewind_points: Vec::new(),
        }
    }

    pub fn text(&self) -> &'src str {
        self.feed.scanner.text()
    }

    /// Continue scanning at `position`, a token full start, with
    /// `previous_token` as the token before it.
    ///
    /// Buffered tokens from the current index on are dropped together with
    /// the scan diagnostics they reported. Diagnostics of consumed tokens
    /// survive, including one at `position` itself such as the end of an
    /// unterminated trailing comment.
    pub fn reset_to_position(&mut self, position: u32, previous_token: Option<SyntaxToken>) {
        self.absolute_position = position;
        self.previous_token = previous_token;
        self.feed.discard_from_index(self.window.absolute_index());
        self.window.discard_all_items_from_current_index_onwards();
        self.feed.scanner.set_absolute_index(position);
    }

    fn rescan_current(&mut self, mode: LexMode) -> SyntaxToken {
        let previous = self.previous_token.clone();
        self.reset_to_position(self.absolute_position, previous);
        let token = self.window.current_item(&mut self.feed, mode);
        trace!(pos = self.absolute_position, ?mode, kind = %token.kind(), "re-lexed");
        token
    }
}

impl ParserSource for FreshSource<'_> {
    #[inline]
    fn absolute_position(&self) -> u32 {
        self.absolute_position
    }

    fn previous_token(&self) -> Option<SyntaxToken> {
        self.previous_token.clone()
    }

    fn current_token(&mut self) -> SyntaxToken {
        self.window.current_item(&mut self.feed, LexMode::Normal)
    }

    fn current_token_allowing_regular_expression(&mut self) -> SyntaxToken {
        debug_assert!(self.current_token().kind().is_divide_or_regex_ambiguous());
        let token = self.rescan_current(LexMode::RegularExpression);
        assert!(
            token.kind().is_divide_or_regex_ambiguous(),
            "re-lex of a divide produced {:?}",
            token.kind()
        );
        token
    }

    fn current_token_merging_greater_than(&mut self) -> SyntaxToken {
        debug_assert_eq!(self.current_token().kind(), SyntaxKind::GreaterThanToken);
        let token = self.rescan_current(LexMode::GreaterThanCompound);
        assert!(
            token.kind().is_any_greater_than(),
            "re-lex of a greater-than produced {:?}",
            token.kind()
        );
        token
    }

    fn peek_token(&mut self, n: usize) -> SyntaxToken {
        self.window.peek_item_n(&mut self.feed, n)
    }

    fn current_node(&mut self) -> Option<SyntaxNode> {
        None
    }

    fn move_to_next_token(&mut self) {
        let token = self.current_token();
        self.absolute_position += token.full_width();
        self.previous_token = Some(token);
        self.window.move_to_next_item();
        if !self.window.is_pinned() {
            self.feed.forget_marks_before(self.window.absolute_index());
        }
    }

    fn move_to_next_node(&mut self) {
        unreachable!("a fresh source never offers nodes");
    }

    fn get_rewind_point(&mut self) -> RewindPoint {
        let absolute_index = self.window.get_and_pin_absolute_index();
        self.rewind_points.push(SavedPosition {
            absolute_index,
            absolute_position: self.absolute_position,
            previous_token: self.previous_token.clone(),
        });
        RewindPoint::new(self.rewind_points.len())
    }

    fn rewind(&mut self, point: &RewindPoint) {
        let saved = &self.rewind_points[point.slot()];
        self.window.rewind_to_pinned_index(saved.absolute_index);
        self.absolute_position = saved.absolute_position;
        self.previous_token.clone_from(&saved.previous_token);
    }

    fn release_rewind_point(&mut self, point: RewindPoint) {
        assert_eq!(
            point.depth(),
            self.rewind_points.len(),
            "rewind points released out of order"
        );
        if let Some(saved) = self.rewind_points.pop() {
            self.window.release_and_unpin_absolute_index(saved.absolute_index);
        }
    }

    #[inline]
    fn is_pinned(&self) -> bool {
        self.window.is_pinned()
    }

    fn take_token_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.feed.diagnostics.take()
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            tokens_scanned: self.feed.scanner.tokens_scanned(),
            ..SourceStats::default()
        }
    }
}

#[cfg(test)]
mod tests;
