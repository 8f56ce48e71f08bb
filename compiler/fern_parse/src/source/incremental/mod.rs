//! Parser source that reuses tokens and subtrees of a previous parse.
//!
//! The old tree is walked with an [`OldTreeCursor`] while an inner
//! [`FreshSource`] scans the new text. Anything served from the old tree
//! must be exactly what a fresh scan or parse would produce at the same
//! position, so the source only reads from the old tree when:
//!
//! - no rewind point is outstanding,
//! - the current position is outside the (extended) change range,
//! - the cursor is synchronized with the parser (`change_delta == 0`),
//! - the element neither touches the change nor is flagged unusable.
//!
//! `change_delta` is the cursor's old-text position minus the old-text
//! position that corresponds to the parser's current position. Fresh tokens
//! move the parser without moving the cursor and drive it negative; the
//! cursor then skips (or breaks apart) old elements until it catches up.

use std::collections::VecDeque;

use fern_diagnostic::Diagnostic;
use fern_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TextChange, TextChangeError};
use tracing::{debug, trace};

use super::{FreshSource, ParserSource, RewindPoint, SourceStats};

/// Tokens before an edit that are re-scanned along with it.
///
/// Lexing a token may have looked at the character after it, so the token
/// before the edited one (and the one before that) cannot be trusted.
pub const MAX_LOOKAHEAD: usize = 1;

/// Caller errors when starting an incremental parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IncrementalError {
    #[error(transparent)]
    Change(#[from] TextChangeError),
    /// The edits applied to the old tree do not produce a text of the
    /// length that was passed.
    #[error("edits produce a {expected}-byte text, but the new text is {actual} bytes")]
    LengthMismatch { expected: u32, actual: usize },
    #[error("text of {len} bytes exceeds the u32::MAX limit")]
    TextTooLarge { len: usize },
}

/// Walks the children of an old tree left to right.
///
/// List nodes are never elements of the walk: their children are spliced in
/// directly, so a statement inside a block's statement list is a sibling of
/// the block's braces.
struct OldTreeCursor {
    elements: VecDeque<SyntaxElement>,
}

impl OldTreeCursor {
    fn new(root: &SyntaxNode) -> Self {
        let mut elements = Vec::new();
        flatten_children(root, &mut elements);
        OldTreeCursor {
            elements: elements.into(),
        }
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    fn current(&self) -> Option<&SyntaxElement> {
        self.elements.front()
    }

    /// Elements from the current one to the end of the tree.
    fn remaining(&self) -> impl Iterator<Item = &SyntaxElement> {
        self.elements.iter()
    }

    fn move_to_next_sibling(&mut self) {
        self.elements.pop_front();
    }

    /// Replace the current node with its children.
    fn crumble(&mut self) {
        let Some(SyntaxElement::Node(node)) = self.elements.pop_front() else {
            return;
        };
        let mut children = Vec::with_capacity(node.child_count());
        flatten_children(&node, &mut children);
        trace!(kind = %node.kind(), children = children.len(), "crumbled old node");
        for child in children.into_iter().rev() {
            self.elements.push_front(child);
        }
    }

    /// Drop zero-width tokens at the front. They occupy no text and never
    /// need to be served, except end-of-file.
    fn skip_zero_width_tokens(&mut self) {
        while let Some(SyntaxElement::Token(token)) = self.elements.front() {
            if is_servable_width(token) {
                return;
            }
            self.elements.pop_front();
        }
    }

    /// Break nodes apart until the current element is a token.
    fn move_to_first_token(&mut self) -> Option<SyntaxToken> {
        loop {
            self.skip_zero_width_tokens();
            match self.elements.front()? {
                SyntaxElement::Token(token) => return Some(token.clone()),
                SyntaxElement::Node(_) => self.crumble(),
            }
        }
    }
}

fn is_servable_width(token: &SyntaxToken) -> bool {
    token.full_width() > 0 || token.kind() == SyntaxKind::EndOfFileToken
}

fn flatten_children(node: &SyntaxNode, out: &mut Vec<SyntaxElement>) {
    for child in node.children() {
        match child {
            SyntaxElement::Node(list) if list.kind().is_list() => flatten_children(list, out),
            other => out.push(other.clone()),
        }
    }
}

/// Saved alongside the inner source's rewind point. The cursor needs no
/// entry: nothing reads from the old tree while a point is outstanding.
struct SavedChangeState {
    change_delta: i64,
    change_range: Option<TextChange>,
}

/// A [`ParserSource`] over new text that reuses an old tree.
pub struct IncrementalSource<'src> {
    fresh: FreshSource<'src>,
    cursor: OldTreeCursor,
    change_delta: i64,
    /// Cleared once the parser has moved past the inserted text.
    change_range: Option<TextChange>,
    saved: Vec<SavedChangeState>,
    nodes_reused: u32,
    tokens_reused: u32,
}

impl<'src> IncrementalSource<'src> {
    /// Prepare to parse `new_text`, which is the text of `old_root` with
    /// `changes` applied in order.
    pub fn new(
        old_root: &SyntaxNode,
        new_text: &'src str,
        changes: &[TextChange],
    ) -> Result<Self, IncrementalError> {
        let Ok(new_len) = u32::try_from(new_text.len()) else {
            return Err(IncrementalError::TextTooLarge {
                len: new_text.len(),
            });
        };
        let old_len = old_root.full_width();
        let change = TextChange::collapse(changes, old_len)?;
        let expected = match change {
            // `collapse` has checked that every intermediate length fits.
            Some(change) => u32::try_from(change.apply_to_len(old_len)).unwrap_or(u32::MAX),
            None => old_len,
        };
        if expected != new_len {
            return Err(IncrementalError::LengthMismatch {
                expected,
                actual: new_text.len(),
            });
        }

        let change_range = change.map(|change| extend_to_affected_range(old_root, change));
        debug!(?change_range, old_len, new_len, "incremental source");
        Ok(IncrementalSource {
            fresh: FreshSource::new(new_text),
            cursor: OldTreeCursor::new(old_root),
            change_delta: 0,
            change_range,
            saved: Vec::new(),
            nodes_reused: 0,
            tokens_reused: 0,
        })
    }

    /// Whether an old element at the current position may be served.
    fn can_read_from_old(&mut self) -> bool {
        if self.fresh.is_pinned() {
            return false;
        }
        let position = self.fresh.absolute_position();
        if self
            .change_range
            .is_some_and(|range| position >= range.start && position <= range.new_end())
        {
            return false;
        }
        self.sync_cursor();
        self.change_delta == 0 && !self.cursor.is_finished()
    }

    /// Skip old elements the parser has already moved past.
    fn sync_cursor(&mut self) {
        while self.change_delta < 0 {
            let Some(element) = self.cursor.current() else {
                return;
            };
            let width = i64::from(element.full_width());
            if element.is_node() && width > -self.change_delta {
                self.cursor.crumble();
            } else {
                self.change_delta += width;
                self.cursor.move_to_next_sibling();
            }
        }
        trace!(delta = self.change_delta, "cursor synchronized");
    }

    fn touches_change(&self, position: u32, width: u32) -> bool {
        self.change_range
            .is_some_and(|range| range.touches(position, width))
    }

    fn can_reuse_token(&self, token: &SyntaxToken, position: u32) -> bool {
        let kind = token.kind();
        is_servable_width(token)
            && !token.is_incrementally_unusable()
            && !kind.is_divide_or_regex_ambiguous()
            && !kind.is_any_greater_than()
            && !self.touches_change(position, token.full_width())
    }

    fn can_reuse_node(&self, node: &SyntaxNode, position: u32) -> bool {
        !node.is_incrementally_unusable() && !self.touches_change(position, node.full_width())
    }

    fn try_current_token_from_old(&mut self) -> Option<SyntaxToken> {
        if !self.can_read_from_old() {
            return None;
        }
        let token = self.cursor.move_to_first_token()?;
        let position = self.fresh.absolute_position();
        self.can_reuse_token(&token, position).then_some(token)
    }

    fn try_current_node_from_old(&mut self) -> Option<SyntaxNode> {
        if !self.can_read_from_old() {
            return None;
        }
        let position = self.fresh.absolute_position();
        loop {
            self.cursor.skip_zero_width_tokens();
            let node = self.cursor.current()?.as_node()?.clone();
            if self.can_reuse_node(&node, position) {
                return Some(node);
            }
            self.cursor.crumble();
        }
    }

    /// Walk the old elements without moving the cursor.
    fn try_peek_token_from_old(&mut self, n: usize) -> Option<SyntaxToken> {
        if !self.can_read_from_old() {
            return None;
        }
        let mut position = self.fresh.absolute_position();
        let mut remaining = n;
        for element in self.cursor.remaining() {
            for (_, token) in element.tokens() {
                if !is_servable_width(&token) {
                    continue;
                }
                if !self.can_reuse_token(&token, position) {
                    return None;
                }
                if remaining == 0 {
                    return Some(token);
                }
                remaining -= 1;
                position += token.full_width();
            }
        }
        None
    }
}

/// Move the start of `change` back over the tokens whose scan may have
/// looked into the edited text.
fn extend_to_affected_range(root: &SyntaxNode, change: TextChange) -> TextChange {
    let mut start = change.start;
    for _ in 0..=MAX_LOOKAHEAD {
        if start == 0 {
            break;
        }
        let Some((_, full_start)) = root.find_token(start) else {
            break;
        };
        start = full_start.saturating_sub(1);
    }
    change.extend_back_to(start)
}

impl ParserSource for IncrementalSource<'_> {
    #[inline]
    fn absolute_position(&self) -> u32 {
        self.fresh.absolute_position()
    }

    fn previous_token(&self) -> Option<SyntaxToken> {
        self.fresh.previous_token()
    }

    fn current_token(&mut self) -> SyntaxToken {
        match self.try_current_token_from_old() {
            Some(token) => token,
            None => self.fresh.current_token(),
        }
    }

    fn current_token_allowing_regular_expression(&mut self) -> SyntaxToken {
        self.fresh.current_token_allowing_regular_expression()
    }

    fn current_token_merging_greater_than(&mut self) -> SyntaxToken {
        self.fresh.current_token_merging_greater_than()
    }

    fn peek_token(&mut self, n: usize) -> SyntaxToken {
        match self.try_peek_token_from_old(n) {
            Some(token) => token,
            None => self.fresh.peek_token(n),
        }
    }

    fn current_node(&mut self) -> Option<SyntaxNode> {
        self.try_current_node_from_old()
    }

    fn move_to_next_token(&mut self) {
        let position = self.fresh.absolute_position();
        if let Some(token) = self.try_current_token_from_old() {
            self.cursor.move_to_next_sibling();
            self.tokens_reused += 1;
            trace!(pos = position, kind = %token.kind(), "reused token");
            self.fresh
                .reset_to_position(position + token.full_width(), Some(token));
            return;
        }

        let token = self.fresh.current_token();
        self.change_delta -= i64::from(token.full_width());
        self.fresh.move_to_next_token();

        if let Some(range) = self.change_range {
            if self.fresh.absolute_position() >= range.new_end() {
                self.change_delta += range.delta();
                self.change_range = None;
                debug!(delta = self.change_delta, "moved past the change");
            }
        }
    }

    fn move_to_next_node(&mut self) {
        let Some(node) = self.cursor.current().and_then(SyntaxElement::as_node).cloned() else {
            unreachable!("move_to_next_node without a current node");
        };
        let position = self.fresh.absolute_position();
        self.cursor.move_to_next_sibling();
        self.nodes_reused += 1;
        debug!(pos = position, kind = %node.kind(), width = node.full_width(), "reused node");
        self.fresh
            .reset_to_position(position + node.full_width(), node.last_non_zero_width_token());
    }

    fn get_rewind_point(&mut self) -> RewindPoint {
        let point = self.fresh.get_rewind_point();
        self.saved.push(SavedChangeState {
            change_delta: self.change_delta,
            change_range: self.change_range,
        });
        debug_assert_eq!(point.depth(), self.saved.len());
        point
    }

    fn rewind(&mut self, point: &RewindPoint) {
        self.fresh.rewind(point);
        let saved = &self.saved[point.slot()];
        self.change_delta = saved.change_delta;
        self.change_range = saved.change_range;
    }

    fn release_rewind_point(&mut self, point: RewindPoint) {
        self.saved.pop();
        self.fresh.release_rewind_point(point);
    }

    #[inline]
    fn is_pinned(&self) -> bool {
        self.fresh.is_pinned()
    }

    fn take_token_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.fresh.take_token_diagnostics()
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            nodes_reused: self.nodes_reused,
            tokens_reused: self.tokens_reused,
            ..self.fresh.stats()
        }
    }
}
