//! Where the parser gets its tokens and reusable nodes.
//!
//! The parser is generic over [`ParserSource`]. [`FreshSource`] scans the
//! text on demand; [`IncrementalSource`] serves tokens and whole subtrees
//! from a previous tree where the edit cannot have affected them and falls
//! back to an inner fresh source elsewhere.

mod fresh;
mod incremental;

pub use fresh::FreshSource;
pub use incremental::{IncrementalError, IncrementalSource};

use fern_diagnostic::Diagnostic;
use fern_syntax::{SyntaxNode, SyntaxToken};

/// Handle for returning a source to an earlier state.
///
/// Rewind points nest: release them in the reverse order they were taken.
/// A point may be rewound to any number of times before it is released.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a rewind point pins the source until it is released"]
pub struct RewindPoint {
    /// One-based depth in the source's stack of outstanding points.
    depth: usize,
}

impl RewindPoint {
    pub(crate) fn new(depth: usize) -> Self {
        RewindPoint { depth }
    }

    /// Index into the owner's stack.
    pub(crate) fn slot(&self) -> usize {
        self.depth - 1
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }
}

/// Counters a source keeps for observability and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Tokens produced by the scanner, re-lexes included.
    pub tokens_scanned: u32,
    /// Subtrees taken from a previous tree.
    pub nodes_reused: u32,
    /// Tokens taken from a previous tree.
    pub tokens_reused: u32,
}

/// Token stream with lookahead, rewind, re-lex and (optionally) node reuse.
pub trait ParserSource {
    /// Full start of the current token.
    fn absolute_position(&self) -> u32;

    /// The last token moved over, if any.
    fn previous_token(&self) -> Option<SyntaxToken>;

    fn current_token(&mut self) -> SyntaxToken;

    /// Re-lex the current `/` or `/=` allowing a regular expression literal.
    fn current_token_allowing_regular_expression(&mut self) -> SyntaxToken;

    /// Re-lex the current `>` merging it with following `>` and `=`.
    fn current_token_merging_greater_than(&mut self) -> SyntaxToken;

    /// Token `n` positions ahead; `peek_token(0)` is the current token.
    fn peek_token(&mut self, n: usize) -> SyntaxToken;

    /// A subtree that may be reused at the current position.
    fn current_node(&mut self) -> Option<SyntaxNode>;

    fn move_to_next_token(&mut self);

    /// Move past the node last returned by [`ParserSource::current_node`].
    fn move_to_next_node(&mut self);

    fn get_rewind_point(&mut self) -> RewindPoint;

    fn rewind(&mut self, point: &RewindPoint);

    fn release_rewind_point(&mut self, point: RewindPoint);

    /// Whether any rewind point is outstanding.
    fn is_pinned(&self) -> bool;

    /// Diagnostics reported while scanning, in scan order.
    fn take_token_diagnostics(&mut self) -> Vec<Diagnostic>;

    fn stats(&self) -> SourceStats;
}
