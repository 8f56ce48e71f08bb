//! The result of a parse.

use fern_diagnostic::Diagnostic;
use fern_syntax::{SyntaxNode, SyntaxToken, TokenIter};

use crate::parser::ParseOutput;
use crate::reconcile::attach_skipped_tokens;
use crate::ParseOptions;

/// Counters describing how a tree was produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Scanner invocations, re-lexes included.
    pub tokens_scanned: u32,
    /// Subtrees taken unchanged from the previous tree.
    pub nodes_reused: u32,
    /// Tokens taken unchanged from the previous tree.
    pub tokens_reused: u32,
    /// Tokens dropped by error recovery (now skipped-text trivia).
    pub skipped_tokens: u32,
}

/// A lossless syntax tree with its diagnostics.
///
/// The concatenated full text of every token equals the parsed text, and
/// diagnostics are sorted by position with at most one per position.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    root: SyntaxNode,
    diagnostics: Vec<Diagnostic>,
    stats: ParseStats,
    options: ParseOptions,
}

impl SyntaxTree {
    pub(crate) fn from_output(output: ParseOutput, options: ParseOptions) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "at most one skipped token per byte of a text bounded by u32::MAX"
        )]
        let skipped_tokens = output.skipped.len() as u32;
        let root = attach_skipped_tokens(output.root, &output.skipped);
        SyntaxTree {
            root,
            diagnostics: output.diagnostics,
            stats: ParseStats {
                tokens_scanned: output.stats.tokens_scanned,
                nodes_reused: output.stats.nodes_reused,
                tokens_reused: output.stats.tokens_reused,
                skipped_tokens,
            },
            options,
        }
    }

    /// The `SourceUnit` node.
    #[inline]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Options the tree was parsed with; an incremental parse of this tree
    /// must use the same ones.
    #[inline]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// The parsed text, rebuilt from tokens and trivia.
    pub fn full_text(&self) -> String {
        self.root.full_text()
    }

    /// `(full_start, token)` pairs in document order.
    pub fn tokens(&self) -> TokenIter {
        self.root.tokens()
    }

    /// The token whose full span contains `position`, with its full start.
    pub fn find_token(&self, position: u32) -> Option<(SyntaxToken, u32)> {
        self.root.find_token(position)
    }

    /// Same structure and diagnostics, regardless of which subtrees are
    /// shared.
    pub fn is_equivalent_to(&self, other: &SyntaxTree) -> bool {
        self.root == other.root && self.diagnostics == other.diagnostics
    }
}
