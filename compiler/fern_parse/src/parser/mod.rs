//! The recursive-descent parser engine.
//!
//! [`Parser`] owns a [`ParserSource`] and the grammar state that rewind
//! points must restore: reported diagnostics, tokens skipped during
//! recovery, the active list states and strict mode. Grammar productions
//! live in `crate::grammar` as further `impl` blocks; list loops and error
//! recovery in [`lists`].

mod lists;

use fern_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use fern_syntax::{NodeFactory, Span, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use tracing::{debug, trace};

use crate::list::ListStates;
use crate::source::{ParserSource, RewindPoint, SourceStats};
use crate::ParseOptions;

/// A token dropped by error recovery.
///
/// The token becomes skipped-text trivia of `owner` (the last token that
/// made it into the tree before it) once the tree is built. With no owner
/// the token precedes every tree token.
#[derive(Clone, Debug)]
pub(crate) struct SkippedToken {
    pub token: SyntaxToken,
    pub owner: Option<SyntaxToken>,
}

/// Everything a rewind must restore besides the source position.
struct ParserRewindPoint {
    source: RewindPoint,
    diagnostics_len: usize,
    skipped_len: usize,
    strict: bool,
    list_states: ListStates,
}

/// What the engine hands back after parsing a source unit.
pub(crate) struct ParseOutput {
    pub root: SyntaxNode,
    pub diagnostics: Vec<Diagnostic>,
    pub skipped: Vec<SkippedToken>,
    pub stats: SourceStats,
}

pub(crate) struct Parser<S: ParserSource> {
    source: S,
    options: ParseOptions,
    diagnostics: DiagnosticBag,
    skipped: Vec<SkippedToken>,
    list_states: ListStates,
    strict: bool,
    /// The `)` that closed the latest `if (…)`, `while (…)` or `for (…)`
    /// header.
    statement_header_end: Option<SyntaxToken>,
}

impl<S: ParserSource> Parser<S> {
    pub(crate) fn new(source: S, options: ParseOptions) -> Self {
        Parser {
            source,
            options,
            diagnostics: DiagnosticBag::new(),
            skipped: Vec::new(),
            list_states: ListStates::NONE,
            strict: options.initial_strict_mode,
            statement_header_end: None,
        }
    }

    /// Parse a whole source unit and collect the results.
    pub(crate) fn parse(mut self) -> ParseOutput {
        let root = self.parse_source_unit();
        let mut diagnostics = DiagnosticBag::new();
        diagnostics.extend(self.source.take_token_diagnostics());
        diagnostics.extend(self.diagnostics);
        // Scan errors come first, so they win a tie at the same position.
        let mut diagnostics = diagnostics.into_sorted_vec();
        diagnostics.dedup_by_key(|d| d.position());
        ParseOutput {
            root,
            diagnostics,
            skipped: self.skipped,
            stats: self.source.stats(),
        }
    }

    // --- State ---

    #[inline]
    pub(crate) fn factory(&self) -> NodeFactory {
        NodeFactory::new(self.strict)
    }

    #[inline]
    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        if self.strict != strict {
            trace!(strict, "strict mode changed");
        }
        self.strict = strict;
    }

    #[inline]
    pub(crate) fn list_states(&self) -> ListStates {
        self.list_states
    }

    pub(crate) fn set_list_states(&mut self, states: ListStates) {
        self.list_states = states;
    }

    pub(crate) fn set_statement_header_end(&mut self, close_paren: SyntaxToken) {
        self.statement_header_end = Some(close_paren);
    }

    /// Whether `token` closed a statement header, so a statement and not an
    /// operator follows it.
    pub(crate) fn ends_statement_header(&self, token: &SyntaxToken) -> bool {
        self.statement_header_end
            .as_ref()
            .is_some_and(|end| end.ptr_eq(token))
    }

    // --- Tokens ---

    #[inline]
    pub(crate) fn current_token(&mut self) -> SyntaxToken {
        self.source.current_token()
    }

    #[inline]
    pub(crate) fn current_kind(&mut self) -> SyntaxKind {
        self.source.current_token().kind()
    }

    #[inline]
    pub(crate) fn peek_token(&mut self, n: usize) -> SyntaxToken {
        self.source.peek_token(n)
    }

    #[inline]
    pub(crate) fn peek_kind(&mut self, n: usize) -> SyntaxKind {
        self.source.peek_token(n).kind()
    }

    #[inline]
    pub(crate) fn previous_token(&self) -> Option<SyntaxToken> {
        self.source.previous_token()
    }

    /// Full start of the current token.
    #[inline]
    pub(crate) fn position(&self) -> u32 {
        self.source.absolute_position()
    }

    pub(crate) fn current_token_allowing_regular_expression(&mut self) -> SyntaxToken {
        self.source.current_token_allowing_regular_expression()
    }

    pub(crate) fn current_token_merging_greater_than(&mut self) -> SyntaxToken {
        self.source.current_token_merging_greater_than()
    }

    /// Start of the current token's text, after its leading trivia.
    pub(crate) fn current_token_start(&mut self) -> u32 {
        let token = self.current_token();
        self.position() + token.leading_trivia_width()
    }

    /// Span of the current token's text.
    pub(crate) fn current_token_span(&mut self) -> Span {
        let token = self.current_token();
        Span::at(self.position() + token.leading_trivia_width(), token.width())
    }

    /// End of the previous token's text, before its trailing trivia.
    pub(crate) fn previous_token_end(&self) -> u32 {
        let trailing = self
            .source
            .previous_token()
            .map_or(0, |token| token.trailing_trivia_width());
        self.position() - trailing
    }

    pub(crate) fn previous_token_has_trailing_newline(&self) -> bool {
        self.source
            .previous_token()
            .is_some_and(|token| token.has_trailing_newline())
    }

    pub(crate) fn move_to_next_token(&mut self) {
        trace!(pos = self.position(), "advance");
        self.source.move_to_next_token();
    }

    /// Consume the current token, whatever it is.
    pub(crate) fn eat_any_token(&mut self) -> SyntaxToken {
        let token = self.current_token();
        self.move_to_next_token();
        token
    }

    /// Consume a token of `kind`, or report it missing.
    pub(crate) fn eat_token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.current_kind() == kind {
            return self.eat_any_token();
        }
        self.create_missing_token(kind)
    }

    pub(crate) fn try_eat_token(&mut self, kind: SyntaxKind) -> Option<SyntaxToken> {
        (self.current_kind() == kind).then(|| self.eat_any_token())
    }

    /// Consume an identifier name scanned for a contextual keyword.
    pub(crate) fn eat_contextual_keyword(&mut self, keyword: SyntaxKind) -> SyntaxToken {
        if self.current_token().keyword_kind() == Some(keyword) {
            return self.eat_any_token();
        }
        let span = self.current_token_span();
        self.report(Diagnostic::token_expected(span, keyword));
        SyntaxToken::missing(SyntaxKind::IdentifierName)
    }

    /// Whether `token` can be used as an identifier here.
    ///
    /// Strict-mode reserved words are identifiers outside strict mode.
    pub(crate) fn is_identifier(&self, token: &SyntaxToken) -> bool {
        match token.kind() {
            SyntaxKind::IdentifierName => true,
            kind => kind.is_strict_mode_reserved_keyword() && !self.strict,
        }
    }

    pub(crate) fn current_is_identifier(&mut self) -> bool {
        let token = self.current_token();
        self.is_identifier(&token)
    }

    /// Consume an identifier. Reserved words used as identifiers outside
    /// strict mode keep their keyword kind.
    pub(crate) fn eat_identifier_token(&mut self) -> SyntaxToken {
        if self.current_is_identifier() {
            return self.eat_any_token();
        }
        self.create_missing_token(SyntaxKind::IdentifierName)
    }

    /// Consume an identifier name, keywords included (after `.`, in
    /// property names).
    pub(crate) fn eat_identifier_name_token(&mut self) -> SyntaxToken {
        if self.current_token().is_identifier_name_or_any_keyword() {
            return self.eat_any_token();
        }
        self.create_missing_token(SyntaxKind::IdentifierName)
    }

    /// Report the current token as not being `expected` and return a
    /// missing token in its place.
    #[cold]
    pub(crate) fn create_missing_token(&mut self, expected: SyntaxKind) -> SyntaxToken {
        let actual = self.current_token();
        let span = self.current_token_span();
        let diagnostic = if expected != SyntaxKind::IdentifierName {
            Diagnostic::token_expected(span, expected)
        } else if actual.kind().is_any_keyword() {
            Diagnostic::identifier_is_keyword(span, actual.text())
        } else {
            Diagnostic::identifier_expected(span)
        };
        self.report(diagnostic);
        SyntaxToken::missing(expected)
    }

    // --- Automatic semicolon insertion ---

    /// Whether a statement may end here without a `;`.
    pub(crate) fn can_eat_automatic_semicolon(&mut self, allow_without_newline: bool) -> bool {
        let kind = self.current_kind();
        kind == SyntaxKind::EndOfFileToken
            || kind == SyntaxKind::CloseBraceToken
            || allow_without_newline
            || self.previous_token_has_trailing_newline()
    }

    pub(crate) fn can_eat_explicit_or_automatic_semicolon(
        &mut self,
        allow_without_newline: bool,
    ) -> bool {
        self.current_kind() == SyntaxKind::SemicolonToken
            || self.can_eat_automatic_semicolon(allow_without_newline)
    }

    /// Consume a `;`, insert one, or report it missing.
    ///
    /// With automatic semicolon insertion disabled an insertable semicolon
    /// is reported at the end of the previous token and is missing.
    pub(crate) fn eat_explicit_or_automatic_semicolon(
        &mut self,
        allow_without_newline: bool,
    ) -> SyntaxToken {
        if self.current_kind() == SyntaxKind::SemicolonToken {
            return self.eat_any_token();
        }
        if !self.can_eat_automatic_semicolon(allow_without_newline) {
            return self.eat_token(SyntaxKind::SemicolonToken);
        }
        if self.options.allow_automatic_semicolon_insertion {
            return SyntaxToken::automatic_semicolon();
        }
        let end = self.previous_token_end();
        self.report(Diagnostic::simple(ErrorCode::E1005, Span::point(end)));
        SyntaxToken::missing(SyntaxKind::SemicolonToken)
    }

    // --- Diagnostics ---

    /// Report unless a diagnostic was already reported at the same position.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> bool {
        let kept = self.diagnostics.report(diagnostic);
        if !kept {
            trace!("diagnostic suppressed at an already reported position");
        }
        kept
    }

    // --- Speculation ---

    fn get_rewind_point(&mut self) -> ParserRewindPoint {
        let source = self.source.get_rewind_point();
        trace!(depth = source.depth(), "rewind point");
        ParserRewindPoint {
            source,
            diagnostics_len: self.diagnostics.len(),
            skipped_len: self.skipped.len(),
            strict: self.strict,
            list_states: self.list_states,
        }
    }

    fn rewind(&mut self, point: &ParserRewindPoint) {
        trace!(depth = point.source.depth(), "rewind");
        self.source.rewind(&point.source);
        self.diagnostics.truncate(point.diagnostics_len);
        self.skipped.truncate(point.skipped_len);
        self.strict = point.strict;
        self.list_states = point.list_states;
    }

    fn release_rewind_point(&mut self, point: ParserRewindPoint) {
        trace!(depth = point.source.depth(), "release rewind point");
        self.source.release_rewind_point(point.source);
    }

    /// Run `attempt`; if it returns `None`, put everything back as it was.
    pub(crate) fn speculate<T>(&mut self, attempt: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let point = self.get_rewind_point();
        let result = attempt(self);
        if result.is_none() {
            debug!(pos = self.position(), "speculative parse rewound");
            self.rewind(&point);
        }
        self.release_rewind_point(point);
        result
    }

    // --- Node reuse ---

    /// A node from the old tree at the current position, if it was built
    /// under the current strict mode.
    fn current_node(&mut self) -> Option<SyntaxNode> {
        let node = self.source.current_node()?;
        (node.parsed_in_strict_mode() == self.strict).then_some(node)
    }

    pub(crate) fn current_node_is(&mut self, accept: fn(SyntaxKind) -> bool) -> bool {
        self.current_node().is_some_and(|node| accept(node.kind()))
    }

    /// Take the current old node if `accept` allows its kind.
    pub(crate) fn try_reuse_node(&mut self, accept: fn(SyntaxKind) -> bool) -> Option<SyntaxElement> {
        let node = self.current_node()?;
        if !accept(node.kind()) {
            return None;
        }
        self.source.move_to_next_node();
        Some(node.into())
    }

    // --- Recovery ---

    /// Drop the current token from the tree.
    pub(crate) fn skip_token(&mut self) {
        let token = self.current_token();
        debug_assert_ne!(token.kind(), SyntaxKind::EndOfFileToken);
        let previous = self.source.previous_token();
        // Consecutive skipped tokens all attach to the last tree token.
        let owner = match (self.skipped.last(), previous) {
            (Some(last), Some(previous)) if last.token.ptr_eq(&previous) => last.owner.clone(),
            (_, previous) => previous,
        };
        debug!(pos = self.position(), kind = %token.kind(), "skipped token");
        self.move_to_next_token();
        self.skipped.push(SkippedToken { token, owner });
    }
}
