//! Arrow functions.
//!
//! `(` may open a parenthesized expression or the parameter list of an
//! arrow function. A few tokens of lookahead settle the common cases; the
//! rest are parsed speculatively as an arrow function and rewound unless
//! the `=>` turns up.

use fern_diagnostic::{Diagnostic, ErrorCode};
use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use tracing::trace;

use crate::parser::Parser;
use crate::source::ParserSource;

impl<S: ParserSource> Parser<S> {
    pub(super) fn try_parse_arrow_function_expression(&mut self) -> Option<SyntaxNode> {
        if self.is_simple_arrow_function_expression() {
            return Some(self.parse_simple_arrow_function_expression());
        }
        if !matches!(
            self.current_kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            return None;
        }
        if self.is_definitely_arrow_function_expression() {
            trace!(pos = self.position(), "definite arrow function");
            if let Some(arrow) = self.parse_parenthesized_arrow_function_expression(false) {
                return Some(arrow);
            }
        }
        if !self.is_possibly_arrow_function_expression() {
            return None;
        }
        self.speculate(|parser| parser.parse_parenthesized_arrow_function_expression(true))
    }

    /// `x => ...`, or a bare `=>` standing in for a missing parameter.
    fn is_simple_arrow_function_expression(&mut self) -> bool {
        if self.current_kind() == SyntaxKind::EqualsGreaterThanToken {
            return true;
        }
        self.current_is_identifier() && self.peek_kind(1) == SyntaxKind::EqualsGreaterThanToken
    }

    /// `()`, `(...`, `(a:`, `(a?:`, `(a?,`, `(a?)` and `(a) =>` can only
    /// start an arrow function.
    fn is_definitely_arrow_function_expression(&mut self) -> bool {
        if self.current_kind() != SyntaxKind::OpenParenToken {
            return false;
        }
        let token1 = self.peek_token(1);
        match token1.kind() {
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => return true,
            _ if !self.is_identifier(&token1) => return false,
            _ => {}
        }
        match self.peek_kind(2) {
            SyntaxKind::ColonToken => true,
            SyntaxKind::QuestionToken => matches!(
                self.peek_kind(3),
                SyntaxKind::ColonToken | SyntaxKind::CloseParenToken | SyntaxKind::CommaToken
            ),
            SyntaxKind::CloseParenToken => {
                self.peek_kind(3) == SyntaxKind::EqualsGreaterThanToken
            }
            _ => false,
        }
    }

    /// Anything starting with `<`, and `(a =`, `(a,` or `(a):`, may be an
    /// arrow function.
    fn is_possibly_arrow_function_expression(&mut self) -> bool {
        if self.current_kind() != SyntaxKind::OpenParenToken {
            return true;
        }
        let token1 = self.peek_token(1);
        if !self.is_identifier(&token1) {
            return false;
        }
        match self.peek_kind(2) {
            SyntaxKind::EqualsToken | SyntaxKind::CommaToken => true,
            SyntaxKind::CloseParenToken => self.peek_kind(3) == SyntaxKind::ColonToken,
            _ => false,
        }
    }

    pub(super) fn parse_simple_arrow_function_expression(&mut self) -> SyntaxNode {
        let identifier = self.eat_identifier_token();
        let arrow = self.eat_arrow();
        let body = self.parse_arrow_function_body();
        self.factory().node(
            SyntaxKind::SimpleArrowFunctionExpression,
            [slot_token(identifier), slot_token(arrow), Some(body)],
        )
    }

    /// With `require_arrow`, gives up (returning `None`) unless the call
    /// signature is complete and followed by `=>`.
    fn parse_parenthesized_arrow_function_expression(
        &mut self,
        require_arrow: bool,
    ) -> Option<SyntaxNode> {
        let signature = self.try_parse_complete_call_signature()?;
        if require_arrow && self.current_kind() != SyntaxKind::EqualsGreaterThanToken {
            return None;
        }
        let arrow = self.eat_arrow();
        let body = self.parse_arrow_function_body();
        Some(self.factory().node(
            SyntaxKind::ParenthesizedArrowFunctionExpression,
            [slot_node(signature), slot_token(arrow), Some(body)],
        ))
    }

    /// `=>`, which may not start a line.
    fn eat_arrow(&mut self) -> SyntaxToken {
        if self.current_kind() == SyntaxKind::EqualsGreaterThanToken
            && self.previous_token_has_trailing_newline()
        {
            let span = self.current_token_span();
            self.report(Diagnostic::simple(ErrorCode::E1008, span));
        }
        self.eat_token(SyntaxKind::EqualsGreaterThanToken)
    }

    fn parse_arrow_function_body(&mut self) -> SyntaxElement {
        if self.current_kind() == SyntaxKind::OpenBraceToken {
            return self.parse_block(true).into();
        }
        self.parse_assignment_expression(true)
    }
}
