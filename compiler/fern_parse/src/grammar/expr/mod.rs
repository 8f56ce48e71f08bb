//! Expressions.
//!
//! Binary operators use precedence climbing over
//! [`SyntaxKind::binary_precedence`]. An expression may be a bare token
//! (identifier, literal, `this`), so productions here return
//! [`SyntaxElement`] rather than [`SyntaxNode`].

mod arrow;
mod primary;

use fern_stack::ensure_sufficient_stack;
use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use crate::list::ListParsingState;
use crate::parser::Parser;
use crate::source::ParserSource;

/// Lowest precedence: the comma operator is allowed.
const EXPRESSION_PRECEDENCE: u8 = 0;
const ASSIGNMENT_PRECEDENCE: u8 = 2;
/// `?:` sits between assignment and `||`.
const CONDITIONAL_PRECEDENCE: u8 = 3;

impl<S: ParserSource> Parser<S> {
    /// Whether `token` can start an expression.
    pub(super) fn is_expression(&self, token: &SyntaxToken) -> bool {
        match token.kind() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::SuperKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::FunctionKeyword => true,
            kind if kind.is_prefix_unary_operator() => true,
            _ => self.is_identifier(token),
        }
    }

    /// Full expression, comma operator included.
    pub(super) fn parse_expression(&mut self, allow_in: bool) -> SyntaxElement {
        self.parse_sub_expression(EXPRESSION_PRECEDENCE, allow_in)
    }

    pub(super) fn parse_assignment_expression(&mut self, allow_in: bool) -> SyntaxElement {
        self.parse_sub_expression(ASSIGNMENT_PRECEDENCE, allow_in)
    }

    /// An expression whose binary operators all bind tighter than
    /// `precedence` (or, for assignments, equally tight).
    fn parse_sub_expression(&mut self, precedence: u8, allow_in: bool) -> SyntaxElement {
        ensure_sufficient_stack(|| {
            if precedence <= ASSIGNMENT_PRECEDENCE {
                if let Some(arrow) = self.try_parse_arrow_function_expression() {
                    return arrow.into();
                }
            }
            let left = self.parse_unary_expression();
            self.parse_binary_or_conditional_expressions(precedence, allow_in, left)
        })
    }

    fn parse_binary_or_conditional_expressions(
        &mut self,
        precedence: u8,
        allow_in: bool,
        mut left: SyntaxElement,
    ) -> SyntaxElement {
        loop {
            let kind = match self.current_kind() {
                // `>>`, `>=` and friends are scanned as separate `>` tokens.
                SyntaxKind::GreaterThanToken => self.current_token_merging_greater_than().kind(),
                kind => kind,
            };

            if kind == SyntaxKind::QuestionToken {
                if precedence > CONDITIONAL_PRECEDENCE {
                    break;
                }
                left = self.parse_conditional_expression(left, allow_in);
                continue;
            }

            if kind == SyntaxKind::InKeyword && !allow_in {
                break;
            }
            let Some(operator_precedence) = kind.binary_precedence() else {
                break;
            };
            // Assignments associate to the right, everything else to the left.
            if operator_precedence < precedence
                || (operator_precedence == precedence && !kind.is_assignment_operator())
            {
                break;
            }

            let operator = self.eat_any_token();
            let right = self.parse_sub_expression(operator_precedence, allow_in);
            left = self
                .factory()
                .node(
                    SyntaxKind::BinaryExpression,
                    [Some(left), slot_token(operator), Some(right)],
                )
                .into();
        }
        left
    }

    fn parse_conditional_expression(&mut self, condition: SyntaxElement, allow_in: bool) -> SyntaxElement {
        let question = self.eat_token(SyntaxKind::QuestionToken);
        let when_true = self.parse_assignment_expression(allow_in);
        let colon = self.eat_token(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression(allow_in);
        self.factory()
            .node(
                SyntaxKind::ConditionalExpression,
                [
                    Some(condition),
                    slot_token(question),
                    Some(when_true),
                    slot_token(colon),
                    Some(when_false),
                ],
            )
            .into()
    }

    fn parse_unary_expression(&mut self) -> SyntaxElement {
        match self.current_kind() {
            kind if kind.is_prefix_unary_operator() => {
                let operator = self.eat_any_token();
                let operand = ensure_sufficient_stack(|| self.parse_unary_expression());
                self.factory()
                    .node(
                        SyntaxKind::PrefixUnaryExpression,
                        [slot_token(operator), Some(operand)],
                    )
                    .into()
            }
            SyntaxKind::LessThanToken => self.parse_cast_expression(),
            _ => self.parse_postfix_expression(),
        }
    }

    /// `<T>expression`.
    fn parse_cast_expression(&mut self) -> SyntaxElement {
        let less_than = self.eat_token(SyntaxKind::LessThanToken);
        let ty = self.parse_type();
        let greater_than = self.eat_token(SyntaxKind::GreaterThanToken);
        let expression = ensure_sufficient_stack(|| self.parse_unary_expression());
        self.factory()
            .node(
                SyntaxKind::CastExpression,
                [
                    slot_token(less_than),
                    Some(ty),
                    slot_token(greater_than),
                    Some(expression),
                ],
            )
            .into()
    }

    fn parse_postfix_expression(&mut self) -> SyntaxElement {
        let expression = self.parse_member_expression(false);
        let is_postfix_operator = matches!(
            self.current_kind(),
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        );
        // A line break before `++` ends the statement instead.
        if !is_postfix_operator || self.previous_token_has_trailing_newline() {
            return expression;
        }
        let operator = self.eat_any_token();
        self.factory()
            .node(
                SyntaxKind::PostfixUnaryExpression,
                [Some(expression), slot_token(operator)],
            )
            .into()
    }

    /// A primary expression followed by calls, member and element
    /// accesses. The target of `new` stops before its argument list.
    fn parse_member_expression(&mut self, in_object_creation: bool) -> SyntaxElement {
        let mut expression = self.parse_primary_expression();
        loop {
            expression = match self.current_kind() {
                SyntaxKind::OpenParenToken if !in_object_creation => {
                    let arguments = self.parse_argument_list();
                    self.factory()
                        .node(
                            SyntaxKind::InvocationExpression,
                            [Some(expression), slot_node(arguments)],
                        )
                        .into()
                }
                SyntaxKind::OpenBracketToken => {
                    let open_bracket = self.eat_any_token();
                    let index = self.parse_expression(true);
                    let close_bracket = self.eat_token(SyntaxKind::CloseBracketToken);
                    self.factory()
                        .node(
                            SyntaxKind::ElementAccessExpression,
                            [
                                Some(expression),
                                slot_token(open_bracket),
                                Some(index),
                                slot_token(close_bracket),
                            ],
                        )
                        .into()
                }
                SyntaxKind::DotToken => {
                    let dot = self.eat_any_token();
                    let name = self.eat_identifier_name_token();
                    self.factory()
                        .node(
                            SyntaxKind::MemberAccessExpression,
                            [Some(expression), slot_token(dot), slot_token(name)],
                        )
                        .into()
                }
                _ => return expression,
            };
        }
    }

    // --- Arguments ---

    fn parse_argument_list(&mut self) -> SyntaxNode {
        let open_paren = self.eat_token(SyntaxKind::OpenParenToken);
        let arguments =
            self.parse_separated_list(ListParsingState::ArgumentListAssignmentExpressions);
        let close_paren = self.eat_token(SyntaxKind::CloseParenToken);
        self.factory().node(
            SyntaxKind::ArgumentList,
            [slot_token(open_paren), slot_node(arguments), slot_token(close_paren)],
        )
    }

    /// A comma counts as an item start so `f(a,,b)` reports the hole as a
    /// missing expression rather than skipping the comma.
    pub(crate) fn is_expression_or_comma(&mut self, _in_error_recovery: bool) -> bool {
        let token = self.current_token();
        token.kind() == SyntaxKind::CommaToken || self.is_expression(&token)
    }

    pub(crate) fn is_argument_list_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::CloseParenToken | SyntaxKind::SemicolonToken
        )
    }

    pub(crate) fn parse_argument(&mut self) -> SyntaxElement {
        self.parse_assignment_expression(true)
    }
}

#[cfg(test)]
mod tests;
