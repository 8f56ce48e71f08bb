//! Primary expressions and literals.

use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use crate::list::ListParsingState;
use crate::parser::Parser;
use crate::source::ParserSource;

impl<S: ParserSource> Parser<S> {
    pub(super) fn parse_primary_expression(&mut self) -> SyntaxElement {
        let current = self.current_token();
        if self.is_identifier(&current) {
            if self.peek_kind(1) == SyntaxKind::EqualsGreaterThanToken {
                return self.parse_simple_arrow_function_expression().into();
            }
            return self.eat_any_token().into();
        }

        match current.kind() {
            SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => self.eat_any_token().into(),
            kind if kind.is_literal() => self.eat_any_token().into(),
            SyntaxKind::NewKeyword => self.parse_object_creation_expression().into(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression().into(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal_expression().into(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal_expression().into(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression().into(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                match self.try_reparse_divide_as_regular_expression() {
                    Some(literal) => literal.into(),
                    None => self.eat_identifier_token().into(),
                }
            }
            _ => self.eat_identifier_token().into(),
        }
    }

    /// A `/` where an operand is expected starts a regular expression,
    /// unless the token before it ends an operand.
    fn try_reparse_divide_as_regular_expression(&mut self) -> Option<SyntaxToken> {
        let ends_operand = self.previous_token().is_some_and(|previous| {
            let kind = previous.kind();
            self.is_identifier(&previous)
                || kind.is_literal()
                || matches!(
                    kind,
                    SyntaxKind::ThisKeyword
                        | SyntaxKind::SuperKeyword
                        | SyntaxKind::PlusPlusToken
                        | SyntaxKind::MinusMinusToken
                        | SyntaxKind::CloseBracketToken
                )
                || (kind == SyntaxKind::CloseParenToken && !self.ends_statement_header(&previous))
        });
        if ends_operand {
            return None;
        }
        let token = self.current_token_allowing_regular_expression();
        (token.kind() == SyntaxKind::RegularExpressionLiteral).then(|| self.eat_any_token())
    }

    /// `new Target(args)`; the argument list is optional.
    fn parse_object_creation_expression(&mut self) -> SyntaxNode {
        let new_keyword = self.eat_token(SyntaxKind::NewKeyword);
        let target = self.parse_member_expression(true);
        let arguments = (self.current_kind() == SyntaxKind::OpenParenToken)
            .then(|| self.parse_argument_list());
        self.factory().node(
            SyntaxKind::ObjectCreationExpression,
            [slot_token(new_keyword), Some(target), arguments.map(Into::into)],
        )
    }

    fn parse_function_expression(&mut self) -> SyntaxNode {
        let function_keyword = self.eat_token(SyntaxKind::FunctionKeyword);
        let identifier = self
            .current_is_identifier()
            .then(|| self.eat_identifier_token());
        let signature = self.parse_call_signature();
        let body = self.parse_block(true);
        self.factory().node(
            SyntaxKind::FunctionExpression,
            [
                slot_token(function_keyword),
                identifier.map(Into::into),
                slot_node(signature),
                slot_node(body),
            ],
        )
    }

    fn parse_parenthesized_expression(&mut self) -> SyntaxNode {
        let open_paren = self.eat_token(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression(true);
        let close_paren = self.eat_token(SyntaxKind::CloseParenToken);
        self.factory().node(
            SyntaxKind::ParenthesizedExpression,
            [slot_token(open_paren), Some(expression), slot_token(close_paren)],
        )
    }

    // --- Array literals ---

    fn parse_array_literal_expression(&mut self) -> SyntaxNode {
        let open_bracket = self.eat_token(SyntaxKind::OpenBracketToken);
        let elements =
            self.parse_separated_list(ListParsingState::ArrayLiteralExpressionAssignmentExpressions);
        let close_bracket = self.eat_token(SyntaxKind::CloseBracketToken);
        self.factory().node(
            SyntaxKind::ArrayLiteralExpression,
            [slot_token(open_bracket), slot_node(elements), slot_token(close_bracket)],
        )
    }

    pub(crate) fn parse_array_element(&mut self) -> SyntaxElement {
        if self.current_kind() == SyntaxKind::CommaToken {
            return self
                .factory()
                .node(SyntaxKind::OmittedExpression, std::iter::empty())
                .into();
        }
        self.parse_assignment_expression(true)
    }

    // --- Object literals ---

    fn parse_object_literal_expression(&mut self) -> SyntaxNode {
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let properties =
            self.parse_separated_list(ListParsingState::ObjectLiteralExpressionPropertyAssignments);
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::ObjectLiteralExpression,
            [slot_token(open_brace), slot_node(properties), slot_token(close_brace)],
        )
    }

    pub(crate) fn is_property_assignment(&mut self, in_error_recovery: bool) -> bool {
        let current = self.current_token();
        self.is_member_accessor(0, in_error_recovery)
            || self.is_property_name(&current, in_error_recovery)
    }

    pub(crate) fn parse_property_assignment(&mut self) -> SyntaxElement {
        if self.is_member_accessor(0, false) {
            let modifiers = self.factory().modifiers(Vec::new());
            return self.parse_accessor(modifiers).into();
        }

        let name = self.eat_property_name();
        if matches!(
            self.current_kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let signature = self.parse_call_signature();
            let body = self.parse_block(true);
            return self
                .factory()
                .node(
                    SyntaxKind::FunctionPropertyAssignment,
                    [slot_token(name), slot_node(signature), slot_node(body)],
                )
                .into();
        }

        let colon = self.eat_token(SyntaxKind::ColonToken);
        let value = self.parse_assignment_expression(true);
        self.factory()
            .node(
                SyntaxKind::SimplePropertyAssignment,
                [slot_token(name), slot_token(colon), Some(value)],
            )
            .into()
    }
}
