//! Statements.

use fern_stack::ensure_sufficient_stack;
use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use crate::list::ListParsingState;
use crate::parser::Parser;
use crate::source::ParserSource;

impl<S: ParserSource> Parser<S> {
    pub(crate) fn is_statement(&mut self, in_error_recovery: bool) -> bool {
        if self.current_node_is(SyntaxKind::is_statement) {
            return true;
        }

        let current = self.current_kind();
        match current {
            // Looks like a class member that lost its class.
            SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword | SyntaxKind::StaticKeyword
                if self.peek_token(1).is_identifier_name_or_any_keyword() =>
            {
                return false;
            }
            SyntaxKind::IfKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::FunctionKeyword => return true,
            _ => {}
        }

        let modifiers = self.modifier_count();
        if modifiers > 0
            && matches!(
                self.peek_kind(modifiers),
                SyntaxKind::VarKeyword | SyntaxKind::FunctionKeyword
            )
        {
            return true;
        }

        if self.is_labeled_statement() {
            return true;
        }
        if current == SyntaxKind::SemicolonToken {
            // A stray `;` while recovering is not worth a statement.
            return !in_error_recovery;
        }
        self.is_expression_statement()
    }

    fn is_labeled_statement(&mut self) -> bool {
        self.current_is_identifier() && self.peek_kind(1) == SyntaxKind::ColonToken
    }

    /// `{` starts a block and `function` a declaration, never an
    /// expression statement.
    fn is_expression_statement(&mut self) -> bool {
        let current = self.current_token();
        !matches!(
            current.kind(),
            SyntaxKind::OpenBraceToken | SyntaxKind::FunctionKeyword
        ) && self.is_expression(&current)
    }

    pub(crate) fn parse_statement(&mut self) -> SyntaxElement {
        if let Some(node) = self.try_reuse_node(SyntaxKind::is_statement) {
            return node;
        }
        self.parse_statement_node().into()
    }

    pub(super) fn parse_statement_node(&mut self) -> SyntaxNode {
        ensure_sufficient_stack(|| self.parse_statement_worker())
    }

    fn parse_statement_worker(&mut self) -> SyntaxNode {
        let modifiers = self.modifier_count();
        if self.is_function_declaration(modifiers) {
            return self.parse_function_declaration();
        }
        if self.peek_kind(modifiers) == SyntaxKind::VarKeyword {
            return self.parse_variable_statement();
        }

        match self.current_kind() {
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::OpenBraceToken => self.parse_block(false),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue(SyntaxKind::BreakStatement),
            SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue(SyntaxKind::ContinueStatement)
            }
            SyntaxKind::ForKeyword => self.parse_for_or_for_in_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::SemicolonToken => {
                let semicolon = self.eat_any_token();
                self.factory()
                    .node(SyntaxKind::EmptyStatement, [slot_token(semicolon)])
            }
            _ if self.is_labeled_statement() => self.parse_labeled_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    // --- Variables ---

    fn parse_variable_statement(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let declaration = self.parse_variable_declaration(true);
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            SyntaxKind::VariableStatement,
            [
                slot_node(modifiers),
                slot_node(declaration),
                slot_token(semicolon),
            ],
        )
    }

    /// `var a = 1, b`. With `allow_in` off (a `for` initializer) `in`
    /// ends the declarators.
    fn parse_variable_declaration(&mut self, allow_in: bool) -> SyntaxNode {
        let var_keyword = self.eat_token(SyntaxKind::VarKeyword);
        let state = if allow_in {
            ListParsingState::VariableDeclarationVariableDeclaratorsAllowIn
        } else {
            ListParsingState::VariableDeclarationVariableDeclaratorsDisallowIn
        };
        let declarators = self.parse_separated_list(state);
        self.factory().node(
            SyntaxKind::VariableDeclaration,
            [slot_token(var_keyword), slot_node(declarators)],
        )
    }

    pub(crate) fn is_variable_declarator(&mut self, _in_error_recovery: bool) -> bool {
        self.current_is_identifier()
    }

    pub(crate) fn is_variable_declarators_allow_in_terminator(&mut self) -> bool {
        // `var a,` must be followed by another declarator.
        if self
            .previous_token()
            .is_some_and(|token| token.kind() == SyntaxKind::CommaToken)
        {
            return false;
        }
        // `var f = x => ...` is cut short before the arrow.
        if self.current_kind() == SyntaxKind::EqualsGreaterThanToken {
            return true;
        }
        self.can_eat_explicit_or_automatic_semicolon(false)
    }

    pub(crate) fn is_variable_declarators_disallow_in_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseParenToken | SyntaxKind::InKeyword
        )
    }

    pub(crate) fn parse_variable_declarator_allow_in(&mut self) -> SyntaxElement {
        self.parse_variable_declarator(true, false).into()
    }

    pub(crate) fn parse_variable_declarator_disallow_in(&mut self) -> SyntaxElement {
        self.parse_variable_declarator(false, false).into()
    }

    /// `name: type = value`. Member variables name themselves with any
    /// property name.
    pub(super) fn parse_variable_declarator(&mut self, allow_in: bool, property_name: bool) -> SyntaxNode {
        let name = if property_name {
            self.eat_property_name()
        } else {
            self.eat_identifier_token()
        };
        let type_annotation = self.parse_optional_type_annotation();
        let initializer = (self.current_kind() == SyntaxKind::EqualsToken)
            .then(|| self.parse_equals_value_clause(allow_in));
        self.factory().node(
            SyntaxKind::VariableDeclarator,
            [
                slot_token(name),
                type_annotation.map(Into::into),
                initializer.map(Into::into),
            ],
        )
    }

    pub(super) fn parse_equals_value_clause(&mut self, allow_in: bool) -> SyntaxNode {
        let equals = self.eat_token(SyntaxKind::EqualsToken);
        let value = self.parse_assignment_expression(allow_in);
        self.factory()
            .node(SyntaxKind::EqualsValueClause, [slot_token(equals), Some(value)])
    }

    // --- Control flow ---

    /// `( expression )` around a condition.
    fn parse_parenthesized_condition(&mut self) -> [Option<SyntaxElement>; 3] {
        let open_paren = self.eat_token(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression(true);
        let close_paren = self.eat_statement_header_close_paren();
        [slot_token(open_paren), Some(condition), slot_token(close_paren)]
    }

    fn eat_statement_header_close_paren(&mut self) -> SyntaxToken {
        let close_paren = self.eat_token(SyntaxKind::CloseParenToken);
        self.set_statement_header_end(close_paren.clone());
        close_paren
    }

    fn parse_if_statement(&mut self) -> SyntaxNode {
        let if_keyword = self.eat_token(SyntaxKind::IfKeyword);
        let [open_paren, condition, close_paren] = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        let else_clause = (self.current_kind() == SyntaxKind::ElseKeyword).then(|| {
            let else_keyword = self.eat_any_token();
            let statement = self.parse_statement();
            self.factory()
                .node(SyntaxKind::ElseClause, [slot_token(else_keyword), Some(statement)])
        });
        self.factory().node(
            SyntaxKind::IfStatement,
            [
                slot_token(if_keyword),
                open_paren,
                condition,
                close_paren,
                Some(statement),
                else_clause.map(Into::into),
            ],
        )
    }

    fn parse_while_statement(&mut self) -> SyntaxNode {
        let while_keyword = self.eat_token(SyntaxKind::WhileKeyword);
        let [open_paren, condition, close_paren] = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.factory().node(
            SyntaxKind::WhileStatement,
            [
                slot_token(while_keyword),
                open_paren,
                condition,
                close_paren,
                Some(statement),
            ],
        )
    }

    fn parse_do_statement(&mut self) -> SyntaxNode {
        let do_keyword = self.eat_token(SyntaxKind::DoKeyword);
        let statement = self.parse_statement();
        let while_keyword = self.eat_token(SyntaxKind::WhileKeyword);
        let [open_paren, condition, close_paren] = self.parse_parenthesized_condition();
        // `do x; while (y) z` needs no newline before `z`.
        let semicolon = self.eat_explicit_or_automatic_semicolon(true);
        self.factory().node(
            SyntaxKind::DoStatement,
            [
                slot_token(do_keyword),
                Some(statement),
                slot_token(while_keyword),
                open_paren,
                condition,
                close_paren,
                slot_token(semicolon),
            ],
        )
    }

    fn parse_for_or_for_in_statement(&mut self) -> SyntaxNode {
        let for_keyword = self.eat_token(SyntaxKind::ForKeyword);
        let open_paren = self.eat_token(SyntaxKind::OpenParenToken);

        match self.current_kind() {
            SyntaxKind::VarKeyword => {
                let declaration = self.parse_variable_declaration(false);
                let single_declarator = declaration
                    .child_node(1)
                    .is_some_and(|list| list.child_count() == 1);
                if single_declarator && self.current_kind() == SyntaxKind::InKeyword {
                    self.parse_for_in_rest(for_keyword, open_paren, slot_node(declaration), None)
                } else {
                    self.parse_for_rest(for_keyword, open_paren, slot_node(declaration), None)
                }
            }
            SyntaxKind::SemicolonToken => self.parse_for_rest(for_keyword, open_paren, None, None),
            _ => {
                let initializer = self.parse_expression(false);
                if self.current_kind() == SyntaxKind::InKeyword {
                    self.parse_for_in_rest(for_keyword, open_paren, None, Some(initializer))
                } else {
                    self.parse_for_rest(for_keyword, open_paren, None, Some(initializer))
                }
            }
        }
    }

    fn parse_for_rest(
        &mut self,
        for_keyword: SyntaxToken,
        open_paren: SyntaxToken,
        declaration: Option<SyntaxElement>,
        initializer: Option<SyntaxElement>,
    ) -> SyntaxNode {
        let first_semicolon = self.eat_token(SyntaxKind::SemicolonToken);
        let condition =
            (self.current_kind() != SyntaxKind::SemicolonToken).then(|| self.parse_expression(true));
        let second_semicolon = self.eat_token(SyntaxKind::SemicolonToken);
        let incrementor =
            (self.current_kind() != SyntaxKind::CloseParenToken).then(|| self.parse_expression(true));
        let close_paren = self.eat_statement_header_close_paren();
        let statement = self.parse_statement();
        self.factory().node(
            SyntaxKind::ForStatement,
            [
                slot_token(for_keyword),
                slot_token(open_paren),
                declaration,
                initializer,
                slot_token(first_semicolon),
                condition,
                slot_token(second_semicolon),
                incrementor,
                slot_token(close_paren),
                Some(statement),
            ],
        )
    }

    fn parse_for_in_rest(
        &mut self,
        for_keyword: SyntaxToken,
        open_paren: SyntaxToken,
        declaration: Option<SyntaxElement>,
        left: Option<SyntaxElement>,
    ) -> SyntaxNode {
        let in_keyword = self.eat_token(SyntaxKind::InKeyword);
        let expression = self.parse_expression(true);
        let close_paren = self.eat_statement_header_close_paren();
        let statement = self.parse_statement();
        self.factory().node(
            SyntaxKind::ForInStatement,
            [
                slot_token(for_keyword),
                slot_token(open_paren),
                declaration,
                left,
                slot_token(in_keyword),
                Some(expression),
                slot_token(close_paren),
                Some(statement),
            ],
        )
    }

    fn parse_return_statement(&mut self) -> SyntaxNode {
        let return_keyword = self.eat_token(SyntaxKind::ReturnKeyword);
        let expression = (!self.can_eat_explicit_or_automatic_semicolon(false))
            .then(|| self.parse_expression(true));
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            SyntaxKind::ReturnStatement,
            [slot_token(return_keyword), expression, slot_token(semicolon)],
        )
    }

    fn parse_break_or_continue(&mut self, kind: SyntaxKind) -> SyntaxNode {
        let keyword = self.eat_any_token();
        let label = (!self.can_eat_explicit_or_automatic_semicolon(false)
            && self.current_is_identifier())
        .then(|| self.eat_identifier_token());
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            kind,
            [slot_token(keyword), label.map(Into::into), slot_token(semicolon)],
        )
    }

    /// `throw` always needs an expression on the same line; a line break
    /// right after it leaves a missing identifier.
    fn parse_throw_statement(&mut self) -> SyntaxNode {
        let throw_keyword = self.eat_token(SyntaxKind::ThrowKeyword);
        let expression = if self.can_eat_explicit_or_automatic_semicolon(false) {
            self.create_missing_token(SyntaxKind::IdentifierName).into()
        } else {
            self.parse_expression(true)
        };
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            SyntaxKind::ThrowStatement,
            [slot_token(throw_keyword), Some(expression), slot_token(semicolon)],
        )
    }

    fn parse_try_statement(&mut self) -> SyntaxNode {
        let try_keyword = self.eat_token(SyntaxKind::TryKeyword);
        let block = self.parse_block(false);
        let catch_clause =
            (self.current_kind() == SyntaxKind::CatchKeyword).then(|| self.parse_catch_clause());
        // Without a catch clause the finally clause is required.
        let finally_clause = (catch_clause.is_none()
            || self.current_kind() == SyntaxKind::FinallyKeyword)
            .then(|| self.parse_finally_clause());
        self.factory().node(
            SyntaxKind::TryStatement,
            [
                slot_token(try_keyword),
                slot_node(block),
                catch_clause.map(Into::into),
                finally_clause.map(Into::into),
            ],
        )
    }

    fn parse_catch_clause(&mut self) -> SyntaxNode {
        let catch_keyword = self.eat_token(SyntaxKind::CatchKeyword);
        let open_paren = self.eat_token(SyntaxKind::OpenParenToken);
        let identifier = self.eat_identifier_token();
        let type_annotation = self.parse_optional_type_annotation();
        let close_paren = self.eat_token(SyntaxKind::CloseParenToken);
        let block = self.parse_block(false);
        self.factory().node(
            SyntaxKind::CatchClause,
            [
                slot_token(catch_keyword),
                slot_token(open_paren),
                slot_token(identifier),
                type_annotation.map(Into::into),
                slot_token(close_paren),
                slot_node(block),
            ],
        )
    }

    fn parse_finally_clause(&mut self) -> SyntaxNode {
        let finally_keyword = self.eat_token(SyntaxKind::FinallyKeyword);
        let block = self.parse_block(false);
        self.factory().node(
            SyntaxKind::FinallyClause,
            [slot_token(finally_keyword), slot_node(block)],
        )
    }

    // --- Switch ---

    fn parse_switch_statement(&mut self) -> SyntaxNode {
        let switch_keyword = self.eat_token(SyntaxKind::SwitchKeyword);
        let [open_paren, expression, close_paren] = self.parse_parenthesized_condition();
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let clauses = if open_brace.is_missing() {
            self.factory().list(Vec::new(), false)
        } else {
            self.parse_list(ListParsingState::SwitchStatementSwitchClauses, None)
        };
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::SwitchStatement,
            [
                slot_token(switch_keyword),
                open_paren,
                expression,
                close_paren,
                slot_token(open_brace),
                slot_node(clauses),
                slot_token(close_brace),
            ],
        )
    }

    pub(crate) fn is_switch_clause(&mut self, _in_error_recovery: bool) -> bool {
        self.current_node_is(SyntaxKind::is_switch_clause)
            || matches!(
                self.current_kind(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            )
    }

    pub(crate) fn parse_switch_clause(&mut self) -> SyntaxElement {
        if let Some(node) = self.try_reuse_node(SyntaxKind::is_switch_clause) {
            return node;
        }
        let node = if self.current_kind() == SyntaxKind::CaseKeyword {
            let case_keyword = self.eat_any_token();
            let expression = self.parse_expression(true);
            let colon = self.eat_token(SyntaxKind::ColonToken);
            let statements = self.parse_list(ListParsingState::SwitchClauseStatements, None);
            self.factory().node(
                SyntaxKind::CaseSwitchClause,
                [
                    slot_token(case_keyword),
                    Some(expression),
                    slot_token(colon),
                    slot_node(statements),
                ],
            )
        } else {
            let default_keyword = self.eat_token(SyntaxKind::DefaultKeyword);
            let colon = self.eat_token(SyntaxKind::ColonToken);
            let statements = self.parse_list(ListParsingState::SwitchClauseStatements, None);
            self.factory().node(
                SyntaxKind::DefaultSwitchClause,
                [slot_token(default_keyword), slot_token(colon), slot_node(statements)],
            )
        };
        node.into()
    }

    pub(crate) fn is_switch_clause_statements_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        )
    }

    // --- Simple statements ---

    fn parse_labeled_statement(&mut self) -> SyntaxNode {
        let label = self.eat_identifier_token();
        let colon = self.eat_token(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.factory().node(
            SyntaxKind::LabeledStatement,
            [slot_token(label), slot_token(colon), Some(statement)],
        )
    }

    fn parse_debugger_statement(&mut self) -> SyntaxNode {
        let debugger_keyword = self.eat_token(SyntaxKind::DebuggerKeyword);
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            SyntaxKind::DebuggerStatement,
            [slot_token(debugger_keyword), slot_token(semicolon)],
        )
    }

    fn parse_expression_statement(&mut self) -> SyntaxNode {
        let expression = self.parse_expression(true);
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            SyntaxKind::ExpressionStatement,
            [Some(expression), slot_token(semicolon)],
        )
    }
}
