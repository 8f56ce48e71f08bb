//! List loops, the list policy table and list-level error recovery.
//!
//! Each [`ListParsingState`] indexes one row of [`Parser::LIST_POLICIES`]:
//! how to recognise the start of an item, how to recognise the end of the
//! list, and how to parse one item. When the current token is neither, the
//! parser reports it and consults every list that is currently active: if
//! any of them could use the token (as an item or as its terminator), the
//! inner list ends and lets the enclosing production deal with it;
//! otherwise the token is skipped.

use fern_diagnostic::{Diagnostic, ErrorCode};
use fern_syntax::{Span, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use tracing::debug;

use super::Parser;
use crate::list::{ListParsingState, SeparatorPolicy};
use crate::source::ParserSource;

/// Behaviour of one list state.
pub(crate) struct ListPolicy<S: ParserSource> {
    /// Whether the current token starts an item. The flag is set while the
    /// list is recovering from a missing separator, where item starts are
    /// recognised more strictly.
    pub is_item: fn(&mut Parser<S>, bool) -> bool,
    pub is_terminator: fn(&mut Parser<S>) -> bool,
    pub parse_item: fn(&mut Parser<S>) -> SyntaxElement,
}

impl<S: ParserSource> Clone for ListPolicy<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ParserSource> Copy for ListPolicy<S> {}

/// Called after every item of an unseparated list with the items so far.
pub(crate) type ProcessItems<S> = fn(&mut Parser<S>, &[SyntaxElement]);

impl<S: ParserSource> Parser<S> {
    /// Rows in [`ListParsingState::ALL`] order.
    const LIST_POLICIES: [ListPolicy<S>; ListParsingState::COUNT] = [
        // SourceUnitModuleElements
        ListPolicy {
            is_item: Self::is_module_element,
            is_terminator: Self::is_end_of_file,
            parse_item: Self::parse_module_element,
        },
        // ClassDeclarationClassElements
        ListPolicy {
            is_item: Self::is_class_element,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_class_element,
        },
        // ModuleDeclarationModuleElements
        ListPolicy {
            is_item: Self::is_module_element,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_module_element,
        },
        // SwitchStatementSwitchClauses
        ListPolicy {
            is_item: Self::is_switch_clause,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_switch_clause,
        },
        // SwitchClauseStatements
        ListPolicy {
            is_item: Self::is_statement,
            is_terminator: Self::is_switch_clause_statements_terminator,
            parse_item: Self::parse_statement,
        },
        // BlockStatements
        ListPolicy {
            is_item: Self::is_statement,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_statement,
        },
        // EnumDeclarationEnumElements
        ListPolicy {
            is_item: Self::is_enum_element,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_enum_element,
        },
        // ObjectTypeTypeMembers
        ListPolicy {
            is_item: Self::is_type_member,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_type_member,
        },
        // ClassOrInterfaceDeclarationHeritageClauses
        ListPolicy {
            is_item: Self::is_heritage_clause,
            is_terminator: Self::is_heritage_clauses_terminator,
            parse_item: Self::parse_heritage_clause,
        },
        // HeritageClauseTypeNameList
        ListPolicy {
            is_item: Self::is_heritage_type_name,
            is_terminator: Self::is_heritage_type_names_terminator,
            parse_item: Self::parse_heritage_type_name,
        },
        // VariableDeclarationVariableDeclaratorsAllowIn
        ListPolicy {
            is_item: Self::is_variable_declarator,
            is_terminator: Self::is_variable_declarators_allow_in_terminator,
            parse_item: Self::parse_variable_declarator_allow_in,
        },
        // VariableDeclarationVariableDeclaratorsDisallowIn
        ListPolicy {
            is_item: Self::is_variable_declarator,
            is_terminator: Self::is_variable_declarators_disallow_in_terminator,
            parse_item: Self::parse_variable_declarator_disallow_in,
        },
        // ArgumentListAssignmentExpressions
        ListPolicy {
            is_item: Self::is_expression_or_comma,
            is_terminator: Self::is_argument_list_terminator,
            parse_item: Self::parse_argument,
        },
        // ObjectLiteralExpressionPropertyAssignments
        ListPolicy {
            is_item: Self::is_property_assignment,
            is_terminator: Self::is_close_brace,
            parse_item: Self::parse_property_assignment,
        },
        // ArrayLiteralExpressionAssignmentExpressions
        ListPolicy {
            is_item: Self::is_expression_or_comma,
            is_terminator: Self::is_close_bracket,
            parse_item: Self::parse_array_element,
        },
        // ParameterListParameters
        ListPolicy {
            is_item: Self::is_parameter,
            is_terminator: Self::is_parameter_list_terminator,
            parse_item: Self::parse_parameter,
        },
        // TypeArgumentListTypes
        ListPolicy {
            is_item: Self::is_type_argument,
            is_terminator: Self::is_type_argument_list_terminator,
            parse_item: Self::parse_type_argument,
        },
        // TypeParameterListTypeParameters
        ListPolicy {
            is_item: Self::is_type_parameter,
            is_terminator: Self::is_type_parameter_list_terminator,
            parse_item: Self::parse_type_parameter,
        },
    ];

    #[inline]
    fn policy(state: ListParsingState) -> ListPolicy<S> {
        Self::LIST_POLICIES[state.index()]
    }

    /// Parse an unseparated list.
    pub(crate) fn parse_list(
        &mut self,
        state: ListParsingState,
        process_items: Option<ProcessItems<S>>,
    ) -> SyntaxNode {
        let saved = self.list_states();
        self.set_list_states(saved.with(state));
        let list = self.parse_list_items(state, process_items);
        self.set_list_states(saved);
        list
    }

    /// Parse a separated list; the separator rules come from `state`.
    pub(crate) fn parse_separated_list(&mut self, state: ListParsingState) -> SyntaxNode {
        let Some(separator) = state.separator() else {
            unreachable!("{state:?} is not a separated list");
        };
        let saved = self.list_states();
        self.set_list_states(saved.with(state));
        let list = self.parse_separated_list_items(state, separator);
        self.set_list_states(saved);
        list
    }

    fn parse_list_items(
        &mut self,
        state: ListParsingState,
        process_items: Option<ProcessItems<S>>,
    ) -> SyntaxNode {
        let policy = Self::policy(state);
        let mut items = Vec::new();
        let mut has_diagnostic = false;
        let mut last_item_start = None;

        loop {
            if (policy.is_item)(self, false) {
                let start = self.position();
                if last_item_start == Some(start) {
                    // The previous item consumed nothing.
                    has_diagnostic = true;
                    self.report_unexpected_token(state);
                    self.skip_token();
                    continue;
                }
                last_item_start = Some(start);
                items.push((policy.parse_item)(self));
                if let Some(process) = process_items {
                    process(self, &items);
                }
                continue;
            }

            if self.is_list_terminated(policy) {
                break;
            }
            has_diagnostic = true;
            if self.abort_parsing_list_or_move_to_next_token(state) {
                break;
            }
        }

        self.factory().list(items, has_diagnostic)
    }

    fn parse_separated_list_items(
        &mut self,
        state: ListParsingState,
        separator: SeparatorPolicy,
    ) -> SyntaxNode {
        let policy = Self::policy(state);
        let mut items: Vec<SyntaxElement> = Vec::new();
        let mut has_diagnostic = false;
        let mut in_error_recovery = false;
        let mut item_count = 0usize;
        let mut separator_count = 0usize;
        let mut last_separator: Option<(SyntaxToken, u32)> = None;
        let mut last_item_start = None;

        loop {
            if !(policy.is_item)(self, in_error_recovery) {
                if self.is_list_terminated(policy) {
                    break;
                }
                has_diagnostic = true;
                if self.abort_parsing_list_or_move_to_next_token(state) {
                    break;
                }
                continue;
            }

            let start = self.position();
            if last_item_start == Some(start) {
                // A whole item and separator went by without consuming text.
                has_diagnostic = true;
                self.report_unexpected_token(state);
                self.skip_token();
                continue;
            }
            last_item_start = Some(start);
            items.push((policy.parse_item)(self));
            item_count += 1;
            in_error_recovery = false;

            let current = self.current_kind();
            if current == separator.kind || current == SyntaxKind::CommaToken {
                let separator_start = self.current_token_start();
                let token = self.eat_any_token();
                last_separator = Some((token.clone(), separator_start));
                items.push(token.into());
                separator_count += 1;
                continue;
            }

            if self.is_list_terminated(policy) {
                break;
            }

            if separator.allows_automatic_semicolon() && self.can_eat_automatic_semicolon(false) {
                let token = self.eat_explicit_or_automatic_semicolon(false);
                last_separator = None;
                items.push(token.into());
                separator_count += 1;
                continue;
            }

            let token = self.eat_token(separator.kind);
            last_separator = None;
            items.push(token.into());
            separator_count += 1;
            in_error_recovery = true;
        }

        if !separator.allows_trailing && item_count > 0 && separator_count == item_count {
            if let Some((token, start)) = last_separator.filter(|(token, _)| !token.is_missing()) {
                let span = Span::at(start, token.width());
                has_diagnostic |= self.report(Diagnostic::simple(ErrorCode::E1006, span));
            }
        }
        if separator.requires_at_least_one && item_count == 0 {
            let span = self.current_token_span();
            has_diagnostic |= self.report(Diagnostic::list_is_empty(span, state.description()));
        }

        self.factory().separated_list(items, has_diagnostic)
    }

    fn is_list_terminated(&mut self, policy: ListPolicy<S>) -> bool {
        self.current_kind() == SyntaxKind::EndOfFileToken || (policy.is_terminator)(self)
    }

    /// Report the current token, then end the list if an active list can
    /// use the token, or skip it. Returns whether the list should end.
    fn abort_parsing_list_or_move_to_next_token(&mut self, state: ListParsingState) -> bool {
        self.report_unexpected_token(state);

        let active = self.list_states();
        for outer in active.iter() {
            let policy = Self::policy(outer);
            if (policy.is_terminator)(self) || (policy.is_item)(self, true) {
                debug!(list = ?state, by = ?outer, pos = self.position(), "list aborted");
                return true;
            }
        }

        self.skip_token();
        false
    }

    #[cold]
    fn report_unexpected_token(&mut self, state: ListParsingState) {
        let span = self.current_token_span();
        self.report(Diagnostic::unexpected_token(span, state.description()));
    }

    // --- Terminators shared by several lists ---

    fn is_end_of_file(&mut self) -> bool {
        self.current_kind() == SyntaxKind::EndOfFileToken
    }

    fn is_close_brace(&mut self) -> bool {
        self.current_kind() == SyntaxKind::CloseBraceToken
    }

    fn is_close_bracket(&mut self) -> bool {
        self.current_kind() == SyntaxKind::CloseBracketToken
    }
}
