//! Grammar productions, as further `impl` blocks on [`Parser`].
//!
//! - `decl`: declarations (class, interface, enum, module, function) and
//!   class elements
//! - `stmt`: statements
//! - `expr`: expressions, including arrow-function speculation
//! - `ty`: types, signatures, parameters and type members
//!
//! Every production returns a node (or, for expressions, possibly a bare
//! token) and never fails: absent tokens become missing tokens with a
//! diagnostic.

mod decl;
mod expr;
mod stmt;
mod ty;

use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use crate::list::ListParsingState;
use crate::parser::Parser;
use crate::source::ParserSource;

impl<S: ParserSource> Parser<S> {
    pub(crate) fn parse_source_unit(&mut self) -> SyntaxNode {
        let saved_strict = self.is_strict();
        let elements = self.parse_list(
            ListParsingState::SourceUnitModuleElements,
            Some(Self::update_strict_mode_state),
        );
        self.set_strict(saved_strict);
        let end_of_file = self.eat_token(SyntaxKind::EndOfFileToken);
        self.factory().node(
            SyntaxKind::SourceUnit,
            [slot_node(elements), slot_token(end_of_file)],
        )
    }

    /// Enter strict mode once the items parsed so far form a directive
    /// prologue whose last directive is `"use strict"`.
    fn update_strict_mode_state(&mut self, items: &[SyntaxElement]) {
        if self.is_strict() || !items.iter().all(is_directive) {
            return;
        }
        if items.last().is_some_and(is_use_strict_directive) {
            self.set_strict(true);
        }
    }

    pub(crate) fn is_module_element(&mut self, in_error_recovery: bool) -> bool {
        if self.current_node_is(SyntaxKind::is_module_element) {
            return true;
        }
        let modifiers = self.modifier_count();
        self.is_interface_declaration(modifiers)
            || self.is_class_declaration(modifiers)
            || self.is_enum_declaration(modifiers)
            || self.is_module_declaration(modifiers)
            || self.is_statement(in_error_recovery)
    }

    pub(crate) fn parse_module_element(&mut self) -> SyntaxElement {
        if let Some(node) = self.try_reuse_node(SyntaxKind::is_module_element) {
            return node;
        }
        let modifiers = self.modifier_count();
        let node = if self.is_interface_declaration(modifiers) {
            self.parse_interface_declaration()
        } else if self.is_class_declaration(modifiers) {
            self.parse_class_declaration()
        } else if self.is_enum_declaration(modifiers) {
            self.parse_enum_declaration()
        } else if self.is_module_declaration(modifiers) {
            self.parse_module_declaration()
        } else {
            self.parse_statement_node()
        };
        node.into()
    }

    // --- Modifiers ---

    /// Number of modifier tokens starting at the current token.
    ///
    /// A modifier word only counts when something that can be declared
    /// follows it, so `declare = 1` and `public()` stay expressions.
    pub(crate) fn modifier_count(&mut self) -> usize {
        let mut count = 0;
        while self.is_modifier_at(count) {
            count += 1;
        }
        count
    }

    fn is_modifier_at(&mut self, index: usize) -> bool {
        if !is_modifier(&self.peek_token(index)) {
            return false;
        }
        let next = self.peek_token(index + 1);
        is_modifier(&next) || is_property_name_token(&next)
    }

    pub(crate) fn parse_modifiers(&mut self) -> SyntaxNode {
        let count = self.modifier_count();
        let tokens = (0..count).map(|_| self.eat_any_token()).collect();
        self.factory().modifiers(tokens)
    }

    // --- Property names ---

    /// Identifier names (keywords included), string and numeric literals.
    /// While recovering only real identifiers count, so a stray keyword
    /// does not start a property.
    pub(crate) fn is_property_name(&self, token: &SyntaxToken, in_error_recovery: bool) -> bool {
        if token.is_identifier_name_or_any_keyword() {
            return !in_error_recovery || self.is_identifier(token);
        }
        matches!(
            token.kind(),
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
        )
    }

    pub(crate) fn eat_property_name(&mut self) -> SyntaxToken {
        let token = self.current_token();
        if is_property_name_token(&token) {
            return self.eat_any_token();
        }
        self.eat_identifier_name_token()
    }

    // --- Blocks ---

    /// `{ statements }`. Function bodies may start with a `"use strict"`
    /// prologue; the mode it sets ends with the block.
    pub(crate) fn parse_block(&mut self, is_function_body: bool) -> SyntaxNode {
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let statements = if open_brace.is_missing() {
            self.factory().list(Vec::new(), false)
        } else {
            let saved_strict = self.is_strict();
            let statements = if is_function_body {
                self.parse_list(
                    ListParsingState::BlockStatements,
                    Some(Self::update_strict_mode_state),
                )
            } else {
                self.parse_list(ListParsingState::BlockStatements, None)
            };
            self.set_strict(saved_strict);
            statements
        };
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::Block,
            [
                slot_token(open_brace),
                slot_node(statements),
                slot_token(close_brace),
            ],
        )
    }

    /// A function body, or `;` for a body-less overload or ambient
    /// declaration.
    pub(crate) fn parse_function_body_or_semicolon(&mut self) -> SyntaxElement {
        if self.current_kind() == SyntaxKind::OpenBraceToken {
            return self.parse_block(true).into();
        }
        self.eat_explicit_or_automatic_semicolon(false).into()
    }
}

fn is_modifier(token: &SyntaxToken) -> bool {
    matches!(
        token.kind(),
        SyntaxKind::ExportKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::StaticKeyword
    ) || token.keyword_kind() == Some(SyntaxKind::DeclareKeyword)
}

fn is_property_name_token(token: &SyntaxToken) -> bool {
    token.is_identifier_name_or_any_keyword()
        || matches!(
            token.kind(),
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
        )
}

/// An expression statement consisting of a single string literal.
fn directive_text(item: &SyntaxElement) -> Option<&str> {
    let statement = item.as_node()?;
    if statement.kind() != SyntaxKind::ExpressionStatement {
        return None;
    }
    let literal = statement.child_token(0)?;
    (literal.kind() == SyntaxKind::StringLiteral).then(|| literal.text())
}

fn is_directive(item: &SyntaxElement) -> bool {
    directive_text(item).is_some()
}

fn is_use_strict_directive(item: &SyntaxElement) -> bool {
    matches!(directive_text(item), Some("\"use strict\"" | "'use strict'"))
}

#[cfg(test)]
mod tests;
