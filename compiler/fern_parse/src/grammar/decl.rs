//! Declarations and class elements.

use fern_stack::ensure_sufficient_stack;
use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode};

use crate::list::ListParsingState;
use crate::parser::Parser;
use crate::source::ParserSource;

impl<S: ParserSource> Parser<S> {
    // --- Detection, with `modifiers` tokens of lookahead already counted ---

    pub(super) fn is_class_declaration(&mut self, modifiers: usize) -> bool {
        self.peek_kind(modifiers) == SyntaxKind::ClassKeyword
    }

    pub(super) fn is_interface_declaration(&mut self, modifiers: usize) -> bool {
        self.peek_kind(modifiers) == SyntaxKind::InterfaceKeyword && self.is_identifier_at(modifiers + 1)
    }

    pub(super) fn is_enum_declaration(&mut self, modifiers: usize) -> bool {
        self.peek_kind(modifiers) == SyntaxKind::EnumKeyword && self.is_identifier_at(modifiers + 1)
    }

    pub(super) fn is_module_declaration(&mut self, modifiers: usize) -> bool {
        if self.peek_token(modifiers).keyword_kind() != Some(SyntaxKind::ModuleKeyword) {
            return false;
        }
        self.is_identifier_at(modifiers + 1)
            || self.peek_kind(modifiers + 1) == SyntaxKind::StringLiteral
    }

    pub(super) fn is_function_declaration(&mut self, modifiers: usize) -> bool {
        self.peek_kind(modifiers) == SyntaxKind::FunctionKeyword
    }

    fn is_identifier_at(&mut self, index: usize) -> bool {
        let token = self.peek_token(index);
        self.is_identifier(&token)
    }

    // --- Declarations ---

    pub(super) fn parse_class_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let class_keyword = self.eat_token(SyntaxKind::ClassKeyword);
        let identifier = self.eat_identifier_token();
        let type_parameters = self.parse_optional_type_parameter_list(false);
        let heritage_clauses = self.parse_heritage_clauses();
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let elements = if open_brace.is_missing() {
            self.factory().list(Vec::new(), false)
        } else {
            self.parse_list(ListParsingState::ClassDeclarationClassElements, None)
        };
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::ClassDeclaration,
            [
                slot_node(modifiers),
                slot_token(class_keyword),
                slot_token(identifier),
                type_parameters.map(Into::into),
                slot_node(heritage_clauses),
                slot_token(open_brace),
                slot_node(elements),
                slot_token(close_brace),
            ],
        )
    }

    pub(super) fn parse_interface_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let interface_keyword = self.eat_token(SyntaxKind::InterfaceKeyword);
        let identifier = self.eat_identifier_token();
        let type_parameters = self.parse_optional_type_parameter_list(false);
        let heritage_clauses = self.parse_heritage_clauses();
        let body = self.parse_object_type();
        self.factory().node(
            SyntaxKind::InterfaceDeclaration,
            [
                slot_node(modifiers),
                slot_token(interface_keyword),
                slot_token(identifier),
                type_parameters.map(Into::into),
                slot_node(heritage_clauses),
                slot_node(body),
            ],
        )
    }

    fn parse_heritage_clauses(&mut self) -> SyntaxNode {
        if self.is_heritage_clause(false) {
            self.parse_list(ListParsingState::ClassOrInterfaceDeclarationHeritageClauses, None)
        } else {
            self.factory().list(Vec::new(), false)
        }
    }

    pub(super) fn parse_enum_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let enum_keyword = self.eat_token(SyntaxKind::EnumKeyword);
        let identifier = self.eat_identifier_token();
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let elements = if open_brace.is_missing() {
            self.factory().separated_list(Vec::new(), false)
        } else {
            self.parse_separated_list(ListParsingState::EnumDeclarationEnumElements)
        };
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::EnumDeclaration,
            [
                slot_node(modifiers),
                slot_token(enum_keyword),
                slot_token(identifier),
                slot_token(open_brace),
                slot_node(elements),
                slot_token(close_brace),
            ],
        )
    }

    /// `module a.b.c { ... }` or `module "name" { ... }`.
    pub(super) fn parse_module_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let module_keyword = self.eat_contextual_keyword(SyntaxKind::ModuleKeyword);
        let name = if self.current_kind() == SyntaxKind::StringLiteral {
            self.eat_any_token().into()
        } else {
            self.parse_qualified_name()
        };
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let elements = if open_brace.is_missing() {
            self.factory().list(Vec::new(), false)
        } else {
            ensure_sufficient_stack(|| {
                self.parse_list(ListParsingState::ModuleDeclarationModuleElements, None)
            })
        };
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::ModuleDeclaration,
            [
                slot_node(modifiers),
                slot_token(module_keyword),
                Some(name),
                slot_token(open_brace),
                slot_node(elements),
                slot_token(close_brace),
            ],
        )
    }

    pub(super) fn parse_function_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let function_keyword = self.eat_token(SyntaxKind::FunctionKeyword);
        let identifier = self.eat_identifier_token();
        let signature = self.parse_call_signature();
        let body = self.parse_function_body_or_semicolon();
        self.factory().node(
            SyntaxKind::FunctionDeclaration,
            [
                slot_node(modifiers),
                slot_token(function_keyword),
                slot_token(identifier),
                slot_node(signature),
                Some(body),
            ],
        )
    }

    // --- Heritage clauses ---

    pub(crate) fn is_heritage_clause(&mut self, _in_error_recovery: bool) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        )
    }

    pub(crate) fn is_heritage_clauses_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken
        )
    }

    pub(crate) fn parse_heritage_clause(&mut self) -> SyntaxElement {
        let keyword = self.eat_any_token();
        let types = self.parse_separated_list(ListParsingState::HeritageClauseTypeNameList);
        self.factory()
            .node(SyntaxKind::HeritageClause, [slot_token(keyword), slot_node(types)])
            .into()
    }

    pub(crate) fn is_heritage_type_name(&mut self, _in_error_recovery: bool) -> bool {
        self.current_is_identifier()
    }

    /// The class or interface body, or the next heritage clause.
    pub(crate) fn is_heritage_type_names_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::ExtendsKeyword
                | SyntaxKind::ImplementsKeyword
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::CloseBraceToken
        )
    }

    pub(crate) fn parse_heritage_type_name(&mut self) -> SyntaxElement {
        self.parse_name_or_generic_type()
    }

    // --- Class elements ---

    pub(crate) fn is_class_element(&mut self, in_error_recovery: bool) -> bool {
        if self.current_node_is(SyntaxKind::is_class_element) {
            return true;
        }
        let modifiers = self.modifier_count();
        self.is_constructor_declaration(modifiers)
            || self.is_member_accessor(modifiers, in_error_recovery)
            || self.is_member_function(modifiers, in_error_recovery)
            || self.is_member_variable(modifiers, in_error_recovery)
    }

    fn is_constructor_declaration(&mut self, modifiers: usize) -> bool {
        self.peek_token(modifiers).keyword_kind() == Some(SyntaxKind::ConstructorKeyword)
    }

    /// `get name(` or `set name(`, also used by object literals.
    pub(super) fn is_member_accessor(&mut self, modifiers: usize, in_error_recovery: bool) -> bool {
        let keyword = self.peek_token(modifiers).keyword_kind();
        if !matches!(keyword, Some(SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)) {
            return false;
        }
        let name = self.peek_token(modifiers + 1);
        self.is_property_name(&name, in_error_recovery)
    }

    fn is_member_function(&mut self, modifiers: usize, in_error_recovery: bool) -> bool {
        let name = self.peek_token(modifiers);
        self.is_property_name(&name, in_error_recovery) && self.is_call_signature_at(modifiers + 1)
    }

    fn is_member_variable(&mut self, modifiers: usize, in_error_recovery: bool) -> bool {
        let name = self.peek_token(modifiers);
        self.is_property_name(&name, in_error_recovery)
    }

    pub(crate) fn parse_class_element(&mut self) -> SyntaxElement {
        if let Some(node) = self.try_reuse_node(SyntaxKind::is_class_element) {
            return node;
        }
        let modifiers = self.modifier_count();
        let node = if self.is_constructor_declaration(modifiers) {
            self.parse_constructor_declaration()
        } else if self.is_member_accessor(modifiers, false) {
            let modifiers = self.parse_modifiers();
            self.parse_accessor(modifiers)
        } else if self.is_member_function(modifiers, false) {
            self.parse_member_function_declaration()
        } else {
            self.parse_member_variable_declaration()
        };
        node.into()
    }

    fn parse_constructor_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let constructor_keyword = self.eat_contextual_keyword(SyntaxKind::ConstructorKeyword);
        let signature = self.parse_call_signature();
        let body = self.parse_function_body_or_semicolon();
        self.factory().node(
            SyntaxKind::ConstructorDeclaration,
            [
                slot_node(modifiers),
                slot_token(constructor_keyword),
                slot_node(signature),
                Some(body),
            ],
        )
    }

    fn parse_member_function_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let name = self.eat_property_name();
        let signature = self.parse_call_signature();
        let body = self.parse_function_body_or_semicolon();
        self.factory().node(
            SyntaxKind::MemberFunctionDeclaration,
            [
                slot_node(modifiers),
                slot_token(name),
                slot_node(signature),
                Some(body),
            ],
        )
    }

    fn parse_member_variable_declaration(&mut self) -> SyntaxNode {
        let modifiers = self.parse_modifiers();
        let declarator = self.parse_variable_declarator(true, true);
        let semicolon = self.eat_explicit_or_automatic_semicolon(false);
        self.factory().node(
            SyntaxKind::MemberVariableDeclaration,
            [
                slot_node(modifiers),
                slot_node(declarator),
                slot_token(semicolon),
            ],
        )
    }

    /// `get name() { }` / `set name(v) { }` after its modifiers.
    pub(super) fn parse_accessor(&mut self, modifiers: SyntaxNode) -> SyntaxNode {
        let keyword = self.eat_any_token();
        let kind = if keyword.keyword_kind() == Some(SyntaxKind::GetKeyword) {
            SyntaxKind::GetAccessor
        } else {
            SyntaxKind::SetAccessor
        };
        let name = self.eat_property_name();
        let signature = self.parse_call_signature();
        let body = self.parse_block(true);
        self.factory().node(
            kind,
            [
                slot_node(modifiers),
                slot_token(keyword),
                slot_token(name),
                slot_node(signature),
                slot_node(body),
            ],
        )
    }

    // --- Enum elements ---

    pub(crate) fn is_enum_element(&mut self, in_error_recovery: bool) -> bool {
        let token = self.current_token();
        self.is_property_name(&token, in_error_recovery)
    }

    pub(crate) fn parse_enum_element(&mut self) -> SyntaxElement {
        let name = self.eat_property_name();
        let value = (self.current_kind() == SyntaxKind::EqualsToken)
            .then(|| self.parse_equals_value_clause(true));
        self.factory()
            .node(SyntaxKind::EnumElement, [slot_token(name), value.map(Into::into)])
            .into()
    }
}
