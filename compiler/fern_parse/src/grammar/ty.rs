//! Types, call signatures, parameters and type members.

use fern_stack::ensure_sufficient_stack;
use fern_syntax::{slot_node, slot_token, SyntaxElement, SyntaxKind, SyntaxNode};

use crate::list::ListParsingState;
use crate::parser::Parser;
use crate::source::ParserSource;

impl<S: ParserSource> Parser<S> {
    // --- Types ---

    fn is_type(&mut self) -> bool {
        match self.current_kind() {
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                true
            }
            kind => kind.is_predefined_type() || self.current_is_identifier(),
        }
    }

    pub(super) fn parse_type(&mut self) -> SyntaxElement {
        ensure_sufficient_stack(|| {
            let mut ty = self.parse_non_array_type();
            while self.current_kind() == SyntaxKind::OpenBracketToken
                && self.peek_kind(1) == SyntaxKind::CloseBracketToken
            {
                let open_bracket = self.eat_any_token();
                let close_bracket = self.eat_any_token();
                ty = self
                    .factory()
                    .node(
                        SyntaxKind::ArrayType,
                        [Some(ty), slot_token(open_bracket), slot_token(close_bracket)],
                    )
                    .into();
            }
            ty
        })
    }

    fn parse_non_array_type(&mut self) -> SyntaxElement {
        match self.current_kind() {
            SyntaxKind::OpenBraceToken => self.parse_object_type().into(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.parse_function_type().into()
            }
            // `any`, `number`, `string` and `boolean` scan as identifiers
            // and parse as type names.
            kind if kind.is_predefined_type() => self.eat_any_token().into(),
            _ => self.parse_name_or_generic_type(),
        }
    }

    /// `a.b.c`, optionally followed by type arguments.
    pub(super) fn parse_name_or_generic_type(&mut self) -> SyntaxElement {
        let name = self.parse_qualified_name();
        if self.current_kind() != SyntaxKind::LessThanToken {
            return name;
        }
        let type_arguments = self.parse_type_argument_list();
        self.factory()
            .node(SyntaxKind::GenericType, [Some(name), slot_node(type_arguments)])
            .into()
    }

    /// An identifier, or a left-nested chain of [`SyntaxKind::QualifiedName`]s.
    pub(super) fn parse_qualified_name(&mut self) -> SyntaxElement {
        let mut name: SyntaxElement = self.eat_identifier_token().into();
        while self.current_kind() == SyntaxKind::DotToken {
            let dot = self.eat_any_token();
            let right = self.eat_identifier_name_token();
            name = self
                .factory()
                .node(
                    SyntaxKind::QualifiedName,
                    [Some(name), slot_token(dot), slot_token(right)],
                )
                .into();
        }
        name
    }

    /// `(a: T) => U`, with optional type parameters.
    fn parse_function_type(&mut self) -> SyntaxNode {
        let type_parameters = self.parse_optional_type_parameter_list(false);
        let parameters = self.parse_parameter_list();
        let arrow = self.eat_token(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_type();
        self.factory().node(
            SyntaxKind::FunctionType,
            [
                type_parameters.map(Into::into),
                slot_node(parameters),
                slot_token(arrow),
                Some(return_type),
            ],
        )
    }

    pub(super) fn parse_object_type(&mut self) -> SyntaxNode {
        let open_brace = self.eat_token(SyntaxKind::OpenBraceToken);
        let members = if open_brace.is_missing() {
            self.factory().separated_list(Vec::new(), false)
        } else {
            self.parse_separated_list(ListParsingState::ObjectTypeTypeMembers)
        };
        let close_brace = self.eat_token(SyntaxKind::CloseBraceToken);
        self.factory().node(
            SyntaxKind::ObjectType,
            [slot_token(open_brace), slot_node(members), slot_token(close_brace)],
        )
    }

    pub(super) fn parse_optional_type_annotation(&mut self) -> Option<SyntaxNode> {
        let colon = self.try_eat_token(SyntaxKind::ColonToken)?;
        let ty = self.parse_type();
        Some(
            self.factory()
                .node(SyntaxKind::TypeAnnotation, [slot_token(colon), Some(ty)]),
        )
    }

    // --- Type arguments and type parameters ---

    fn parse_type_argument_list(&mut self) -> SyntaxNode {
        let less_than = self.eat_token(SyntaxKind::LessThanToken);
        let types = self.parse_separated_list(ListParsingState::TypeArgumentListTypes);
        let greater_than = self.eat_token(SyntaxKind::GreaterThanToken);
        self.factory().node(
            SyntaxKind::TypeArgumentList,
            [slot_token(less_than), slot_node(types), slot_token(greater_than)],
        )
    }

    pub(crate) fn is_type_argument(&mut self, _in_error_recovery: bool) -> bool {
        self.is_type()
    }

    pub(crate) fn is_type_argument_list_terminator(&mut self) -> bool {
        self.current_kind() == SyntaxKind::GreaterThanToken
    }

    pub(crate) fn parse_type_argument(&mut self) -> SyntaxElement {
        self.parse_type()
    }

    /// `<T, U extends V>` if the current token is `<`.
    ///
    /// With `require_complete` the list is abandoned (and nothing is
    /// consumed) unless it ends in `>`.
    pub(super) fn parse_optional_type_parameter_list(
        &mut self,
        require_complete: bool,
    ) -> Option<SyntaxNode> {
        if self.current_kind() != SyntaxKind::LessThanToken {
            return None;
        }
        if require_complete {
            self.speculate(|parser| parser.parse_type_parameter_list(true))
        } else {
            self.parse_type_parameter_list(false)
        }
    }

    fn parse_type_parameter_list(&mut self, require_complete: bool) -> Option<SyntaxNode> {
        let less_than = self.eat_token(SyntaxKind::LessThanToken);
        let parameters = self.parse_separated_list(ListParsingState::TypeParameterListTypeParameters);
        if require_complete && self.current_kind() != SyntaxKind::GreaterThanToken {
            return None;
        }
        let greater_than = self.eat_token(SyntaxKind::GreaterThanToken);
        Some(self.factory().node(
            SyntaxKind::TypeParameterList,
            [slot_token(less_than), slot_node(parameters), slot_token(greater_than)],
        ))
    }

    pub(crate) fn is_type_parameter(&mut self, _in_error_recovery: bool) -> bool {
        self.current_is_identifier()
    }

    pub(crate) fn is_type_parameter_list_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::GreaterThanToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::ExtendsKeyword
                | SyntaxKind::ImplementsKeyword
        )
    }

    pub(crate) fn parse_type_parameter(&mut self) -> SyntaxElement {
        let identifier = self.eat_identifier_token();
        let constraint = (self.current_kind() == SyntaxKind::ExtendsKeyword).then(|| {
            let extends_keyword = self.eat_any_token();
            let ty = self.parse_type();
            self.factory()
                .node(SyntaxKind::Constraint, [slot_token(extends_keyword), Some(ty)])
        });
        self.factory()
            .node(
                SyntaxKind::TypeParameter,
                [slot_token(identifier), constraint.map(Into::into)],
            )
            .into()
    }

    // --- Call signatures and parameters ---

    /// Whether the token `index` ahead starts a call signature.
    pub(super) fn is_call_signature_at(&mut self, index: usize) -> bool {
        matches!(
            self.peek_kind(index),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        )
    }

    pub(super) fn parse_call_signature(&mut self) -> SyntaxNode {
        let type_parameters = self.parse_optional_type_parameter_list(false);
        self.finish_call_signature(type_parameters)
    }

    /// A call signature whose type parameter list, if any, is complete.
    pub(super) fn try_parse_complete_call_signature(&mut self) -> Option<SyntaxNode> {
        let type_parameters = if self.current_kind() == SyntaxKind::LessThanToken {
            Some(self.parse_optional_type_parameter_list(true)?)
        } else {
            None
        };
        Some(self.finish_call_signature(type_parameters))
    }

    fn finish_call_signature(&mut self, type_parameters: Option<SyntaxNode>) -> SyntaxNode {
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_optional_type_annotation();
        self.factory().node(
            SyntaxKind::CallSignature,
            [
                type_parameters.map(Into::into),
                slot_node(parameters),
                type_annotation.map(Into::into),
            ],
        )
    }

    fn parse_parameter_list(&mut self) -> SyntaxNode {
        let open_paren = self.eat_token(SyntaxKind::OpenParenToken);
        let parameters = if open_paren.is_missing() {
            self.factory().separated_list(Vec::new(), false)
        } else {
            self.parse_separated_list(ListParsingState::ParameterListParameters)
        };
        let close_paren = self.eat_token(SyntaxKind::CloseParenToken);
        self.factory().node(
            SyntaxKind::ParameterList,
            [slot_token(open_paren), slot_node(parameters), slot_token(close_paren)],
        )
    }

    pub(crate) fn is_parameter(&mut self, _in_error_recovery: bool) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::DotDotDotToken | SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword
        ) || self.current_is_identifier()
    }

    pub(crate) fn is_parameter_list_terminator(&mut self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::EqualsGreaterThanToken
        )
    }

    pub(crate) fn parse_parameter(&mut self) -> SyntaxElement {
        self.parse_parameter_node().into()
    }

    /// `...rest`, `public x?: T = value` and the like.
    fn parse_parameter_node(&mut self) -> SyntaxNode {
        let dot_dot_dot = self.try_eat_token(SyntaxKind::DotDotDotToken);
        let accessibility = if matches!(
            self.current_kind(),
            SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword
        ) && self.is_identifier_ahead(1)
        {
            Some(self.eat_any_token())
        } else {
            None
        };
        let identifier = self.eat_identifier_token();
        let question = self.try_eat_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_optional_type_annotation();
        let default_value = (self.current_kind() == SyntaxKind::EqualsToken)
            .then(|| self.parse_equals_value_clause(true));
        self.factory().node(
            SyntaxKind::Parameter,
            [
                dot_dot_dot.map(Into::into),
                accessibility.map(Into::into),
                slot_token(identifier),
                question.map(Into::into),
                type_annotation.map(Into::into),
                default_value.map(Into::into),
            ],
        )
    }

    fn is_identifier_ahead(&mut self, index: usize) -> bool {
        let token = self.peek_token(index);
        self.is_identifier(&token)
    }

    // --- Type members ---

    pub(crate) fn is_type_member(&mut self, in_error_recovery: bool) -> bool {
        if self.current_node_is(SyntaxKind::is_type_member) {
            return true;
        }
        self.is_call_signature_at(0)
            || self.is_construct_signature()
            || self.current_kind() == SyntaxKind::OpenBracketToken
            || self.is_method_signature(in_error_recovery)
            || self.is_property_signature(in_error_recovery)
    }

    fn is_construct_signature(&mut self) -> bool {
        self.current_kind() == SyntaxKind::NewKeyword && self.is_call_signature_at(1)
    }

    fn is_method_signature(&mut self, in_error_recovery: bool) -> bool {
        if !self.is_property_signature(in_error_recovery) {
            return false;
        }
        self.is_call_signature_at(1)
            || (self.peek_kind(1) == SyntaxKind::QuestionToken && self.is_call_signature_at(2))
    }

    fn is_property_signature(&mut self, in_error_recovery: bool) -> bool {
        let token = self.current_token();
        self.is_property_name(&token, in_error_recovery)
    }

    pub(crate) fn parse_type_member(&mut self) -> SyntaxElement {
        if let Some(node) = self.try_reuse_node(SyntaxKind::is_type_member) {
            return node;
        }
        let node = if self.is_call_signature_at(0) {
            self.parse_call_signature()
        } else if self.is_construct_signature() {
            let new_keyword = self.eat_any_token();
            let signature = self.parse_call_signature();
            self.factory().node(
                SyntaxKind::ConstructSignature,
                [slot_token(new_keyword), slot_node(signature)],
            )
        } else if self.current_kind() == SyntaxKind::OpenBracketToken {
            self.parse_index_signature()
        } else if self.is_method_signature(false) {
            let name = self.eat_property_name();
            let question = self.try_eat_token(SyntaxKind::QuestionToken);
            let signature = self.parse_call_signature();
            self.factory().node(
                SyntaxKind::MethodSignature,
                [slot_token(name), question.map(Into::into), slot_node(signature)],
            )
        } else {
            let name = self.eat_property_name();
            let question = self.try_eat_token(SyntaxKind::QuestionToken);
            let type_annotation = self.parse_optional_type_annotation();
            self.factory().node(
                SyntaxKind::PropertySignature,
                [
                    slot_token(name),
                    question.map(Into::into),
                    type_annotation.map(Into::into),
                ],
            )
        };
        node.into()
    }

    /// `[key: string]: T`.
    fn parse_index_signature(&mut self) -> SyntaxNode {
        let open_bracket = self.eat_token(SyntaxKind::OpenBracketToken);
        let parameter = self.parse_parameter_node();
        let close_bracket = self.eat_token(SyntaxKind::CloseBracketToken);
        let type_annotation = self.parse_optional_type_annotation();
        self.factory().node(
            SyntaxKind::IndexSignature,
            [
                slot_token(open_bracket),
                slot_node(parameter),
                slot_token(close_bracket),
                type_annotation.map(Into::into),
            ],
        )
    }
}
