//! List parsing states.
//!
//! Every repeated construct in the grammar is parsed by one of two generic
//! loops (unseparated and separated) driven by a [`ListParsingState`]. The
//! state supplies the data half of the list policy here (separator rules,
//! the description used in "unexpected token" errors); the parser supplies
//! the behavior half (item start, terminator, item parser) in its policy
//! table.
//!
//! The set of lists currently being parsed is a [`ListStates`] bitset.
//! Error recovery consults it: a token that some enclosing list could
//! consume ends the inner list instead of being skipped.

use fern_syntax::SyntaxKind;

/// One kind of list in the grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub(crate) enum ListParsingState {
    SourceUnitModuleElements,
    ClassDeclarationClassElements,
    ModuleDeclarationModuleElements,
    SwitchStatementSwitchClauses,
    SwitchClauseStatements,
    BlockStatements,
    EnumDeclarationEnumElements,
    ObjectTypeTypeMembers,
    ClassOrInterfaceDeclarationHeritageClauses,
    HeritageClauseTypeNameList,
    VariableDeclarationVariableDeclaratorsAllowIn,
    VariableDeclarationVariableDeclaratorsDisallowIn,
    ArgumentListAssignmentExpressions,
    ObjectLiteralExpressionPropertyAssignments,
    ArrayLiteralExpressionAssignmentExpressions,
    ParameterListParameters,
    TypeArgumentListTypes,
    TypeParameterListTypeParameters,
}

/// How a separated list treats its separators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SeparatorPolicy {
    pub kind: SyntaxKind,
    /// `a, b,` is accepted without a diagnostic.
    pub allows_trailing: bool,
    /// An empty list is reported.
    pub requires_at_least_one: bool,
}

impl SeparatorPolicy {
    const fn comma(allows_trailing: bool, requires_at_least_one: bool) -> Self {
        SeparatorPolicy {
            kind: SyntaxKind::CommaToken,
            allows_trailing,
            requires_at_least_one,
        }
    }

    /// A separator that automatic semicolon insertion may supply.
    #[inline]
    pub fn allows_automatic_semicolon(self) -> bool {
        self.kind == SyntaxKind::SemicolonToken
    }
}

impl ListParsingState {
    pub(crate) const COUNT: usize = 18;

    /// In declaration order; the index of a state is its discriminant.
    pub(crate) const ALL: [ListParsingState; Self::COUNT] = [
        ListParsingState::SourceUnitModuleElements,
        ListParsingState::ClassDeclarationClassElements,
        ListParsingState::ModuleDeclarationModuleElements,
        ListParsingState::SwitchStatementSwitchClauses,
        ListParsingState::SwitchClauseStatements,
        ListParsingState::BlockStatements,
        ListParsingState::EnumDeclarationEnumElements,
        ListParsingState::ObjectTypeTypeMembers,
        ListParsingState::ClassOrInterfaceDeclarationHeritageClauses,
        ListParsingState::HeritageClauseTypeNameList,
        ListParsingState::VariableDeclarationVariableDeclaratorsAllowIn,
        ListParsingState::VariableDeclarationVariableDeclaratorsDisallowIn,
        ListParsingState::ArgumentListAssignmentExpressions,
        ListParsingState::ObjectLiteralExpressionPropertyAssignments,
        ListParsingState::ArrayLiteralExpressionAssignmentExpressions,
        ListParsingState::ParameterListParameters,
        ListParsingState::TypeArgumentListTypes,
        ListParsingState::TypeParameterListTypeParameters,
    ];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// What the list expected, for "Unexpected token; '{0}' expected."
    pub(crate) fn description(self) -> &'static str {
        use ListParsingState as L;
        match self {
            L::SourceUnitModuleElements | L::ModuleDeclarationModuleElements => {
                "module, class, interface, enum or statement"
            }
            L::ClassDeclarationClassElements => "constructor, function, accessor or variable",
            L::SwitchStatementSwitchClauses => "case or default clause",
            L::SwitchClauseStatements | L::BlockStatements => "statement",
            L::EnumDeclarationEnumElements
            | L::VariableDeclarationVariableDeclaratorsAllowIn
            | L::VariableDeclarationVariableDeclaratorsDisallowIn => "identifier",
            L::ObjectTypeTypeMembers => "call, construct, index, property or function signature",
            L::ClassOrInterfaceDeclarationHeritageClauses => "{",
            L::HeritageClauseTypeNameList => "type name",
            L::ArgumentListAssignmentExpressions
            | L::ArrayLiteralExpressionAssignmentExpressions => "expression",
            L::ObjectLiteralExpressionPropertyAssignments => "property or accessor",
            L::ParameterListParameters => "parameter",
            L::TypeArgumentListTypes => "type",
            L::TypeParameterListTypeParameters => "type parameter",
        }
    }

    /// Separator rules, or `None` for unseparated lists.
    pub(crate) fn separator(self) -> Option<SeparatorPolicy> {
        use ListParsingState as L;
        let policy = match self {
            L::SourceUnitModuleElements
            | L::ClassDeclarationClassElements
            | L::ModuleDeclarationModuleElements
            | L::SwitchStatementSwitchClauses
            | L::SwitchClauseStatements
            | L::BlockStatements
            | L::ClassOrInterfaceDeclarationHeritageClauses => return None,
            L::ObjectTypeTypeMembers => SeparatorPolicy {
                kind: SyntaxKind::SemicolonToken,
                allows_trailing: true,
                requires_at_least_one: false,
            },
            L::EnumDeclarationEnumElements
            | L::ObjectLiteralExpressionPropertyAssignments
            | L::ArrayLiteralExpressionAssignmentExpressions => SeparatorPolicy::comma(true, false),
            L::HeritageClauseTypeNameList
            | L::VariableDeclarationVariableDeclaratorsAllowIn
            | L::VariableDeclarationVariableDeclaratorsDisallowIn
            | L::TypeArgumentListTypes
            | L::TypeParameterListTypeParameters => SeparatorPolicy::comma(false, true),
            L::ArgumentListAssignmentExpressions | L::ParameterListParameters => {
                SeparatorPolicy::comma(false, false)
            }
        };
        Some(policy)
    }
}

/// The lists currently being parsed, one bit per [`ListParsingState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ListStates(u32);

const _: () = assert!(ListParsingState::COUNT <= u32::BITS as usize);

impl ListStates {
    pub(crate) const NONE: Self = Self(0);

    #[inline]
    pub(crate) const fn has(self, state: ListParsingState) -> bool {
        (self.0 & (1 << state as u32)) != 0
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with(self, state: ListParsingState) -> Self {
        Self(self.0 | (1 << state as u32))
    }

    /// Active states, outermost grammar level first.
    pub(crate) fn iter(self) -> impl Iterator<Item = ListParsingState> {
        ListParsingState::ALL
            .into_iter()
            .filter(move |state| self.has(*state))
    }
}
