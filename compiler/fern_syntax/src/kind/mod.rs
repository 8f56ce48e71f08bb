//! Token and node kinds.
//!
//! A single flat enum covers tokens, keywords, punctuation and node kinds.
//! The variants are grouped in contiguous ranges so classification is a pair
//! of integer comparisons.

use std::fmt;

/// Kind of a token or node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SyntaxKind {
    // === Literal and special tokens ===
    EndOfFileToken,
    ErrorToken,
    IdentifierName,
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,

    // === Reserved words ===
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // === Reserved in strict mode only ===
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // === Contextual keywords (scanned as identifier names) ===
    AnyKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    ModuleKeyword,
    NumberKeyword,
    SetKeyword,
    StringKeyword,

    // === Punctuation ===
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    EqualsGreaterThanToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    SlashToken,
    SlashEqualsToken,

    // === Lists ===
    List,
    SeparatedList,

    // === Top level and declarations ===
    SourceUnit,
    ModuleDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    FunctionDeclaration,
    HeritageClause,
    EnumElement,
    QualifiedName,

    // === Class elements ===
    ConstructorDeclaration,
    MemberFunctionDeclaration,
    MemberVariableDeclaration,
    GetAccessor,
    SetAccessor,

    // === Statements ===
    Block,
    VariableStatement,
    EmptyStatement,
    ExpressionStatement,
    LabeledStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    TryStatement,
    SwitchStatement,
    DebuggerStatement,

    // === Statement parts ===
    VariableDeclaration,
    VariableDeclarator,
    EqualsValueClause,
    ElseClause,
    CatchClause,
    FinallyClause,
    CaseSwitchClause,
    DefaultSwitchClause,

    // === Expressions ===
    ParenthesizedExpression,
    BinaryExpression,
    ConditionalExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    CastExpression,
    MemberAccessExpression,
    ElementAccessExpression,
    InvocationExpression,
    ObjectCreationExpression,
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    FunctionExpression,
    /// The hole in `[a, , b]`. Has no children.
    OmittedExpression,
    SimpleArrowFunctionExpression,
    ParenthesizedArrowFunctionExpression,

    // === Expression parts ===
    ArgumentList,
    SimplePropertyAssignment,
    FunctionPropertyAssignment,

    // === Signatures and type members ===
    CallSignature,
    ParameterList,
    Parameter,
    TypeAnnotation,
    TypeParameterList,
    TypeParameter,
    Constraint,
    PropertySignature,
    MethodSignature,
    IndexSignature,
    ConstructSignature,

    // === Types ===
    TypeArgumentList,
    GenericType,
    ArrayType,
    ObjectType,
    FunctionType,
}

const _: () = assert!(std::mem::size_of::<SyntaxKind>() == 1);

impl SyntaxKind {
    const FIRST_KEYWORD: u8 = SyntaxKind::BreakKeyword as u8;
    const LAST_RESERVED: u8 = SyntaxKind::WithKeyword as u8;
    const FIRST_STRICT_RESERVED: u8 = SyntaxKind::ImplementsKeyword as u8;
    const LAST_STRICT_RESERVED: u8 = SyntaxKind::YieldKeyword as u8;
    const FIRST_CONTEXTUAL: u8 = SyntaxKind::AnyKeyword as u8;
    const LAST_KEYWORD: u8 = SyntaxKind::StringKeyword as u8;
    const FIRST_PUNCTUATION: u8 = SyntaxKind::OpenBraceToken as u8;
    const LAST_PUNCTUATION: u8 = SyntaxKind::SlashEqualsToken as u8;
    const FIRST_NODE: u8 = SyntaxKind::List as u8;

    #[inline]
    fn in_range(self, first: u8, last: u8) -> bool {
        let k = self as u8;
        k >= first && k <= last
    }

    /// Any token kind (including keywords and punctuation).
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u8) < Self::FIRST_NODE
    }

    #[inline]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    #[inline]
    pub fn is_list(self) -> bool {
        matches!(self, SyntaxKind::List | SyntaxKind::SeparatedList)
    }

    /// Reserved, strict-reserved, or contextual keyword.
    #[inline]
    pub fn is_any_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Words that can never be identifiers.
    #[inline]
    pub fn is_reserved_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_RESERVED)
    }

    /// Words that are identifiers except in strict mode.
    #[inline]
    pub fn is_strict_mode_reserved_keyword(self) -> bool {
        self.in_range(Self::FIRST_STRICT_RESERVED, Self::LAST_STRICT_RESERVED)
    }

    /// Words with special meaning only in specific grammar positions.
    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.in_range(Self::FIRST_CONTEXTUAL, Self::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// `/` and `/=`: may need to be re-lexed as a regular expression.
    #[inline]
    pub fn is_divide_or_regex_ambiguous(self) -> bool {
        matches!(
            self,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken | SyntaxKind::RegularExpressionLiteral
        )
    }

    /// `>` and every operator that starts with it.
    #[inline]
    pub fn is_any_greater_than(self) -> bool {
        matches!(
            self,
            SyntaxKind::GreaterThanToken
                | SyntaxKind::GreaterThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanToken
                | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
                | SyntaxKind::GreaterThanGreaterThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        )
    }

    /// Literal tokens usable directly as expressions.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
        )
    }

    /// Assignment operators, including compound ones.
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
                | SyntaxKind::LessThanLessThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
                | SyntaxKind::AmpersandEqualsToken
                | SyntaxKind::BarEqualsToken
                | SyntaxKind::CaretEqualsToken
        )
    }

    /// Prefix unary operators (`typeof`, `void` and `delete` included).
    pub fn is_prefix_unary_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
        )
    }

    /// Predefined type names usable in type position.
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// Binding precedence of a binary operator (higher binds tighter).
    ///
    /// Returns `None` for tokens that are not binary operators. Comma and
    /// assignment are handled by their own productions and are included so
    /// callers can compare against them.
    pub fn binary_precedence(self) -> Option<u8> {
        use SyntaxKind::{
            AmpersandAmpersandToken, AmpersandToken, AsteriskToken, BarBarToken, BarToken,
            CaretToken, CommaToken, EqualsEqualsEqualsToken, EqualsEqualsToken,
            ExclamationEqualsEqualsToken, ExclamationEqualsToken,
            GreaterThanEqualsToken, GreaterThanGreaterThanGreaterThanToken,
            GreaterThanGreaterThanToken, GreaterThanToken, InKeyword, InstanceOfKeyword,
            LessThanEqualsToken, LessThanLessThanToken, LessThanToken, MinusToken,
            PercentToken, PlusToken, SlashToken,
        };
        let precedence = match self {
            CommaToken => 1,
            k if k.is_assignment_operator() => 2,
            BarBarToken => 4,
            AmpersandAmpersandToken => 5,
            BarToken => 6,
            CaretToken => 7,
            AmpersandToken => 8,
            EqualsEqualsToken
            | ExclamationEqualsToken
            | EqualsEqualsEqualsToken
            | ExclamationEqualsEqualsToken => 9,
            LessThanToken
            | GreaterThanToken
            | LessThanEqualsToken
            | GreaterThanEqualsToken
            | InstanceOfKeyword
            | InKeyword => 10,
            LessThanLessThanToken
            | GreaterThanGreaterThanToken
            | GreaterThanGreaterThanGreaterThanToken => 11,
            PlusToken | MinusToken => 12,
            AsteriskToken | SlashToken | PercentToken => 13,
            _ => return None,
        };
        Some(precedence)
    }

    /// Node kinds that can appear as a statement.
    pub fn is_statement(self) -> bool {
        let k = self as u8;
        (k >= SyntaxKind::Block as u8 && k <= SyntaxKind::DebuggerStatement as u8)
            || self == SyntaxKind::FunctionDeclaration
    }

    /// Node kinds that can appear at the top level of a source unit or module.
    pub fn is_module_element(self) -> bool {
        self.is_statement()
            || matches!(
                self,
                SyntaxKind::ModuleDeclaration
                    | SyntaxKind::ClassDeclaration
                    | SyntaxKind::InterfaceDeclaration
                    | SyntaxKind::EnumDeclaration
            )
    }

    pub fn is_class_element(self) -> bool {
        self.in_range(
            SyntaxKind::ConstructorDeclaration as u8,
            SyntaxKind::SetAccessor as u8,
        )
    }

    pub fn is_type_member(self) -> bool {
        matches!(
            self,
            SyntaxKind::PropertySignature
                | SyntaxKind::MethodSignature
                | SyntaxKind::CallSignature
                | SyntaxKind::IndexSignature
                | SyntaxKind::ConstructSignature
        )
    }

    pub fn is_switch_clause(self) -> bool {
        matches!(
            self,
            SyntaxKind::CaseSwitchClause | SyntaxKind::DefaultSwitchClause
        )
    }

    /// Node kinds produced by expression productions.
    pub fn is_expression_node(self) -> bool {
        self.in_range(
            SyntaxKind::ParenthesizedExpression as u8,
            SyntaxKind::ParenthesizedArrowFunctionExpression as u8,
        )
    }

    /// Node kinds produced by type productions.
    pub fn is_type_node(self) -> bool {
        matches!(
            self,
            SyntaxKind::QualifiedName
                | SyntaxKind::GenericType
                | SyntaxKind::ArrayType
                | SyntaxKind::ObjectType
                | SyntaxKind::FunctionType
        )
    }

    /// Source text of keywords and punctuation.
    pub fn text(self) -> Option<&'static str> {
        use SyntaxKind as K;
        let text = match self {
            K::BreakKeyword => "break",
            K::CaseKeyword => "case",
            K::CatchKeyword => "catch",
            K::ClassKeyword => "class",
            K::ConstKeyword => "const",
            K::ContinueKeyword => "continue",
            K::DebuggerKeyword => "debugger",
            K::DefaultKeyword => "default",
            K::DeleteKeyword => "delete",
            K::DoKeyword => "do",
            K::ElseKeyword => "else",
            K::EnumKeyword => "enum",
            K::ExportKeyword => "export",
            K::ExtendsKeyword => "extends",
            K::FalseKeyword => "false",
            K::FinallyKeyword => "finally",
            K::ForKeyword => "for",
            K::FunctionKeyword => "function",
            K::IfKeyword => "if",
            K::ImportKeyword => "import",
            K::InKeyword => "in",
            K::InstanceOfKeyword => "instanceof",
            K::NewKeyword => "new",
            K::NullKeyword => "null",
            K::ReturnKeyword => "return",
            K::SuperKeyword => "super",
            K::SwitchKeyword => "switch",
            K::ThisKeyword => "this",
            K::ThrowKeyword => "throw",
            K::TrueKeyword => "true",
            K::TryKeyword => "try",
            K::TypeOfKeyword => "typeof",
            K::VarKeyword => "var",
            K::VoidKeyword => "void",
            K::WhileKeyword => "while",
            K::WithKeyword => "with",
            K::ImplementsKeyword => "implements",
            K::InterfaceKeyword => "interface",
            K::LetKeyword => "let",
            K::PackageKeyword => "package",
            K::PrivateKeyword => "private",
            K::ProtectedKeyword => "protected",
            K::PublicKeyword => "public",
            K::StaticKeyword => "static",
            K::YieldKeyword => "yield",
            K::AnyKeyword => "any",
            K::BooleanKeyword => "boolean",
            K::ConstructorKeyword => "constructor",
            K::DeclareKeyword => "declare",
            K::GetKeyword => "get",
            K::ModuleKeyword => "module",
            K::NumberKeyword => "number",
            K::SetKeyword => "set",
            K::StringKeyword => "string",
            K::OpenBraceToken => "{",
            K::CloseBraceToken => "}",
            K::OpenParenToken => "(",
            K::CloseParenToken => ")",
            K::OpenBracketToken => "[",
            K::CloseBracketToken => "]",
            K::DotToken => ".",
            K::DotDotDotToken => "...",
            K::SemicolonToken => ";",
            K::CommaToken => ",",
            K::LessThanToken => "<",
            K::GreaterThanToken => ">",
            K::LessThanEqualsToken => "<=",
            K::GreaterThanEqualsToken => ">=",
            K::EqualsEqualsToken => "==",
            K::EqualsGreaterThanToken => "=>",
            K::ExclamationEqualsToken => "!=",
            K::EqualsEqualsEqualsToken => "===",
            K::ExclamationEqualsEqualsToken => "!==",
            K::PlusToken => "+",
            K::MinusToken => "-",
            K::AsteriskToken => "*",
            K::PercentToken => "%",
            K::PlusPlusToken => "++",
            K::MinusMinusToken => "--",
            K::LessThanLessThanToken => "<<",
            K::GreaterThanGreaterThanToken => ">>",
            K::GreaterThanGreaterThanGreaterThanToken => ">>>",
            K::AmpersandToken => "&",
            K::BarToken => "|",
            K::CaretToken => "^",
            K::ExclamationToken => "!",
            K::TildeToken => "~",
            K::AmpersandAmpersandToken => "&&",
            K::BarBarToken => "||",
            K::QuestionToken => "?",
            K::ColonToken => ":",
            K::EqualsToken => "=",
            K::PlusEqualsToken => "+=",
            K::MinusEqualsToken => "-=",
            K::AsteriskEqualsToken => "*=",
            K::PercentEqualsToken => "%=",
            K::LessThanLessThanEqualsToken => "<<=",
            K::GreaterThanGreaterThanEqualsToken => ">>=",
            K::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            K::AmpersandEqualsToken => "&=",
            K::BarEqualsToken => "|=",
            K::CaretEqualsToken => "^=",
            K::SlashToken => "/",
            K::SlashEqualsToken => "/=",
            _ => return None,
        };
        Some(text)
    }

    /// Keyword kind for an identifier-shaped word, if it is one.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind as K;
        // `do` is the shortest keyword, `constructor` the longest.
        if text.len() < 2 || text.len() > 11 {
            return None;
        }
        let kind = match text {
            "break" => K::BreakKeyword,
            "case" => K::CaseKeyword,
            "catch" => K::CatchKeyword,
            "class" => K::ClassKeyword,
            "const" => K::ConstKeyword,
            "continue" => K::ContinueKeyword,
            "debugger" => K::DebuggerKeyword,
            "default" => K::DefaultKeyword,
            "delete" => K::DeleteKeyword,
            "do" => K::DoKeyword,
            "else" => K::ElseKeyword,
            "enum" => K::EnumKeyword,
            "export" => K::ExportKeyword,
            "extends" => K::ExtendsKeyword,
            "false" => K::FalseKeyword,
            "finally" => K::FinallyKeyword,
            "for" => K::ForKeyword,
            "function" => K::FunctionKeyword,
            "if" => K::IfKeyword,
            "import" => K::ImportKeyword,
            "in" => K::InKeyword,
            "instanceof" => K::InstanceOfKeyword,
            "new" => K::NewKeyword,
            "null" => K::NullKeyword,
            "return" => K::ReturnKeyword,
            "super" => K::SuperKeyword,
            "switch" => K::SwitchKeyword,
            "this" => K::ThisKeyword,
            "throw" => K::ThrowKeyword,
            "true" => K::TrueKeyword,
            "try" => K::TryKeyword,
            "typeof" => K::TypeOfKeyword,
            "var" => K::VarKeyword,
            "void" => K::VoidKeyword,
            "while" => K::WhileKeyword,
            "with" => K::WithKeyword,
            "implements" => K::ImplementsKeyword,
            "interface" => K::InterfaceKeyword,
            "let" => K::LetKeyword,
            "package" => K::PackageKeyword,
            "private" => K::PrivateKeyword,
            "protected" => K::ProtectedKeyword,
            "public" => K::PublicKeyword,
            "static" => K::StaticKeyword,
            "yield" => K::YieldKeyword,
            "any" => K::AnyKeyword,
            "boolean" => K::BooleanKeyword,
            "constructor" => K::ConstructorKeyword,
            "declare" => K::DeclareKeyword,
            "get" => K::GetKeyword,
            "module" => K::ModuleKeyword,
            "number" => K::NumberKeyword,
            "set" => K::SetKeyword,
            "string" => K::StringKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable name used in diagnostics.
    pub fn display_name(self) -> &'static str {
        if let Some(text) = self.text() {
            return text;
        }
        match self {
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::ErrorToken => "invalid character",
            SyntaxKind::IdentifierName => "identifier",
            SyntaxKind::NumericLiteral => "numeric literal",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::RegularExpressionLiteral => "regular expression literal",
            _ => "syntax node",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
