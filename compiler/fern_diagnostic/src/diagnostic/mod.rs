//! A single positioned diagnostic.

use std::fmt;

use fern_syntax::{Span, SyntaxKind};

use crate::ErrorCode;

/// A diagnostic: where, which code, and the template arguments.
///
/// Equality compares the structured fields, not the rendered message.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    code: ErrorCode,
    span: Span,
    args: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, span: Span, args: Vec<String>) -> Self {
        debug_assert_eq!(code.arity(), args.len(), "{code} argument count");
        Diagnostic { code, span, args }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Start offset in the source text.
    #[inline]
    pub fn position(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.span.len()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The template with arguments substituted.
    pub fn message(&self) -> String {
        let mut message = self.code.template().to_owned();
        for (index, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }

    /// Diagnostic moved by `delta` bytes.
    #[must_use]
    pub fn shifted(&self, delta: i64) -> Self {
        let shift = |offset: u32| {
            u32::try_from((i64::from(offset) + delta).max(0)).unwrap_or(u32::MAX)
        };
        Diagnostic {
            code: self.code,
            span: Span::new(shift(self.span.start), shift(self.span.end)),
            args: self.args.clone(),
        }
    }
}

// Constructors for the common shapes.
impl Diagnostic {
    /// `'{kind}' expected.`
    #[cold]
    pub fn token_expected(span: Span, kind: SyntaxKind) -> Self {
        Diagnostic::new(ErrorCode::E1001, span, vec![kind.display_name().to_owned()])
    }

    #[cold]
    pub fn identifier_expected(span: Span) -> Self {
        Diagnostic::new(ErrorCode::E1002, span, Vec::new())
    }

    #[cold]
    pub fn identifier_is_keyword(span: Span, keyword: &str) -> Self {
        Diagnostic::new(ErrorCode::E1003, span, vec![keyword.to_owned()])
    }

    #[cold]
    pub fn unexpected_token(span: Span, expected: &str) -> Self {
        Diagnostic::new(ErrorCode::E1004, span, vec![expected.to_owned()])
    }

    /// A required list had no items. `list` names what the list holds.
    #[cold]
    pub fn list_is_empty(span: Span, list: &str) -> Self {
        Diagnostic::new(ErrorCode::E1007, span, vec![list.to_owned()])
    }

    #[cold]
    pub fn simple(code: ErrorCode, span: Span) -> Self {
        Diagnostic::new(code, span, Vec::new())
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}: {}", self.code, self.span, self.message())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}] at {}: {}", self.code, self.span.start, self.message())
    }
}
