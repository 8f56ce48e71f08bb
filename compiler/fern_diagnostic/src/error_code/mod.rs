//! Error codes for scan and grammar diagnostics.
//!
//! The first digit names the phase: E0xxx come from the scanner, E1xxx from
//! the parser.

use std::fmt;

/// Error codes for every diagnostic the front end can report.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub enum ErrorCode {
    // Scanner (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character
    E0002,
    /// Unterminated multi-line comment
    E0003,
    /// Invalid numeric literal
    E0004,
    /// Invalid escape sequence
    E0005,

    // Parser (E1xxx)
    /// Expected a specific token
    E1001,
    /// Expected an identifier
    E1002,
    /// Expected an identifier, found a reserved word
    E1003,
    /// Unexpected token during list recovery
    E1004,
    /// Automatic semicolon insertion disabled
    E1005,
    /// Trailing separator not allowed
    E1006,
    /// List requires at least one element
    E1007,
    /// Line break before `=>`
    E1008,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
        }
    }

    /// Message template; `{0}`, `{1}` are replaced by the diagnostic's
    /// arguments.
    pub fn template(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "Unterminated string literal.",
            ErrorCode::E0002 => "Invalid character.",
            ErrorCode::E0003 => "'*/' expected.",
            ErrorCode::E0004 => "Invalid numeric literal.",
            ErrorCode::E0005 => "Invalid escape sequence.",
            ErrorCode::E1001 => "'{0}' expected.",
            ErrorCode::E1002 => "Identifier expected.",
            ErrorCode::E1003 => "Identifier expected; '{0}' is a keyword.",
            ErrorCode::E1004 => "Unexpected token; '{0}' expected.",
            ErrorCode::E1005 => "Automatic semicolon insertion not allowed.",
            ErrorCode::E1006 => "Trailing separator not allowed.",
            ErrorCode::E1007 => "'{0}' list cannot be empty.",
            ErrorCode::E1008 => "Line terminator not permitted before arrow.",
        }
    }

    /// Number of `{n}` placeholders in the template.
    pub fn arity(self) -> usize {
        match self {
            ErrorCode::E1001 | ErrorCode::E1003 | ErrorCode::E1004 | ErrorCode::E1007 => 1,
            _ => 0,
        }
    }

    #[inline]
    pub fn is_scan_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    #[inline]
    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
