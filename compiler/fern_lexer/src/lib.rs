//! Scanner for Fern: raw lexemes in, [`SyntaxToken`]s with trivia out.
//!
//! ```text
//! source → RawScanner → (RawTag, len) → cook → SyntaxToken + diagnostics
//! ```
//!
//! Every call to [`Scanner::scan`] produces exactly one token together with
//! the trivia around it, so the full text of a file is the concatenation of
//! the full text of its tokens. The parser owns the mode for each call and
//! can move the scanner anywhere with [`Scanner::set_absolute_index`].
//!
//! [`SyntaxToken`]: fern_syntax::SyntaxToken

mod cooker;
mod escape;
mod scanner;

pub use fern_lexer_core::LexMode;
pub use scanner::Scanner;
