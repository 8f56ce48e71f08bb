//! Byte-level scanner for Fern source text.
//!
//! Produces `(RawTag, len)` pairs over a sentinel-terminated buffer. Keyword
//! resolution, trivia attachment and diagnostics belong to `fern_lexer`;
//! this crate only decides where one lexeme ends and the next begins.
//!
//! The one piece of context the scanner needs is a [`LexMode`]: whether a
//! `/` may start a regular expression, and whether `>` may merge with the
//! characters that follow it. The parser decides; the scanner obeys.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{LexMode, RawScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};
