//! Diagnostics produced while scanning and parsing.
//!
//! A diagnostic is a position, a width, an [`ErrorCode`] whose message
//! template is fixed, and the arguments that fill the template. The message
//! is rendered on demand so that diagnostics stay cheap to compare and to
//! discard during speculative parsing.

mod bag;
mod diagnostic;
mod error_code;

pub use bag::DiagnosticBag;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
