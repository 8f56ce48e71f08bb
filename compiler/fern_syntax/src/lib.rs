//! Lossless concrete syntax tree for Fern.
//!
//! Every byte of the source text lives in exactly one token: either in the
//! token's own text or in one of its leading / trailing trivia pieces.
//! Tokens and nodes are immutable and shared through `Arc`, so an incremental
//! re-parse can splice untouched subtrees of an old tree into a new one
//! without copying them.
//!
//! Tokens and nodes do not store absolute positions. Positions are derived by
//! summing full widths while walking from the root, which is what allows a
//! subtree to be reused at a different offset after an edit.

mod factory;
mod kind;
mod node;
mod span;
mod text_change;
mod token;
mod trivia;

pub use factory::{slot_node, slot_token, NodeFactory};
pub use kind::SyntaxKind;
pub use node::{NodeFlags, SyntaxElement, SyntaxNode, TokenIter};
pub use span::{Span, SpanError};
pub use text_change::{TextChange, TextChangeError};
pub use token::{SyntaxToken, TokenFlags};
pub use trivia::{Trivia, TriviaKind, TriviaList};
