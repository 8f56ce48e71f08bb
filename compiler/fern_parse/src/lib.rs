//! Incremental, error-recovering parser for Fern.
//!
//! [`parse`] turns source text into a lossless [`SyntaxTree`]: malformed
//! input never fails, it becomes missing tokens, skipped-text trivia and
//! diagnostics. [`parse_incremental`] re-parses an edited text against the
//! tree of the previous version, reusing every token and subtree the edit
//! cannot have affected.
//!
//! ```text
//! let tree = fern_parse::parse("var x = 1;", ParseOptions::default());
//! let edited = "var x = 42;";
//! let change = TextChange::replace(8, 1, 2);
//! let tree = fern_parse::parse_incremental(&tree, edited, &[change])?;
//! ```
//!
//! The pieces, bottom up: a sliding [`window`] over scanned tokens, the
//! [`ParserSource`] trait with fresh and incremental implementations, the
//! parser engine with its list-policy table, the grammar, and the
//! reconciler that turns skipped tokens into trivia.

mod grammar;
mod list;
mod options;
mod parser;
mod reconcile;
mod source;
mod tree;
pub mod window;

pub use options::ParseOptions;
pub use source::{
    FreshSource, IncrementalError, IncrementalSource, ParserSource, RewindPoint, SourceStats,
};
pub use tree::{ParseStats, SyntaxTree};

pub use fern_syntax::TextChange;
use tracing::debug;

use crate::parser::Parser;

/// Parse `text` from scratch.
///
/// # Panics
///
/// If `text` is longer than `u32::MAX` bytes.
pub fn parse(text: &str, options: ParseOptions) -> SyntaxTree {
    assert!(
        u32::try_from(text.len()).is_ok(),
        "source text of {} bytes exceeds the u32::MAX limit",
        text.len()
    );
    let output = Parser::new(FreshSource::new(text), options).parse();
    SyntaxTree::from_output(output, options)
}

/// Parse `new_text`, the text of `old` with `changes` applied in order,
/// reusing what the changes leave intact.
///
/// The result is equivalent to `parse(new_text, old.options())`.
pub fn parse_incremental(
    old: &SyntaxTree,
    new_text: &str,
    changes: &[TextChange],
) -> Result<SyntaxTree, IncrementalError> {
    let source = IncrementalSource::new(old.root(), new_text, changes)?;
    let output = Parser::new(source, old.options()).parse();
    let tree = SyntaxTree::from_output(output, old.options());
    let stats = tree.stats();
    debug!(
        nodes_reused = stats.nodes_reused,
        tokens_reused = stats.tokens_reused,
        tokens_scanned = stats.tokens_scanned,
        "incremental parse"
    );
    Ok(tree)
}
