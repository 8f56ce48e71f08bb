//! Attaching skipped tokens to the finished tree.
//!
//! Error recovery drops tokens from the grammar but the tree must still
//! reproduce the source text. Each skipped token becomes skipped-text
//! trivia (with its own trivia around it) at the end of its owner's
//! trailing trivia; tokens skipped before any tree token go in front of the
//! first token's leading trivia. Only the nodes on the path to a changed
//! token are rebuilt; every other subtree is shared with the input.

use fern_stack::ensure_sufficient_stack;
use fern_syntax::{SyntaxElement, SyntaxNode, SyntaxToken, TriviaList};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::parser::SkippedToken;

pub(crate) fn attach_skipped_tokens(root: SyntaxNode, skipped: &[SkippedToken]) -> SyntaxNode {
    if skipped.is_empty() {
        return root;
    }
    debug!(count = skipped.len(), "attaching skipped tokens");

    let mut trailing: FxHashMap<usize, TriviaList> = FxHashMap::default();
    let mut leading = TriviaList::new();
    for SkippedToken { token, owner } in skipped {
        match owner {
            Some(owner) => trailing
                .entry(owner.identity())
                .or_default()
                .extend(token.to_skipped_trivia()),
            None => leading.extend(token.to_skipped_trivia()),
        }
    }

    let mut attacher = Attacher {
        trailing,
        leading: (!leading.is_empty()).then_some(leading),
    };
    let root = attacher.rebuild(&root).unwrap_or(root);
    debug_assert!(attacher.is_done(), "skipped token owner missing from the tree");
    root
}

struct Attacher {
    /// Trivia to append, keyed by owner token identity.
    trailing: FxHashMap<usize, TriviaList>,
    /// Trivia for the front of the first token.
    leading: Option<TriviaList>,
}

impl Attacher {
    fn is_done(&self) -> bool {
        self.leading.is_none() && self.trailing.is_empty()
    }

    /// A copy of `node` with trivia attached, or `None` if nothing below it
    /// changed.
    fn rebuild(&mut self, node: &SyntaxNode) -> Option<SyntaxNode> {
        let mut slots: Option<Vec<Option<SyntaxElement>>> = None;
        for (index, slot) in node.slots().iter().enumerate() {
            if self.is_done() {
                break;
            }
            let replacement = match slot {
                None => None,
                Some(SyntaxElement::Token(token)) => self.attach(token).map(SyntaxElement::Token),
                Some(SyntaxElement::Node(child)) => {
                    ensure_sufficient_stack(|| self.rebuild(child)).map(SyntaxElement::Node)
                }
            };
            if let Some(replacement) = replacement {
                let slots = slots.get_or_insert_with(|| node.slots().to_vec());
                slots[index] = Some(replacement);
            }
        }
        slots.map(|slots| node.with_slots(slots))
    }

    fn attach(&mut self, token: &SyntaxToken) -> Option<SyntaxToken> {
        let mut result = None;
        if let Some(mut leading) = self.leading.take() {
            leading.extend(token.leading_trivia().iter().cloned());
            result = Some(token.with_leading_trivia(leading));
        }
        if let Some(extra) = self.trailing.remove(&token.identity()) {
            let base = result.as_ref().unwrap_or(token);
            let mut trailing: TriviaList = base.trailing_trivia().iter().cloned().collect();
            trailing.extend(extra);
            result = Some(base.with_trailing_trivia(trailing));
        }
        result
    }
}
