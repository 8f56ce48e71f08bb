//! Node construction with parser context baked in.

use crate::{NodeFlags, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Builds nodes stamped with the parser state that produced them.
///
/// The parser keeps one factory per strict-mode state; a node built in
/// strict mode carries [`NodeFlags::PARSED_IN_STRICT_MODE`] so an incremental
/// parse never reuses it under different rules.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeFactory {
    strict: bool,
}

impl NodeFactory {
    pub const fn new(strict: bool) -> Self {
        NodeFactory { strict }
    }

    #[inline]
    pub const fn is_strict(self) -> bool {
        self.strict
    }

    fn own_flags(self) -> NodeFlags {
        if self.strict {
            NodeFlags::PARSED_IN_STRICT_MODE
        } else {
            NodeFlags::empty()
        }
    }

    /// A node with a fixed slot layout for `kind`.
    pub fn node<I>(self, kind: SyntaxKind, slots: I) -> SyntaxNode
    where
        I: IntoIterator<Item = Option<SyntaxElement>>,
    {
        debug_assert!(!kind.is_list(), "use `list` for list nodes");
        SyntaxNode::new(kind, slots, self.own_flags())
    }

    /// An unseparated list.
    ///
    /// `has_diagnostic` marks lists whose own loop reported an error (an
    /// unexpected token), so the list is never reused as-is.
    pub fn list(self, elements: Vec<SyntaxElement>, has_diagnostic: bool) -> SyntaxNode {
        self.list_node(SyntaxKind::List, elements, has_diagnostic)
    }

    /// A list whose odd positions hold separators.
    ///
    /// Besides unexpected tokens, `has_diagnostic` also covers a trailing
    /// separator or a missing required element.
    pub fn separated_list(self, elements: Vec<SyntaxElement>, has_diagnostic: bool) -> SyntaxNode {
        self.list_node(SyntaxKind::SeparatedList, elements, has_diagnostic)
    }

    /// A list of modifier keywords.
    pub fn modifiers(self, tokens: Vec<SyntaxToken>) -> SyntaxNode {
        self.list(tokens.into_iter().map(SyntaxElement::Token).collect(), false)
    }

    fn list_node(self, kind: SyntaxKind, elements: Vec<SyntaxElement>, has_diagnostic: bool) -> SyntaxNode {
        let mut flags = self.own_flags();
        if has_diagnostic {
            flags |= NodeFlags::CONTAINS_DIAGNOSTIC;
        }
        SyntaxNode::new(kind, elements.into_iter().map(Some), flags)
    }
}

/// Wrap a token as a present slot.
#[inline]
pub fn slot_token(token: SyntaxToken) -> Option<SyntaxElement> {
    Some(SyntaxElement::Token(token))
}

/// Wrap a node as a present slot.
#[inline]
pub fn slot_node(node: SyntaxNode) -> Option<SyntaxElement> {
    Some(SyntaxElement::Node(node))
}
