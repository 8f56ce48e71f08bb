//! Immutable composite nodes and the token/node element sum type.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::{SyntaxKind, SyntaxToken, TokenFlags};

bitflags! {
    /// Facts about a subtree, aggregated bottom-up when the node is built.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Built while the parser was in strict mode.
        const PARSED_IN_STRICT_MODE = 1 << 0;
        const CONTAINS_MISSING = 1 << 1;
        const CONTAINS_SKIPPED_TEXT = 1 << 2;
        const CONTAINS_RELEXED = 1 << 3;
        /// A token or list inside carries a diagnostic.
        const CONTAINS_DIAGNOSTIC = 1 << 4;
    }
}

impl NodeFlags {
    /// Flags propagated from children to parents.
    const INHERITED: NodeFlags = NodeFlags::CONTAINS_MISSING
        .union(NodeFlags::CONTAINS_SKIPPED_TEXT)
        .union(NodeFlags::CONTAINS_RELEXED)
        .union(NodeFlags::CONTAINS_DIAGNOSTIC);

    /// Subtrees with any of these cannot be reused by an incremental parse.
    pub const INCREMENTALLY_UNUSABLE: NodeFlags = NodeFlags::INHERITED;

    fn from_token(flags: TokenFlags) -> NodeFlags {
        let mut out = NodeFlags::empty();
        if flags.contains(TokenFlags::MISSING) {
            out |= NodeFlags::CONTAINS_MISSING;
        }
        if flags.contains(TokenFlags::HAS_SKIPPED_TEXT) {
            out |= NodeFlags::CONTAINS_SKIPPED_TEXT;
        }
        if flags.contains(TokenFlags::RELEXED) {
            out |= NodeFlags::CONTAINS_RELEXED;
        }
        if flags.contains(TokenFlags::HAS_DIAGNOSTIC) {
            out |= NodeFlags::CONTAINS_DIAGNOSTIC;
        }
        out
    }
}

/// Either a node or a token.
#[derive(Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        match self {
            SyntaxElement::Node(node) => node.full_width(),
            SyntaxElement::Token(token) => token.full_width(),
        }
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        matches!(self, SyntaxElement::Node(_))
    }

    #[inline]
    pub fn is_token(&self) -> bool {
        matches!(self, SyntaxElement::Token(_))
    }

    #[inline]
    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    #[inline]
    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }

    /// Node flags of this element (derived from token flags for a token).
    pub fn flags(&self) -> NodeFlags {
        match self {
            SyntaxElement::Node(node) => node.flags(),
            SyntaxElement::Token(token) => NodeFlags::from_token(token.flags()),
        }
    }

    pub fn is_incrementally_unusable(&self) -> bool {
        match self {
            SyntaxElement::Node(node) => node.is_incrementally_unusable(),
            SyntaxElement::Token(token) => token.is_incrementally_unusable(),
        }
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Node(node) => node.first_token(),
            SyntaxElement::Token(token) => Some(token.clone()),
        }
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Node(node) => node.last_token(),
            SyntaxElement::Token(token) => Some(token.clone()),
        }
    }

    pub fn write_full_text(&self, out: &mut String) {
        match self {
            SyntaxElement::Node(node) => node.write_full_text(out),
            SyntaxElement::Token(token) => token.write_full_text(out),
        }
    }

    /// Tokens of this element in document order, full starts relative to
    /// the element.
    pub fn tokens(&self) -> TokenIter {
        match self {
            SyntaxElement::Node(node) => node.tokens(),
            SyntaxElement::Token(token) => TokenIter {
                stack: Vec::new(),
                pending: Some(token.clone()),
                position: 0,
            },
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        SyntaxElement::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        SyntaxElement::Token(token)
    }
}

impl fmt::Debug for SyntaxElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxElement::Node(node) => node.fmt(f),
            SyntaxElement::Token(token) => token.fmt(f),
        }
    }
}

struct NodeData {
    kind: SyntaxKind,
    flags: NodeFlags,
    full_width: u32,
    /// Fixed slots per node kind; absent optional children are `None`.
    /// Lists only hold `Some`.
    slots: Box<[Option<SyntaxElement>]>,
}

impl NodeData {
    /// Move the child nodes out of the slots, leaving tokens in place.
    fn take_child_nodes(&mut self, out: &mut Vec<SyntaxNode>) {
        for slot in self.slots.iter_mut() {
            if matches!(slot, Some(SyntaxElement::Node(_))) {
                if let Some(SyntaxElement::Node(node)) = slot.take() {
                    out.push(node);
                }
            }
        }
    }
}

/// Tears down uniquely owned subtrees with an explicit stack, so dropping a
/// deeply nested tree does not recurse once per level.
impl Drop for NodeData {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_child_nodes(&mut stack);
        while let Some(node) = stack.pop() {
            if let Ok(mut data) = Arc::try_unwrap(node.0) {
                data.take_child_nodes(&mut stack);
            }
        }
    }
}

/// An interior node of the syntax tree.
///
/// Cloning is a reference-count bump; equality is structural.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl SyntaxNode {
    /// Build a node, aggregating width and flags from its slots.
    ///
    /// `own_flags` carries the flags that belong to this node itself
    /// (strict mode, list diagnostics).
    pub fn new(
        kind: SyntaxKind,
        slots: impl IntoIterator<Item = Option<SyntaxElement>>,
        own_flags: NodeFlags,
    ) -> Self {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        let slots: Box<[Option<SyntaxElement>]> = slots.into_iter().collect();
        let mut flags = own_flags;
        let mut full_width = 0u32;
        for element in slots.iter().flatten() {
            full_width += element.full_width();
            flags |= element.flags() & NodeFlags::INHERITED;
        }
        SyntaxNode(Arc::new(NodeData {
            kind,
            flags,
            full_width,
            slots,
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.0.flags
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.full_width
    }

    /// Width without the first token's leading and last token's trailing trivia.
    pub fn width(&self) -> u32 {
        let leading = self.first_token().map_or(0, |t| t.leading_trivia_width());
        let trailing = self.last_token().map_or(0, |t| t.trailing_trivia_width());
        self.0.full_width.saturating_sub(leading + trailing)
    }

    #[inline]
    pub fn parsed_in_strict_mode(&self) -> bool {
        self.0.flags.contains(NodeFlags::PARSED_IN_STRICT_MODE)
    }

    #[inline]
    pub fn is_incrementally_unusable(&self) -> bool {
        self.0.flags.intersects(NodeFlags::INCREMENTALLY_UNUSABLE)
    }

    /// All slots, including absent optional children.
    #[inline]
    pub fn slots(&self) -> &[Option<SyntaxElement>] {
        &self.0.slots
    }

    /// Slot `index`, if present.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&SyntaxElement> {
        self.0.slots.get(index).and_then(Option::as_ref)
    }

    pub fn child_node(&self, index: usize) -> Option<&SyntaxNode> {
        self.child(index).and_then(SyntaxElement::as_node)
    }

    pub fn child_token(&self, index: usize) -> Option<&SyntaxToken> {
        self.child(index).and_then(SyntaxElement::as_token)
    }

    /// Present children in order.
    pub fn children(&self) -> impl Iterator<Item = &SyntaxElement> {
        self.0.slots.iter().flatten()
    }

    /// Number of present children.
    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    /// First token in document order (may be zero-width).
    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.tokens().next().map(|(_, token)| token)
    }

    /// Last token in document order (may be zero-width).
    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.find_last_token(|_| true)
    }

    /// Last token that occupies source text. Skips trailing missing tokens
    /// and automatic semicolons.
    pub fn last_non_zero_width_token(&self) -> Option<SyntaxToken> {
        self.find_last_token(|token| token.full_width() > 0)
    }

    fn find_last_token(&self, accept: impl Fn(&SyntaxToken) -> bool) -> Option<SyntaxToken> {
        let mut stack: Vec<&SyntaxElement> = self.children().collect();
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) if accept(token) => return Some(token.clone()),
                SyntaxElement::Token(_) => {}
                SyntaxElement::Node(node) => stack.extend(node.children()),
            }
        }
        None
    }

    /// Same kind and own flags with replaced slots.
    #[must_use]
    pub fn with_slots(&self, slots: impl IntoIterator<Item = Option<SyntaxElement>>) -> SyntaxNode {
        SyntaxNode::new(self.0.kind, slots, self.0.flags)
    }

    /// Same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn write_full_text(&self, out: &mut String) {
        for (_, token) in self.tokens() {
            token.write_full_text(out);
        }
    }

    /// Concatenated text of every token and trivia piece.
    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.0.full_width as usize);
        self.write_full_text(&mut out);
        out
    }

    /// Tokens in document order with their absolute full start, treating this
    /// node as starting at `offset`.
    pub fn tokens_from(&self, offset: u32) -> TokenIter {
        TokenIter {
            stack: vec![(self.clone(), 0)],
            pending: None,
            position: offset,
        }
    }

    pub fn tokens(&self) -> TokenIter {
        self.tokens_from(0)
    }

    /// Token whose full span contains `position`, with its full start.
    ///
    /// Positions at or past the end resolve to the last token.
    pub fn find_token(&self, position: u32) -> Option<(SyntaxToken, u32)> {
        if position >= self.full_width() {
            let last = self.last_token()?;
            return Some((last.clone(), self.full_width() - last.full_width()));
        }
        let mut node = self.clone();
        let mut start = 0u32;
        loop {
            let mut next = None;
            for element in node.children() {
                let width = element.full_width();
                if position < start + width {
                    next = Some(element.clone());
                    break;
                }
                start += width;
            }
            match next? {
                SyntaxElement::Token(token) => return Some((token, start)),
                SyntaxElement::Node(child) => node = child,
            }
        }
    }

    /// Indented kind/text dump, one element per line. Used by tests and
    /// debugging output.
    pub fn debug_dump(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        let _ = writeln!(out, "{:?}", self.kind());
        let mut stack: Vec<(&SyntaxElement, usize)> =
            self.0.slots.iter().rev().flatten().map(|child| (child, 1)).collect();
        while let Some((element, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match element {
                SyntaxElement::Token(token) => {
                    let _ = writeln!(out, "{indent}{token:?}");
                }
                SyntaxElement::Node(node) => {
                    let _ = writeln!(out, "{indent}{:?}", node.kind());
                    stack.extend(node.0.slots.iter().rev().flatten().map(|child| (child, depth + 1)));
                }
            }
        }
        out
    }
}

/// Structural equality, walked with an explicit stack. Shared subtrees are
/// equal without being visited.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.ptr_eq(right) {
                continue;
            }
            let (left, right) = (&*left.0, &*right.0);
            if left.kind != right.kind
                || left.flags != right.flags
                || left.full_width != right.full_width
                || left.slots.len() != right.slots.len()
            {
                return false;
            }
            for pair in left.slots.iter().zip(right.slots.iter()) {
                match pair {
                    (None, None) => {}
                    (Some(SyntaxElement::Token(a)), Some(SyntaxElement::Token(b))) => {
                        if a != b {
                            return false;
                        }
                    }
                    (Some(SyntaxElement::Node(a)), Some(SyntaxElement::Node(b))) => {
                        pending.push((a, b));
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.debug_dump())
        } else {
            write!(f, "{:?}@{}", self.0.kind, self.0.full_width)
        }
    }
}

/// Depth-first token iterator yielding `(full_start, token)`.
pub struct TokenIter {
    stack: Vec<(SyntaxNode, usize)>,
    /// A lone token iterated as an element.
    pending: Option<SyntaxToken>,
    position: u32,
}

impl Iterator for TokenIter {
    type Item = (u32, SyntaxToken);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            let start = self.position;
            self.position += token.full_width();
            return Some((start, token));
        }
        loop {
            let (node, index) = self.stack.last_mut()?;
            let Some(slot) = node.slots().get(*index) else {
                self.stack.pop();
                continue;
            };
            *index += 1;
            match slot {
                None => {}
                Some(SyntaxElement::Token(token)) => {
                    let start = self.position;
                    self.position += token.full_width();
                    return Some((start, token.clone()));
                }
                Some(SyntaxElement::Node(child)) => {
                    let child = child.clone();
                    self.stack.push((child, 0));
                }
            }
        }
    }
}
