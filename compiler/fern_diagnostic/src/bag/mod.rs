//! Ordered collection of diagnostics.

use crate::Diagnostic;

/// Diagnostics in the order they were reported.
///
/// The parser reports through [`DiagnosticBag::report`], which drops a
/// diagnostic that starts where the previous one did: the first error at a
/// position explains it, later ones are cascades. The scanner sink uses
/// [`DiagnosticBag::push`], which keeps everything, because rescans discard
/// by position rather than by count.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unconditionally.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Append unless the last diagnostic starts at the same position.
    ///
    /// Returns whether the diagnostic was kept.
    pub fn report(&mut self, diagnostic: Diagnostic) -> bool {
        if self
            .items
            .last()
            .is_some_and(|last| last.position() == diagnostic.position())
        {
            return false;
        }
        self.items.push(diagnostic);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Drop everything reported after the first `len` diagnostics.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Move all diagnostics out, leaving the bag empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.items)
    }

    /// Diagnostics sorted by position; equal positions keep report order.
    pub fn into_sorted_vec(self) -> Vec<Diagnostic> {
        let mut items = self.items;
        items.sort_by_key(Diagnostic::position);
        items
    }
}

impl Extend<Diagnostic> for DiagnosticBag {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
