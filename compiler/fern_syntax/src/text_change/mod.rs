//! Text edits in old-text coordinates.
//!
//! A [`TextChange`] replaces the old region `[start, old_end)` with `new_len`
//! bytes. Incremental parsing works against a single change, so a sequence
//! of edits (each expressed against the text produced by the previous one)
//! is first collapsed into one conservative change with [`TextChange::collapse`].

use crate::Span;

/// Caller errors when describing edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TextChangeError {
    /// An edit reaches past the end of the text it applies to.
    #[error("edit {index} ends at {end}, past the end of a {len}-byte text")]
    OutOfBounds { index: usize, end: u32, len: u32 },
    /// The edited text would exceed `u32::MAX` bytes.
    #[error("edit {index} grows the text past u32::MAX bytes")]
    TooLarge { index: usize },
}

/// A single replacement: `[start, old_end)` in the old text becomes `new_len` bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextChange {
    /// Start byte offset in old text.
    pub start: u32,
    /// End byte offset in old text (exclusive).
    pub old_end: u32,
    /// Length of replacement text in bytes.
    pub new_len: u32,
}

impl TextChange {
    #[inline]
    pub const fn new(start: u32, old_end: u32, new_len: u32) -> Self {
        debug_assert!(start <= old_end);
        TextChange {
            start,
            old_end,
            new_len,
        }
    }

    #[inline]
    pub const fn insert(at: u32, len: u32) -> Self {
        TextChange::new(at, at, len)
    }

    #[inline]
    pub const fn delete(start: u32, len: u32) -> Self {
        TextChange::new(start, start + len, 0)
    }

    #[inline]
    pub const fn replace(start: u32, old_len: u32, new_len: u32) -> Self {
        TextChange::new(start, start + old_len, new_len)
    }

    /// Build a change from a replaced old span and the new text length.
    #[inline]
    pub const fn from_span(span: Span, new_len: u32) -> Self {
        TextChange::new(span.start, span.end, new_len)
    }

    /// Removed region in old-text coordinates.
    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.old_end)
    }

    /// Inserted region in new-text coordinates.
    #[inline]
    pub const fn new_span(&self) -> Span {
        Span::new(self.start, self.start + self.new_len)
    }

    #[inline]
    pub const fn old_len(&self) -> u32 {
        self.old_end - self.start
    }

    #[inline]
    pub const fn new_end(&self) -> u32 {
        self.start + self.new_len
    }

    /// Net change in document length (positive = grew).
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::from(self.new_len) - i64::from(self.old_len())
    }

    /// Length of the text this change produces from an old text of `old_len` bytes.
    #[inline]
    pub fn apply_to_len(&self, old_len: u32) -> i64 {
        i64::from(old_len) + self.delta()
    }

    /// Whether an old-text element at `[start, start + len)` may be affected.
    ///
    /// Inclusive at both ends, see [`Span::touches`].
    #[inline]
    pub fn touches(&self, start: u32, len: u32) -> bool {
        self.span().touches(start, len)
    }

    /// Move the start of the change back to `new_start`, keeping the old end.
    ///
    /// The bytes between `new_start` and the original start are treated as
    /// both removed and re-inserted, so the delta is unchanged.
    #[must_use]
    pub fn extend_back_to(self, new_start: u32) -> Self {
        let start = new_start.min(self.start);
        TextChange {
            start,
            old_end: self.old_end,
            new_len: self.new_len + (self.start - start),
        }
    }

    /// Collapse a sequence of edits into one change against the original text.
    ///
    /// Each edit is expressed in the coordinates of the text produced by the
    /// edits before it. `old_len` is the length of the original text. Returns
    /// `Ok(None)` for an empty sequence.
    pub fn collapse(changes: &[TextChange], old_len: u32) -> Result<Option<Self>, TextChangeError> {
        let Some((first, rest)) = changes.split_first() else {
            return Ok(None);
        };

        let mut current_len = checked_apply(first, old_len, 0)?;

        let mut old_start = i64::from(first.start);
        let mut old_end = i64::from(first.old_end);
        let mut new_end = i64::from(first.new_end());

        for (offset, next) in rest.iter().enumerate() {
            current_len = checked_apply(next, current_len, offset + 1)?;

            let next_old_end = i64::from(next.old_end);
            let next_new_end = i64::from(next.new_end());

            old_start = old_start.min(i64::from(next.start));
            old_end = old_end.max(old_end + (next_old_end - new_end));
            new_end = next_new_end.max(next_new_end + (new_end - next_old_end));
        }

        let (Ok(start), Ok(old_end), Ok(new_len)) = (
            u32::try_from(old_start),
            u32::try_from(old_end),
            u32::try_from(new_end - old_start),
        ) else {
            return Err(TextChangeError::TooLarge {
                index: changes.len() - 1,
            });
        };
        Ok(Some(TextChange::new(start, old_end, new_len)))
    }
}

/// Validate `change` against a text of `len` bytes and return the new length.
fn checked_apply(change: &TextChange, len: u32, index: usize) -> Result<u32, TextChangeError> {
    if change.old_end > len {
        return Err(TextChangeError::OutOfBounds {
            index,
            end: change.old_end,
            len,
        });
    }
    u32::try_from(change.apply_to_len(len)).map_err(|_| TextChangeError::TooLarge { index })
}
