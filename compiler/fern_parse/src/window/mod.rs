//! A growable, pinnable window over a lazily produced sequence.
//!
//! The fresh parser source keeps scanned tokens here. The parser reads items
//! relative to a current index, peeks ahead, and pins positions it may
//! rewind to. While nothing is pinned the window recycles its front; while
//! something is pinned it keeps every item from the first pin onward and
//! grows instead.

use tracing::trace;

/// Items the window holds before it first shifts or grows.
pub const DEFAULT_WINDOW_CAPACITY: usize = 32;

/// Producer of window items.
pub trait WindowSource<T> {
    /// Per-fetch context, such as the lexing mode for the next token.
    type Argument: Copy + Default;

    /// Append up to `space` items, the first being the one at absolute index
    /// `start`, to `out`. Returns how many were appended; zero means the
    /// source is exhausted.
    fn fetch_more_items(
        &mut self,
        argument: Self::Argument,
        start: usize,
        out: &mut Vec<T>,
        space: usize,
    ) -> usize;
}

/// See the module docs.
#[derive(Debug)]
pub struct SlidingWindow<T> {
    /// Buffered items; `items[0]` is at `absolute_start`.
    items: Vec<T>,
    /// Logical capacity. Doubles when a pinned window fills up.
    capacity: usize,
    absolute_start: usize,
    /// Current index relative to `absolute_start`.
    current: usize,
    pin_count: usize,
    first_pinned: Option<usize>,
    /// Returned once the source is exhausted.
    default_value: T,
}

impl<T: Clone> SlidingWindow<T> {
    pub fn new(default_value: T) -> Self {
        SlidingWindow::with_capacity(default_value, DEFAULT_WINDOW_CAPACITY)
    }

    pub fn with_capacity(default_value: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        SlidingWindow {
            items: Vec::with_capacity(capacity),
            capacity,
            absolute_start: 0,
            current: 0,
            pin_count: 0,
            first_pinned: None,
            default_value,
        }
    }

    /// Absolute index of the current item.
    #[inline]
    pub fn absolute_index(&self) -> usize {
        self.absolute_start + self.current
    }

    #[inline]
    fn absolute_end(&self) -> usize {
        self.absolute_start + self.items.len()
    }

    /// Number of buffered items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pin_count > 0
    }

    fn add_more_items<S>(&mut self, source: &mut S, argument: S::Argument) -> bool
    where
        S: WindowSource<T>,
    {
        if self.items.len() >= self.capacity {
            self.try_shift_or_grow();
        }
        let space = self.capacity - self.items.len();
        let start = self.absolute_end();
        let fetched = source.fetch_more_items(argument, start, &mut self.items, space);
        fetched > 0
    }

    /// Make room: drop consumed items that no pin can return to, or grow.
    fn try_shift_or_grow(&mut self) {
        let past_halfway = self.current > self.capacity / 2;
        let may_shift = self
            .first_pinned
            .map_or(true, |pinned| pinned > self.absolute_start);

        if past_halfway && may_shift {
            let shift = match self.first_pinned {
                Some(pinned) => pinned - self.absolute_start,
                None => self.current,
            };
            self.items.drain(..shift);
            self.absolute_start += shift;
            self.current -= shift;
            trace!(shift, start = self.absolute_start, "window shifted");
        } else {
            self.capacity *= 2;
            self.items.reserve(self.capacity - self.items.len());
            trace!(capacity = self.capacity, pinned = self.pin_count, "window grew");
        }
    }

    /// Item at the current index, fetching with `argument` if it is not
    /// buffered yet.
    pub fn current_item<S>(&mut self, source: &mut S, argument: S::Argument) -> T
    where
        S: WindowSource<T>,
    {
        if self.current >= self.items.len() && !self.add_more_items(source, argument) {
            return self.default_value.clone();
        }
        self.items[self.current].clone()
    }

    /// Item `n` positions after the current one (`n == 0` is the current item).
    pub fn peek_item_n<S>(&mut self, source: &mut S, n: usize) -> T
    where
        S: WindowSource<T>,
    {
        while self.current + n >= self.items.len() {
            if !self.add_more_items(source, S::Argument::default()) {
                return self.default_value.clone();
            }
        }
        self.items[self.current + n].clone()
    }

    #[inline]
    pub fn move_to_next_item(&mut self) {
        self.current += 1;
    }

    /// Forget every buffered item at or after the current index, so the
    /// next read fetches again.
    pub fn discard_all_items_from_current_index_onwards(&mut self) {
        self.items.truncate(self.current);
    }

    /// Jump to `absolute_index`. Inside the buffer this only moves the
    /// current index; otherwise the buffer restarts empty at that index.
    pub fn set_absolute_index(&mut self, absolute_index: usize) {
        if (self.absolute_start..self.absolute_end()).contains(&absolute_index) {
            self.current = absolute_index - self.absolute_start;
        } else {
            assert!(!self.is_pinned(), "cannot restart a pinned window");
            self.absolute_start = absolute_index;
            self.items.clear();
            self.current = 0;
        }
    }

    /// Pin the current index so it stays buffered until released.
    pub fn get_and_pin_absolute_index(&mut self) -> usize {
        let absolute_index = self.absolute_index();
        if self.pin_count == 0 {
            self.first_pinned = Some(absolute_index);
        }
        self.pin_count += 1;
        absolute_index
    }

    pub fn release_and_unpin_absolute_index(&mut self, absolute_index: usize) {
        assert!(self.pin_count > 0, "unbalanced unpin of {absolute_index}");
        assert!(
            self.first_pinned.is_some_and(|first| first <= absolute_index),
            "unpin of {absolute_index} before the first pin"
        );
        self.pin_count -= 1;
        if self.pin_count == 0 {
            self.first_pinned = None;
        }
    }

    /// Return to a pinned index.
    pub fn rewind_to_pinned_index(&mut self, absolute_index: usize) {
        assert!(
            absolute_index >= self.absolute_start && absolute_index <= self.absolute_end(),
            "rewind to {absolute_index} outside window {}..{}",
            self.absolute_start,
            self.absolute_end()
        );
        self.current = absolute_index - self.absolute_start;
    }
}

#[cfg(test)]
mod tests;
