use pretty_assertions::assert_eq;

use super::{SlidingWindow, WindowSource};

/// Counts upward from zero, one item per fetch, until `limit`.
struct Counter {
    limit: usize,
    fetches: usize,
}

impl Counter {
    fn new(limit: usize) -> Self {
        Counter { limit, fetches: 0 }
    }
}

impl WindowSource<i64> for Counter {
    type Argument = ();

    fn fetch_more_items(&mut self, (): (), start: usize, out: &mut Vec<i64>, space: usize) -> usize {
        assert!(space > 0);
        self.fetches += 1;
        if start >= self.limit {
            return 0;
        }
        out.push(i64::try_from(start).unwrap_or(i64::MAX));
        1
    }
}

#[test]
fn reads_and_peeks_in_order() {
    let mut source = Counter::new(100);
    let mut window = SlidingWindow::new(-1);
    assert_eq!(window.current_item(&mut source, ()), 0);
    assert_eq!(window.peek_item_n(&mut source, 3), 3);
    window.move_to_next_item();
    assert_eq!(window.current_item(&mut source, ()), 1);
    assert_eq!(window.absolute_index(), 1);
    // Already buffered: no new fetch.
    let fetches = source.fetches;
    assert_eq!(window.peek_item_n(&mut source, 2), 3);
    assert_eq!(source.fetches, fetches);
}

#[test]
fn exhausted_source_yields_default() {
    let mut source = Counter::new(2);
    let mut window = SlidingWindow::new(-1);
    assert_eq!(window.peek_item_n(&mut source, 5), -1);
    window.move_to_next_item();
    window.move_to_next_item();
    assert_eq!(window.current_item(&mut source, ()), -1);
}

#[test]
fn unpinned_window_shifts_instead_of_growing() {
    let mut source = Counter::new(1_000);
    let mut window = SlidingWindow::with_capacity(-1, 4);
    for expected in 0..100 {
        assert_eq!(window.current_item(&mut source, ()), expected);
        window.move_to_next_item();
    }
    assert_eq!(window.capacity(), 4);
    assert!(window.len() <= 4);
}

#[test]
fn pinned_window_grows_and_rewinds() {
    let mut source = Counter::new(1_000);
    let mut window = SlidingWindow::with_capacity(-1, 4);
    window.current_item(&mut source, ());
    window.move_to_next_item();

    let pin = window.get_and_pin_absolute_index();
    assert_eq!(pin, 1);
    for _ in 0..20 {
        window.current_item(&mut source, ());
        window.move_to_next_item();
    }
    assert!(window.capacity() > 4);

    window.rewind_to_pinned_index(pin);
    assert_eq!(window.current_item(&mut source, ()), 1);
    window.release_and_unpin_absolute_index(pin);
    assert!(!window.is_pinned());
}

#[test]
fn nested_pins_keep_the_outermost_item() {
    let mut source = Counter::new(1_000);
    let mut window = SlidingWindow::with_capacity(-1, 2);
    let outer = window.get_and_pin_absolute_index();
    window.current_item(&mut source, ());
    window.move_to_next_item();
    let inner = window.get_and_pin_absolute_index();
    for _ in 0..10 {
        window.current_item(&mut source, ());
        window.move_to_next_item();
    }
    window.rewind_to_pinned_index(inner);
    assert_eq!(window.current_item(&mut source, ()), 1);
    window.release_and_unpin_absolute_index(inner);
    assert_eq!(window.pin_count(), 1);
    window.rewind_to_pinned_index(outer);
    assert_eq!(window.current_item(&mut source, ()), 0);
    window.release_and_unpin_absolute_index(outer);
}

#[test]
fn discard_refetches_from_current_index() {
    let mut source = Counter::new(1_000);
    let mut window = SlidingWindow::new(-1);
    window.peek_item_n(&mut source, 4);
    window.move_to_next_item();
    window.discard_all_items_from_current_index_onwards();
    assert_eq!(window.len(), 1);
    let fetches = source.fetches;
    assert_eq!(window.current_item(&mut source, ()), 1);
    assert_eq!(source.fetches, fetches + 1);
}

#[test]
fn set_absolute_index_inside_and_outside_buffer() {
    let mut source = Counter::new(1_000);
    let mut window = SlidingWindow::new(-1);
    window.peek_item_n(&mut source, 3);
    window.set_absolute_index(2);
    assert_eq!(window.current_item(&mut source, ()), 2);

    window.set_absolute_index(50);
    assert!(window.is_empty());
    assert_eq!(window.current_item(&mut source, ()), 50);
}

#[test]
#[should_panic(expected = "unbalanced unpin")]
fn unpin_without_pin_panics() {
    let mut window: SlidingWindow<i64> = SlidingWindow::new(-1);
    window.release_and_unpin_absolute_index(0);
}

#[test]
#[should_panic(expected = "cannot restart a pinned window")]
fn pinned_window_cannot_restart_elsewhere() {
    let mut source = Counter::new(100);
    let mut window = SlidingWindow::new(-1);
    window.current_item(&mut source, ());
    window.get_and_pin_absolute_index();
    window.set_absolute_index(50);
}
