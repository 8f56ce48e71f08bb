//! Stack growth guard for recursive descent.
//!
//! The grammar recurses once per nesting level (statement inside block inside
//! function inside expression ...). Pathological inputs such as ten thousand
//! nested parentheses would overflow a default thread stack, so every
//! re-entrant production wraps its body in [`ensure_sufficient_stack`].
//!
//! - **Native targets** grow the stack on demand through `stacker`.
//! - **WASM targets** call the closure directly.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn parse_statement(&mut self) -> SyntaxElement {
///     ensure_sufficient_stack(|| self.parse_statement_worker())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
