//! Stack growth for the recursive passes.
//!
//! Parenthesized expressions, call arguments and operator chains nest as
//! deeply as the input does. The parser and checker route every recursive
//! step through [`ensure_sufficient_stack`], which moves onto a fresh heap
//! segment when the current stack runs low, so deep input costs memory
//! instead of overflowing the host's stack.

/// Grow when less than this remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
