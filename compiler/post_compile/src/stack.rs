//! Stack growth for deeply nested scopes.
//!
//! Scope building recurses once per subroutine body and group. Programs
//! generated by tools can nest far deeper than hand-written ones, so each
//! recursive step runs through [`ensure_sufficient_stack`].

/// Grow the stack when less than this remains (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
