//! Stack headroom for recursive descent.
//!
//! Expression parsing, tree walking and the scoping check all recurse once
//! per nesting level. Template trees are rarely deep, but a pathological
//! expression like `[[[[...]]]]` or a deeply nested source directory should
//! not take the process down, so each recursive step goes through
//! [`ensure_sufficient_stack`].

/// Remaining stack below which we switch to a freshly allocated segment.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
#[cfg(not(target_arch = "wasm32"))]
const GROWTH: usize = 1024 * 1024;

/// Run `f`, growing the stack first if fewer than 64KB remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
