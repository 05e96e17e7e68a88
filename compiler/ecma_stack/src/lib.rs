//! Stack growth for deeply nested expression trees.
//!
//! Operator trees are walked recursively, and a long chain such as
//! `a + b + c + ...` produced by generated code nests one level per operand.
//! [`ensure_sufficient_stack`] wraps each recursive step so the native stack
//! is grown on demand instead of overflowing.
//!
//! On `wasm32` the closure is called directly; the host engine owns the stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, node: &Node) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(node))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Direct call on WASM.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
