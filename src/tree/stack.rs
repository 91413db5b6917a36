//! Stack growth for recursion over deep trees
//!
//! Descriptor depth is only bounded by the input size, so every recursive
//! walk over a tree runs through `with_stack`, which moves onto a fresh
//! heap-allocated stack segment when the current one runs low.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;
/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
