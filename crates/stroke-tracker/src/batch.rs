//! Batch emission of sampled stroke points.
//!
//! A stroke releases its sampled history through the [`PointerSink`] trait,
//! which receives contiguous, not-yet-emitted runs of points as three
//! index-aligned slices. [`PointerBuffer`] is the standard sink: it stores
//! everything appended to it as parallel arrays, each point tagged with the
//! pointer id it came from, ready to hand to a downstream recognizer.

use crate::stroke::DEFAULT_CAPACITY;

/// Receiver for batches of sampled points.
///
/// `times`, `xs`, and `ys` are index-aligned and always of equal length.
/// Implementations copy the data; the slices borrow from the emitting
/// stroke and do not outlive the call.
pub trait PointerSink {
    fn append(&mut self, pointer_id: i32, times: &[i32], xs: &[i32], ys: &[i32]);
}

/// Sampled points from one or more strokes, grouped in emission order and
/// keyed by pointer identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerBuffer {
    pointer_ids: Vec<i32>,
    times: Vec<i32>,
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl PointerBuffer {
    /// Create an empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pointer_ids: Vec::with_capacity(capacity),
            times: Vec::with_capacity(capacity),
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    /// Number of points in the buffer.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the buffer holds no points.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Pointer id of each point, in emission order.
    pub fn pointer_ids(&self) -> &[i32] {
        &self.pointer_ids
    }

    /// Event time of each point, in emission order.
    pub fn times(&self) -> &[i32] {
        &self.times
    }

    /// X coordinate of each point, in emission order.
    pub fn xs(&self) -> &[i32] {
        &self.xs
    }

    /// Y coordinate of each point, in emission order.
    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    /// Drop all points, keeping the allocations.
    pub fn clear(&mut self) {
        self.pointer_ids.clear();
        self.times.clear();
        self.xs.clear();
        self.ys.clear();
    }
}

impl PointerSink for PointerBuffer {
    fn append(&mut self, pointer_id: i32, times: &[i32], xs: &[i32], ys: &[i32]) {
        debug_assert!(times.len() == xs.len() && times.len() == ys.len());
        self.pointer_ids
            .extend(std::iter::repeat(pointer_id).take(times.len()));
        self.times.extend_from_slice(times);
        self.xs.extend_from_slice(xs);
        self.ys.extend_from_slice(ys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_tags_every_point_with_the_pointer_id() {
        let mut buffer = PointerBuffer::new();
        buffer.append(3, &[0, 10, 20], &[1, 2, 3], &[4, 5, 6]);
        buffer.append(5, &[30], &[7], &[8]);

        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.pointer_ids(), &[3, 3, 3, 5]);
        assert_eq!(buffer.times(), &[0, 10, 20, 30]);
        assert_eq!(buffer.xs(), &[1, 2, 3, 7]);
        assert_eq!(buffer.ys(), &[4, 5, 6, 8]);
    }

    #[test]
    fn test_empty_append_is_a_no_op() {
        let mut buffer = PointerBuffer::new();
        buffer.append(1, &[], &[], &[]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clear_keeps_nothing() {
        let mut buffer = PointerBuffer::new();
        buffer.append(1, &[0], &[0], &[0]);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.pointer_ids().len(), 0);
    }
}
