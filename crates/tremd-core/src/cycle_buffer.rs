//! Fixed-capacity circular storage for cycle-synced delay paths.
//!
//! A [`CycleBuffer`] is allocated once at its maximum capacity. The owner
//! decides how much of it is live (the current cycle length) and wraps its
//! heads modulo that length; the buffer itself never reallocates, so changing
//! the cycle length on the audio thread costs a zero-fill, not an allocation.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Heap-allocated sample storage with a fixed capacity.
///
/// # Example
///
/// ```rust
/// use tremd_core::CycleBuffer;
///
/// let mut buffer = CycleBuffer::new(8);
/// buffer.set(3, 0.5);
/// assert_eq!(buffer.get(3), 0.5);
///
/// // Wrap-around neighbours within a 4-sample cycle
/// assert_eq!(CycleBuffer::prev_index(0, 4), 3);
/// assert_eq!(CycleBuffer::next_index(3, 4), 0);
///
/// buffer.clear_to(4);
/// assert_eq!(buffer.get(3), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBuffer {
    data: Vec<f32>,
}

impl CycleBuffer {
    /// Allocates a zeroed buffer holding `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
        }
    }

    /// Number of samples the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Reads the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.data[index]
    }

    /// Writes the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: f32) {
        self.data[index] = value;
    }

    /// Zeroes the first `len` samples (clamped to capacity).
    pub fn clear_to(&mut self, len: usize) {
        let len = len.min(self.data.len());
        self.data[..len].fill(0.0);
    }

    /// Zeroes the whole buffer.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// The first `len` samples (clamped to capacity).
    #[inline]
    pub fn live(&self, len: usize) -> &[f32] {
        &self.data[..len.min(self.data.len())]
    }

    /// Index before `index` in a cycle of `len` samples.
    #[inline]
    pub const fn prev_index(index: usize, len: usize) -> usize {
        if index == 0 { len - 1 } else { index - 1 }
    }

    /// Index after `index` in a cycle of `len` samples.
    #[inline]
    pub const fn next_index(index: usize, len: usize) -> usize {
        let next = index + 1;
        if next >= len { 0 } else { next }
    }

    /// Index mirrored about zero in a cycle of `len` samples:
    /// `(len - index) % len`.
    #[inline]
    pub const fn mirror_index(index: usize, len: usize) -> usize {
        if index == 0 { 0 } else { len - index }
    }
}
