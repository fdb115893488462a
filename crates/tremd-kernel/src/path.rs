//! One circular delay path.
//!
//! A [`DelayPath`] owns a write buffer and a read buffer of fixed capacity.
//! Per sample it:
//!
//! 1. latches its pending tuning when the head is at phase zero, zeroing
//!    both buffers over the new extent if the cycle length changed,
//! 2. smooths the incoming sample with the write buffer's neighbours,
//!    `(write[h-1] + x + write[h+1]) / 3`, and stores it at `write[h]`,
//! 3. accumulates it into the read buffer at `h` (forward) or `len - h`
//!    (reverse) with feedback: `read[m] = w + feedback · read[m]`,
//! 4. advances the head and reports `read[h]` and its mirror `read[len - h]`.
//!
//! Stored values are finite and bounded by [`MAX_SAMPLE`], so an overflow
//! on one sample cannot poison the buffers.
//!
//! Cycle length, feedback and direction only change at phase zero, so a
//! cycle is never cut short or re-addressed halfway through.

use tremd_core::{CycleBuffer, finite_or_zero, flush_denormal};

use crate::envelope::Envelope;
use crate::params::Direction;
use crate::snapshot::PathParams;

/// Upper bound on the feedback gain applied to the read buffer.
pub const MAX_FEEDBACK: f32 = 0.95;

/// Largest magnitude a path stores in its buffers.
pub const MAX_SAMPLE: f32 = 1.0e6;

/// Settings a path applies from one phase-zero boundary to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTuning {
    /// Cycle length in samples, `1..=capacity`.
    pub cycle_len: usize,
    /// Feedback gain, `0..=MAX_FEEDBACK`.
    pub feedback: f32,
    /// Read-buffer addressing.
    pub direction: Direction,
}

impl PathTuning {
    /// State of a freshly constructed or reset path.
    pub const INITIAL: Self = Self {
        cycle_len: 1,
        feedback: 0.0,
        direction: Direction::Forward,
    };

    /// Tuning for `params` at an already computed cycle length.
    pub fn from_params(params: &PathParams, cycle_len: usize) -> Self {
        Self {
            cycle_len: cycle_len.max(1),
            feedback: params.depth.clamp(0.0, MAX_FEEDBACK),
            direction: params.direction,
        }
    }
}

/// What a path produces for one input sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathFrame {
    /// `read[head]` after the head advanced.
    pub output: f32,
    /// `read[(len - head) % len]` after the head advanced.
    pub mirrored: f32,
    /// Envelope value at the head before it advanced.
    pub envelope: f32,
}

/// Circular delay path with phase-latched retuning.
///
/// # Example
///
/// ```rust
/// use tremd_kernel::{DelayPath, Envelope, PathTuning, Snapshot};
///
/// let mut path = DelayPath::new(1024);
/// path.retune(PathTuning::from_params(&Snapshot::default().primary, 16));
///
/// let env = Envelope { fade: 0.0, duck: 0.0 };
/// let frame = path.tick(1.0, &env);
/// assert_eq!(path.cycle_len(), 16);
/// assert_eq!(path.head(), 1);
/// assert_eq!(frame.envelope, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DelayPath {
    write: CycleBuffer,
    read: CycleBuffer,
    active: PathTuning,
    pending: PathTuning,
    head: usize,
}

impl DelayPath {
    /// Allocates a path whose buffers hold `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            write: CycleBuffer::new(capacity),
            read: CycleBuffer::new(capacity),
            active: PathTuning::INITIAL,
            pending: PathTuning::INITIAL,
            head: 0,
        }
    }

    /// Buffer capacity in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.write.capacity()
    }

    /// Stages a tuning to be applied at the next phase-zero boundary.
    ///
    /// The cycle length is clamped to `[1, capacity]`.
    pub fn retune(&mut self, tuning: PathTuning) {
        self.pending = PathTuning {
            cycle_len: tuning.cycle_len.clamp(1, self.capacity()),
            ..tuning
        };
    }

    /// Processes one sample.
    #[inline]
    pub fn tick(&mut self, input: f32, envelope: &Envelope) -> PathFrame {
        if self.head == 0 {
            self.latch();
        }

        let len = self.active.cycle_len;
        let head = self.head;
        let env = envelope.gain(head, len);

        let prev = self.write.get(CycleBuffer::prev_index(head, len));
        let next = self.write.get(CycleBuffer::next_index(head, len));
        let smoothed = bounded((prev + input + next) / 3.0);
        self.write.set(head, smoothed);

        let target = if self.active.direction.is_reverse() {
            CycleBuffer::mirror_index(head, len)
        } else {
            head
        };
        let accumulated = smoothed + self.active.feedback * self.read.get(target);
        self.read.set(target, bounded(accumulated));

        self.head = CycleBuffer::next_index(head, len);
        PathFrame {
            output: self.read.get(self.head),
            mirrored: self.read.get(CycleBuffer::mirror_index(self.head, len)),
            envelope: env,
        }
    }

    /// Applies the pending tuning. Only called at phase zero.
    fn latch(&mut self) {
        let next = self.pending;
        if next.cycle_len != self.active.cycle_len {
            self.write.clear_to(next.cycle_len);
            self.read.clear_to(next.cycle_len);
        }
        self.active = next;
    }

    /// Zeroes both buffers and returns to phase zero with the initial
    /// tuning. The pending tuning is kept and applies on the next sample.
    pub fn reset(&mut self) {
        self.write.clear();
        self.read.clear();
        self.active = PathTuning::INITIAL;
        self.head = 0;
    }

    /// Current head position, `0..cycle_len()`.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Cycle length currently in effect.
    #[inline]
    pub fn cycle_len(&self) -> usize {
        self.active.cycle_len
    }

    /// Tuning currently in effect.
    #[inline]
    pub fn active(&self) -> &PathTuning {
        &self.active
    }

    /// Tuning that applies from the next phase-zero boundary.
    #[inline]
    pub fn pending(&self) -> &PathTuning {
        &self.pending
    }

    /// Live part of the write buffer.
    pub fn write_buffer(&self) -> &[f32] {
        self.write.live(self.active.cycle_len)
    }

    /// Live part of the read buffer.
    pub fn read_buffer(&self) -> &[f32] {
        self.read.live(self.active.cycle_len)
    }
}

/// Non-finite values become 0, the rest are clamped to `±MAX_SAMPLE`.
#[inline]
fn bounded(x: f32) -> f32 {
    flush_denormal(finite_or_zero(x).clamp(-MAX_SAMPLE, MAX_SAMPLE))
}
