//! Tempo-synchronized cycle lengths.
//!
//! A path's cycle spans `length` beats divided by `signature · speed`:
//!
//! ```text
//! cycle = round(sample_rate · length / (bps · signature · speed))
//! ```
//!
//! The result is clamped to `[1, capacity]` so it always fits the
//! preallocated buffers.

use libm::round;

use crate::snapshot::PathParams;

/// Unclamped cycle length in samples.
///
/// `bps`, `signature` and `speed` are positive for every sanitized
/// snapshot, so the result is finite unless the tempo is vanishingly small.
#[inline]
pub fn ideal_cycle_length(
    sample_rate: f64,
    length: f64,
    bps: f64,
    signature: f64,
    speed: f64,
) -> f64 {
    sample_rate * length / (bps * signature * speed)
}

/// Rounds and clamps an ideal length to `[1, capacity]`.
#[inline]
pub fn clamp_cycle_length(ideal: f64, capacity: usize) -> usize {
    let rounded = round(ideal);
    if rounded.is_nan() || rounded < 1.0 {
        1
    } else if rounded >= capacity as f64 {
        capacity.max(1)
    } else {
        rounded as usize
    }
}

/// Cycle length in samples for a path.
///
/// # Example
///
/// ```rust
/// use tremd_kernel::{Snapshot, cycle_length};
///
/// let mut params = Snapshot::default().primary;
/// params.length = 8.0;
/// params.signature = 1.0;
/// params.speed = 1.0;
///
/// // 44.1 kHz at 120 BPM (2 beats per second)
/// assert_eq!(cycle_length(44100.0, &params, 2.0, 512 * 512), 176_400);
/// ```
#[inline]
pub fn cycle_length(sample_rate: f64, params: &PathParams, bps: f64, capacity: usize) -> usize {
    let ideal = ideal_cycle_length(
        sample_rate,
        f64::from(params.length),
        bps,
        f64::from(params.signature),
        f64::from(params.speed),
    );
    clamp_cycle_length(ideal, capacity)
}
