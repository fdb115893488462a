//! Final signal combination.
//!
//! ```text
//! tremolo = (1 - mix) · x + env · mix · p
//! wet     = ring_depth · r · r_mirrored
//!         + env  · max(delay_power_scale · p, 0) ^ delay_power
//!         + penv · max(signal_power_scale · s, 0) ^ signal_power
//! out     = (1 - ring_mix) · tremolo + ring_mix · wet
//! ```
//!
//! `p`, `r` and `s` are the primary, ring and power path outputs. The ring
//! product needs the ring path and the signal-power term needs the power
//! path; a missing path drops its term. With neither path the output is
//! `tremolo` alone.

use tremd_core::{finite_or_zero, rectified_power};

use crate::path::PathFrame;
use crate::snapshot::MixParams;

/// Combines one sample's path frames into the output sample.
///
/// # Example
///
/// ```rust
/// use tremd_kernel::{PathFrame, Snapshot, combine};
///
/// let mut mix = Snapshot::default().mix;
/// mix.mix = 0.0;
/// let primary = PathFrame { output: 0.7, mirrored: 0.1, envelope: 1.0 };
/// assert_eq!(combine(0.25, &mix, 0.4, &primary, None, None), 0.25);
/// ```
#[inline]
pub fn combine(
    input: f32,
    mix: &MixParams,
    ring_depth: f32,
    primary: &PathFrame,
    ring: Option<&PathFrame>,
    power: Option<&PathFrame>,
) -> f32 {
    let env = primary.envelope;
    let tremolo = (1.0 - mix.mix) * input + env * mix.mix * primary.output;

    if ring.is_none() && power.is_none() {
        return finite_or_zero(tremolo);
    }

    let mut wet = env
        * rectified_power(primary.output, mix.delay_power_scale, mix.delay_power);
    if let Some(ring) = ring {
        wet += ring_depth * ring.output * ring.mirrored;
    }
    if let Some(power) = power {
        wet += power.envelope
            * rectified_power(power.output, mix.signal_power_scale, mix.signal_power);
    }

    finite_or_zero((1.0 - mix.ring_mix) * tremolo + mix.ring_mix * wet)
}
