//! Block-processing effect trait.
//!
//! The [`Effect`] trait is the contract between a host callback and a
//! per-channel effect kernel. Every call hands over one block of mono samples
//! together with the host's silence hint.
//!
//! ## Design Decisions
//!
//! - **Block granularity**: Parameters and tempo are sampled once per block,
//!   so the trait exposes block methods only. Per-sample state lives inside
//!   the implementor.
//!
//! - **Silence hint**: When the host flags a block as silent the effect must
//!   leave the output untouched and must not advance any internal state.
//!
//! - **Object-safe**: `dyn Effect` works for hosts that pick a kernel layout
//!   at runtime.
//!
//! - **No allocations**: All methods are callable from a real-time audio
//!   thread.

/// Core trait for block-based mono effects.
///
/// # Example
///
/// ```rust
/// use tremd_core::Effect;
///
/// struct Gain {
///     gain: f32,
///     sample_rate: f32,
/// }
///
/// impl Effect for Gain {
///     fn process_block(&mut self, input: &[f32], output: &mut [f32], silent: bool) {
///         if silent {
///             return;
///         }
///         for (out, &inp) in output.iter_mut().zip(input) {
///             *out = inp * self.gain;
///         }
///     }
///
///     fn process_block_inplace(&mut self, buffer: &mut [f32], silent: bool) {
///         if silent {
///             return;
///         }
///         for sample in buffer.iter_mut() {
///             *sample *= self.gain;
///         }
///     }
///
///     fn reset(&mut self) {}
///
///     fn sample_rate(&self) -> f32 {
///         self.sample_rate
///     }
/// }
///
/// let mut gain = Gain { gain: 0.5, sample_rate: 48000.0 };
/// let mut out = [0.0; 2];
/// gain.process_block(&[1.0, -1.0], &mut out, false);
/// assert_eq!(out, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process one block of samples.
    ///
    /// Processes `min(input.len(), output.len())` samples. When `silent` is
    /// true the call is a no-op: `output` keeps whatever the host left in it.
    ///
    /// # Arguments
    /// * `input` - Input sample buffer
    /// * `output` - Output sample buffer (same length as input)
    /// * `silent` - Host hint that the input block is silence
    fn process_block(&mut self, input: &[f32], output: &mut [f32], silent: bool);

    /// Process one block of samples in place.
    ///
    /// Same contract as [`process_block`](Self::process_block) with a shared
    /// buffer.
    fn process_block_inplace(&mut self, buffer: &mut [f32], silent: bool);

    /// Reset internal state.
    ///
    /// Clears buffers and positions without touching parameters. Called when
    /// the host transport stops or starts. Must be idempotent.
    fn reset(&mut self);

    /// Sample rate fixed at construction, in Hz.
    fn sample_rate(&self) -> f32;

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }

    /// Report how many samples of output remain after the input stops.
    ///
    /// Hosts use this to keep feeding silence until feedback decays.
    /// Default returns 0 (no tail).
    fn tail_samples(&self) -> usize {
        0
    }
}
