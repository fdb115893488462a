//! Kernel construction settings and their validation.

use crate::cycle::ideal_cycle_length;
use crate::params::Param;

/// Default per-buffer capacity in samples (512 · 512).
pub const DEFAULT_CAPACITY: usize = 512 * 512;

/// Which optional paths a kernel allocates and mixes in.
///
/// The primary path always exists. Without the ring path the ring product
/// term is skipped; without the power path the signal-power term is skipped.
/// With neither, the kernel is a plain tremolo/delay and the ring mix is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathLayout {
    /// Allocate and mix the ring path.
    pub ring: bool,
    /// Allocate and mix the signal-power path.
    pub power: bool,
}

impl PathLayout {
    /// Primary path only.
    pub const TREMOLO: Self = Self {
        ring: false,
        power: false,
    };
    /// Primary and ring paths.
    pub const RING: Self = Self {
        ring: true,
        power: false,
    };
    /// All three paths.
    pub const FULL: Self = Self {
        ring: true,
        power: true,
    };
}

impl Default for PathLayout {
    fn default() -> Self {
        Self::FULL
    }
}

/// Errors from [`KernelConfig::validate`] and [`KernelConfig::check_capacity`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Sample rate is not a positive finite number.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// Buffer capacity of zero.
    #[error("buffer capacity must be at least one sample")]
    ZeroCapacity,

    /// The longest reachable cycle would be clamped at this tempo.
    #[error(
        "longest cycle needs {required} samples at {bpm} BPM but buffers hold {capacity}"
    )]
    CapacityTooSmall {
        /// Samples needed for the longest cycle.
        required: usize,
        /// Configured capacity.
        capacity: usize,
        /// Tempo the check was run at.
        bpm: f64,
    },
}

/// Kernel construction settings.
///
/// # Example
///
/// ```rust
/// use tremd_kernel::{KernelConfig, PathLayout};
///
/// let config = KernelConfig::new(48000.0).with_layout(PathLayout::RING);
/// assert!(config.validate().is_ok());
/// assert!(KernelConfig::new(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Sample rate in Hz, fixed for the kernel's lifetime.
    pub sample_rate: f32,
    /// Samples per delay buffer.
    pub capacity: usize,
    /// Optional paths.
    pub layout: PathLayout,
}

impl KernelConfig {
    /// Full layout with [`DEFAULT_CAPACITY`] at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            capacity: DEFAULT_CAPACITY,
            layout: PathLayout::FULL,
        }
    }

    /// Sets the buffer capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the path layout.
    pub fn with_layout(mut self, layout: PathLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Checks the settings a kernel cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Longest cycle, in samples, any parameter setting can ask for at `bpm`.
    pub fn longest_cycle(&self, bpm: f64) -> f64 {
        let length = Param::Length.descriptor().max;
        let signature = Param::Signature.descriptor().min;
        let speed = Param::Speed.descriptor().min;
        ideal_cycle_length(
            f64::from(self.sample_rate),
            f64::from(length),
            bpm / 60.0,
            f64::from(signature),
            f64::from(speed),
        )
    }

    /// Whether every reachable cycle fits the buffers at `bpm`.
    pub fn covers(&self, bpm: f64) -> bool {
        self.check_capacity(bpm).is_ok()
    }

    /// Advisory check that the buffers hold the longest cycle at `bpm`.
    ///
    /// Kernels clamp oversized cycles, so a failure here is a warning for
    /// the host, not a reason to refuse construction.
    pub fn check_capacity(&self, bpm: f64) -> Result<(), ConfigError> {
        let required = libm::ceil(self.longest_cycle(bpm));
        if required > self.capacity as f64 {
            return Err(ConfigError::CapacityTooSmall {
                required: if required.is_finite() {
                    required as usize
                } else {
                    usize::MAX
                },
                capacity: self.capacity,
                bpm,
            });
        }
        Ok(())
    }
}
