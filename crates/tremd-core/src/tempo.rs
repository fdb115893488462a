//! Tempo tracking for tempo-synced cycle lengths.
//!
//! Hosts report tempo in BPM, and not always reliably: the value may be
//! missing, zero, negative, or `NaN` while the transport is stopped or during
//! offline bounces. [`TempoTracker`] keeps the last good tempo and hands out
//! beats per second for cycle-length math.

/// Tempo assumed before the host reports a usable one.
pub const DEFAULT_BPM: f64 = 120.0;

/// Beats per second with a keep-last-good fallback.
///
/// # Example
///
/// ```rust
/// use tremd_core::TempoTracker;
///
/// let mut tempo = TempoTracker::new();
/// assert_eq!(tempo.beats_per_second(), 2.0);
///
/// assert!(tempo.update(Some(90.0)));
/// assert_eq!(tempo.beats_per_second(), 1.5);
///
/// // Unusable readings keep the previous tempo
/// assert!(!tempo.update(Some(0.0)));
/// assert!(!tempo.update(None));
/// assert_eq!(tempo.bpm(), 90.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoTracker {
    bps: f64,
}

impl TempoTracker {
    /// Creates a tracker at [`DEFAULT_BPM`].
    pub const fn new() -> Self {
        Self {
            bps: DEFAULT_BPM / 60.0,
        }
    }

    /// Creates a tracker at a given tempo, falling back to [`DEFAULT_BPM`]
    /// when `bpm` is unusable.
    pub fn with_bpm(bpm: f64) -> Self {
        let mut tracker = Self::new();
        tracker.update(Some(bpm));
        tracker
    }

    /// Feeds a host tempo reading.
    ///
    /// Readings that are `None`, non-finite, or not strictly positive are
    /// ignored. Returns `true` when the stored tempo changed.
    pub fn update(&mut self, bpm: Option<f64>) -> bool {
        match bpm {
            Some(bpm) if bpm.is_finite() && bpm > 0.0 => {
                let bps = bpm / 60.0;
                let changed = bps != self.bps;
                self.bps = bps;
                changed
            }
            _ => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?bpm, bps = self.bps, "host tempo unusable, keeping previous");
                false
            }
        }
    }

    /// Current tempo in beats per second (always finite and positive).
    #[inline]
    pub fn beats_per_second(&self) -> f64 {
        self.bps
    }

    /// Current tempo in beats per minute.
    #[inline]
    pub fn bpm(&self) -> f64 {
        self.bps * 60.0
    }

    /// Samples per beat at `sample_rate`.
    #[inline]
    pub fn samples_per_beat(&self, sample_rate: f64) -> f64 {
        sample_rate / self.bps
    }
}

impl Default for TempoTracker {
    fn default() -> Self {
        Self::new()
    }
}
