//! Per-block parameter snapshots.
//!
//! At the top of every block the kernel captures one [`Snapshot`] from its
//! host and diffs it against the previous one. The [`SnapshotDiff`] tells the
//! kernel which paths need their pending cycle length recomputed; nothing is
//! re-derived for groups that did not change.

use tremd_core::ParamSource;

use crate::envelope::Envelope;
use crate::params::{Direction, Param, PathKind};

/// Sanitized parameters of one delay path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParams {
    /// Cycle length in beats.
    pub length: f32,
    /// Beat divisor.
    pub signature: f32,
    /// Speed multiplier.
    pub speed: f32,
    /// Feedback depth, `0..=1`.
    pub depth: f32,
    /// Buffer direction.
    pub direction: Direction,
}

impl PathParams {
    /// Reads the parameters of path `kind` from `source`.
    pub fn capture<S: ParamSource + ?Sized>(kind: PathKind, source: &S) -> Self {
        let set = kind.params();
        Self {
            length: set.length.read(source),
            signature: set.signature.read(source),
            speed: set.speed.read(source),
            depth: set.depth.read(source),
            direction: Direction::from_value(set.direction.read(source)),
        }
    }
}

/// Sanitized combiner parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixParams {
    /// Dry/wet blend of the primary path.
    pub mix: f32,
    /// Primary power-curve exponent.
    pub delay_power: f32,
    /// Primary power-curve input gain.
    pub delay_power_scale: f32,
    /// Tremolo bus vs. ring/power bus.
    pub ring_mix: f32,
    /// Power-path curve exponent.
    pub signal_power: f32,
    /// Power-path curve input gain.
    pub signal_power_scale: f32,
}

impl MixParams {
    /// Reads the combiner parameters from `source`.
    pub fn capture<S: ParamSource + ?Sized>(source: &S) -> Self {
        Self {
            mix: Param::Mix.read(source),
            delay_power: Param::DelayPower.read(source),
            delay_power_scale: Param::DelayPowerScale.read(source),
            ring_mix: Param::RingMix.read(source),
            signal_power: Param::SignalPower.read(source),
            signal_power_scale: Param::SignalPowerScale.read(source),
        }
    }
}

/// Every parameter the kernel uses, captured once per block.
///
/// # Example
///
/// ```rust
/// use tremd_core::NoParams;
/// use tremd_kernel::Snapshot;
///
/// let a = Snapshot::capture(&NoParams);
/// assert_eq!(a, Snapshot::default());
/// assert!(a.diff(&a).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Primary path parameters.
    pub primary: PathParams,
    /// Ring path parameters.
    pub ring: PathParams,
    /// Power path parameters.
    pub power: PathParams,
    /// Combiner parameters.
    pub mix: MixParams,
    /// Envelope parameters.
    pub envelope: Envelope,
}

impl Snapshot {
    /// Captures all parameters from `source`.
    pub fn capture<S: ParamSource + ?Sized>(source: &S) -> Self {
        Self {
            primary: PathParams::capture(PathKind::Primary, source),
            ring: PathParams::capture(PathKind::Ring, source),
            power: PathParams::capture(PathKind::Power, source),
            mix: MixParams::capture(source),
            envelope: Envelope::capture(source),
        }
    }

    /// Parameters of path `kind`.
    #[inline]
    pub fn path(&self, kind: PathKind) -> &PathParams {
        match kind {
            PathKind::Primary => &self.primary,
            PathKind::Ring => &self.ring,
            PathKind::Power => &self.power,
        }
    }

    /// Which delay paths need retuning to go from `self` to `next`.
    ///
    /// Combiner and envelope values apply from the next sample on and never
    /// need a retune, so they are not tracked.
    pub fn diff(&self, next: &Snapshot) -> SnapshotDiff {
        SnapshotDiff {
            primary: self.primary != next.primary,
            ring: self.ring != next.ring,
            power: self.power != next.power,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::capture(&tremd_core::NoParams)
    }
}

/// Delay paths whose parameters changed between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Primary path parameters changed.
    pub primary: bool,
    /// Ring path parameters changed.
    pub ring: bool,
    /// Power path parameters changed.
    pub power: bool,
}

impl SnapshotDiff {
    /// Every group marked as changed.
    pub const ALL: Self = Self {
        primary: true,
        ring: true,
        power: true,
    };

    /// `true` when nothing changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether path `kind` changed.
    #[inline]
    pub fn path(&self, kind: PathKind) -> bool {
        match kind {
            PathKind::Primary => self.primary,
            PathKind::Ring => self.ring,
            PathKind::Power => self.power,
        }
    }
}
