//! Host contracts: where a kernel pulls parameters and tempo from.
//!
//! A kernel never owns its parameter values. Once per block it asks a
//! [`ParamSource`] for every id it knows and a [`TempoSource`] for the current
//! tempo. Anything that implements both is a [`Host`].
//!
//! Implementations provided here:
//!
//! | Type | `ParamSource` | `TempoSource` |
//! |------|---------------|---------------|
//! | `&T`, `Arc<T>` | forwards | forwards |
//! | `f64` | | fixed BPM |
//! | `Option<f64>` | | BPM or "unavailable" |
//! | [`NoParams`] | every id missing | |
//! | [`HostContext`] | from `params` | from `tempo` |

use crate::param_info::ParamId;

/// Pull-based parameter lookup.
///
/// Returning `None` means the host has no value for `id`; the kernel then
/// falls back to the parameter's default.
pub trait ParamSource {
    /// Current raw value for `id`.
    fn param(&self, id: ParamId) -> Option<f32>;
}

/// Pull-based tempo lookup.
pub trait TempoSource {
    /// Current host tempo in beats per minute, or `None` when the host
    /// cannot report one.
    fn tempo_bpm(&self) -> Option<f64>;
}

/// Everything a kernel needs from its host.
pub trait Host: ParamSource + TempoSource {}

impl<T: ParamSource + TempoSource + ?Sized> Host for T {}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    #[inline]
    fn param(&self, id: ParamId) -> Option<f32> {
        (**self).param(id)
    }
}

impl<T: TempoSource + ?Sized> TempoSource for &T {
    #[inline]
    fn tempo_bpm(&self) -> Option<f64> {
        (**self).tempo_bpm()
    }
}

#[cfg(feature = "std")]
impl<T: ParamSource + ?Sized> ParamSource for std::sync::Arc<T> {
    #[inline]
    fn param(&self, id: ParamId) -> Option<f32> {
        (**self).param(id)
    }
}

#[cfg(feature = "std")]
impl<T: TempoSource + ?Sized> TempoSource for std::sync::Arc<T> {
    #[inline]
    fn tempo_bpm(&self) -> Option<f64> {
        (**self).tempo_bpm()
    }
}

impl TempoSource for f64 {
    #[inline]
    fn tempo_bpm(&self) -> Option<f64> {
        Some(*self)
    }
}

impl TempoSource for Option<f64> {
    #[inline]
    fn tempo_bpm(&self) -> Option<f64> {
        *self
    }
}

/// Parameter source with no values; every parameter uses its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl ParamSource for NoParams {
    #[inline]
    fn param(&self, _id: ParamId) -> Option<f32> {
        None
    }
}

/// Bundles a parameter source and a tempo source into one [`Host`].
///
/// # Example
///
/// ```rust
/// use tremd_core::{HostContext, NoParams, ParamId, ParamSource, TempoSource};
///
/// let host = HostContext::new(NoParams, 140.0);
/// assert_eq!(host.tempo_bpm(), Some(140.0));
/// assert_eq!(host.param(ParamId(0)), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostContext<P, T> {
    /// Parameter source.
    pub params: P,
    /// Tempo source.
    pub tempo: T,
}

impl<P, T> HostContext<P, T> {
    /// Creates a host from its two halves.
    pub const fn new(params: P, tempo: T) -> Self {
        Self { params, tempo }
    }
}

impl<P: ParamSource, T> ParamSource for HostContext<P, T> {
    #[inline]
    fn param(&self, id: ParamId) -> Option<f32> {
        self.params.param(id)
    }
}

impl<P, T: TempoSource> TempoSource for HostContext<P, T> {
    #[inline]
    fn tempo_bpm(&self) -> Option<f64> {
        self.tempo.tempo_bpm()
    }
}
