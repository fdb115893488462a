//! Cycle-phase amplitude envelope.
//!
//! Each delay path scales its wet contribution by an envelope that depends
//! only on where its head sits inside the current cycle:
//!
//! ```text
//! shaped = clamp(FADE_SCALE / fade * sin(π · head / len), 0, 1)   (1 when fade == 0)
//! env    = shaped + (1 - shaped) * duck / DUCK_MAX
//! ```
//!
//! The envelope is zero at the cycle boundary, where a length change may
//! zero the buffers, and rises to one within the first part of the cycle.
//! Larger `fade` values lengthen the ramps; `duck` flattens the whole shape
//! toward unity.

use tremd_core::{ParamSource, half_sine};

use crate::params::Param;

/// Ramp steepness numerator. `fade = 2` gives a `6 · sin` ramp.
pub const FADE_SCALE: f32 = 12.0;

/// Duck value that fully flattens the envelope.
pub const DUCK_MAX: f32 = 10.0;

/// Envelope settings for one block.
///
/// # Example
///
/// ```rust
/// use tremd_kernel::Envelope;
///
/// let env = Envelope { fade: 2.0, duck: 0.0 };
/// assert_eq!(env.gain(0, 100), 0.0);
/// assert_eq!(env.gain(50, 100), 1.0);
///
/// let flat = Envelope { fade: 2.0, duck: 10.0 };
/// assert_eq!(flat.gain(0, 100), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Fade amount, `0..=10`. Zero disables fading.
    pub fade: f32,
    /// Duck amount, `0..=10`.
    pub duck: f32,
}

impl Envelope {
    /// Reads fade and duck from `source`.
    pub fn capture<S: ParamSource + ?Sized>(source: &S) -> Self {
        Self {
            fade: Param::Fade.read(source),
            duck: Param::Duck.read(source),
        }
    }

    /// Envelope value at `head` in a cycle of `len` samples, in `[0, 1]`.
    ///
    /// `len` must be non-zero.
    #[inline]
    pub fn gain(&self, head: usize, len: usize) -> f32 {
        let shaped = if self.fade <= 0.0 {
            1.0
        } else {
            (FADE_SCALE / self.fade * half_sine(head, len)).clamp(0.0, 1.0)
        };
        let flatten = (self.duck / DUCK_MAX).clamp(0.0, 1.0);
        (shaped + (1.0 - shaped) * flatten).min(1.0)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            fade: Param::Fade.descriptor().default,
            duck: Param::Duck.descriptor().default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_fade_is_unity() {
        let env = Envelope {
            fade: 0.0,
            duck: 0.0,
        };
        for head in 0..16 {
            assert_eq!(env.gain(head, 16), 1.0);
        }
    }

    #[test]
    fn test_default_matches_six_sine() {
        let env = Envelope::default();
        let len = 1000;
        for head in 0..len {
            let expected = (6.0 * half_sine(head, len)).clamp(0.0, 1.0);
            assert!((env.gain(head, len) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_larger_fade_is_slower() {
        let short = Envelope {
            fade: 1.0,
            duck: 0.0,
        };
        let long = Envelope {
            fade: 10.0,
            duck: 0.0,
        };
        assert!(long.gain(20, 1000) < short.gain(20, 1000));
        assert_eq!(long.gain(500, 1000), 1.0);
    }

    #[test]
    fn test_duck_flattens() {
        let half = Envelope {
            fade: 2.0,
            duck: 5.0,
        };
        assert!((half.gain(0, 100) - 0.5).abs() < 1e-6);
        let full = Envelope {
            fade: 10.0,
            duck: 10.0,
        };
        for head in 0..100 {
            assert!((full.gain(head, 100) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gain_bounded() {
        for fade in [0.0, 0.01, 1.0, 5.0, 10.0] {
            for duck in [0.0, 3.0, 10.0] {
                let env = Envelope { fade, duck };
                for head in 0..64 {
                    let g = env.gain(head, 64);
                    assert!((0.0..=1.0).contains(&g), "fade={fade} duck={duck} g={g}");
                }
            }
        }
    }

    #[test]
    fn test_single_sample_cycle() {
        let env = Envelope::default();
        assert_eq!(env.gain(0, 1), 0.0);
    }
}
