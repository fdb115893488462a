//! Lock-free parameter storage shared between a control thread and the
//! audio thread.
//!
//! Values are stored as `f32` bit patterns in `AtomicU32`s. Writers use
//! `Release`, the kernel reads with `Acquire` once per block. No locks, no
//! allocation, safe to share behind an `Arc` or a `&'static`.

use core::sync::atomic::{AtomicU32, Ordering};

use tremd_core::{ParamDescriptor, ParamId, ParamSource, ParameterInfo};

use crate::params::{PARAM_COUNT, PARAMS, Param};

/// Atomic store of every kernel parameter.
///
/// Values set through [`set`](Self::set) or [`ParameterInfo::set_param`] are
/// sanitized on the way in. [`set_raw`](Self::set_raw) stores host values
/// verbatim; the kernel sanitizes them when it reads the block snapshot.
///
/// # Example
///
/// ```rust
/// use tremd_kernel::{Param, ParamBank};
///
/// let bank = ParamBank::new();
/// assert_eq!(bank.get(Param::Length), 4.0);
///
/// bank.set(Param::Length, 100.0);
/// assert_eq!(bank.get(Param::Length), 32.0);
/// ```
#[derive(Debug)]
pub struct ParamBank {
    values: [AtomicU32; PARAM_COUNT],
}

impl ParamBank {
    /// Creates a bank holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(PARAMS[i].default.to_bits())),
        }
    }

    /// Current value of `param` (lock-free).
    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Acquire))
    }

    /// Sanitizes and stores `value` (lock-free).
    #[inline]
    pub fn set(&self, param: Param, value: f32) {
        let value = param.descriptor().sanitize(value);
        self.values[param.index()].store(value.to_bits(), Ordering::Release);
    }

    /// Stores `value` unmodified (lock-free).
    #[inline]
    pub fn set_raw(&self, param: Param, value: f32) {
        self.values[param.index()].store(value.to_bits(), Ordering::Release);
    }

    /// Stores a normalized `[0, 1]` value, mapped through the descriptor.
    pub fn set_normalized(&self, param: Param, normalized: f32) {
        self.set(param, param.descriptor().denormalize(normalized));
    }

    /// Restores every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for param in Param::ALL {
            self.set_raw(param, param.descriptor().default);
        }
    }
}

impl Default for ParamBank {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ParamBank {
    fn clone(&self) -> Self {
        let bank = Self::new();
        for param in Param::ALL {
            bank.set_raw(param, self.get(param));
        }
        bank
    }
}

impl ParamSource for ParamBank {
    #[inline]
    fn param(&self, id: ParamId) -> Option<f32> {
        Param::from_id(id).map(|param| self.get(param))
    }
}

impl ParameterInfo for ParamBank {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        Param::ALL.get(index).map_or(0.0, |&param| self.get(param))
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(&param) = Param::ALL.get(index) {
            self.set(param, value);
        }
    }
}
