//! Parameter introspection for host-facing parameter tables.
//!
//! This module provides the [`ParameterInfo`] trait and the [`ParamDescriptor`]
//! metadata record. Descriptors are `const`-constructible so an effect can keep
//! its whole parameter table in a `static` and never allocate to describe it.
//!
//! # Design
//!
//! Parameters are addressed two ways:
//!
//! - **Index** (`0..param_count()`) for table walks in UIs and CLIs.
//! - [`ParamId`] for host automation. Ids are stable across versions.
//!
//! Each descriptor also carries a `string_id` (`"ring_depth"`), display unit,
//! [`ParamFlags`], a group name, and optional step labels for enumerated
//! values such as a direction switch.
//!
//! # Example
//!
//! ```rust
//! use tremd_core::{ParamDescriptor, ParamFlags, ParamId, ParamUnit};
//!
//! static DIRECTION: ParamDescriptor = ParamDescriptor::new("Direction", "Dir", 0.0, 1.0, 0.0)
//!     .with_id(ParamId(4), "direction")
//!     .with_step(1.0)
//!     .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
//!     .with_step_labels(&["Forward", "Reverse"]);
//!
//! assert_eq!(DIRECTION.sanitize(0.7), 1.0);
//! assert_eq!(DIRECTION.step_label(1.0), Some("Reverse"));
//! assert_eq!(DIRECTION.unit, ParamUnit::None);
//! ```

#[cfg(feature = "std")]
extern crate std as alloc;

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(any(feature = "std", test))]
use alloc::{format, string::String};

use libm::roundf;

/// Stable numeric parameter identifier.
///
/// Ids are assigned once and never reused, so automation recorded against
/// one version of an effect plays back on the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// # Example
///
/// ```rust
/// use tremd_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete integer steps.
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for effects or parameter stores that expose introspectable
/// parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the implementor. Implementations clamp on [`set_param`](Self::set_param)
/// and ignore out-of-range indices.
pub trait ParameterInfo {
    /// Returns the number of parameters.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None` when
    /// `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index`.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches [`ParamDescriptor::name`], [`ParamDescriptor::short_name`]
    /// and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Returns the stable [`ParamId`] for the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// # Step Size
///
/// `step` is the recommended encoder increment. Stepped parameters (see
/// [`ParamFlags::STEPPED`]) use `1.0` and are rounded to whole numbers by
/// [`sanitize`](Self::sanitize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value used when the host has not supplied one.
    pub default: f32,
    /// Recommended step increment.
    pub step: f32,
    /// Stable numeric id. `ParamId(0)` until assigned with [`with_id`](Self::with_id).
    pub id: ParamId,
    /// Human-readable stable id (`"signal_power_depth"`).
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Parameter group for host tree display. Empty means top-level.
    pub group: &'static str,
    /// Display labels for stepped values, indexed from `min`.
    pub step_labels: &'static [&'static str],
}

impl ParamDescriptor {
    /// Creates a continuous, automatable parameter with no unit.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            step_labels: &[],
        }
    }

    /// Sets the stable numeric and string ids.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the recommended step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the capability flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Sets labels for stepped values (`labels[0]` names `min`).
    pub const fn with_step_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.step_labels = labels;
        self
    }

    /// Returns `true` for integer-coded parameters.
    #[inline]
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to the valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tremd_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::new("Fade", "Fade", 0.0, 10.0, 2.0);
    /// assert_eq!(desc.clamp(5.0), 5.0);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(11.0), 10.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Turns an arbitrary host value into a usable one.
    ///
    /// `NaN` maps to the default, everything else is clamped (infinities land
    /// on the bounds) and stepped parameters are rounded to the nearest
    /// integer. Never rejects a value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tremd_core::{ParamDescriptor, ParamFlags};
    ///
    /// let length = ParamDescriptor::new("Length", "Length", 1.0, 32.0, 4.0)
    ///     .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED));
    /// assert_eq!(length.sanitize(f32::NAN), 4.0);
    /// assert_eq!(length.sanitize(7.6), 8.0);
    /// assert_eq!(length.sanitize(f32::INFINITY), 32.0);
    /// ```
    #[inline]
    pub fn sanitize(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = self.clamp(value);
        if self.is_stepped() {
            self.clamp(roundf(clamped))
        } else {
            clamped
        }
    }

    /// Converts a normalized value in `[0, 1]` back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Returns the label for a stepped value, if one was assigned.
    pub fn step_label(&self, value: f32) -> Option<&'static str> {
        if self.step_labels.is_empty() || value.is_nan() {
            return None;
        }
        let index = roundf(self.clamp(value) - self.min) as usize;
        self.step_labels.get(index).copied()
    }

    /// Formats a value with its unit or step label.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tremd_core::{ParamDescriptor, ParamUnit};
    ///
    /// let mix = ParamDescriptor::new("Mix", "Mix", 0.0, 1.0, 0.5)
    ///     .with_unit(ParamUnit::Fraction);
    /// assert_eq!(mix.format_value(0.25), "25%");
    /// ```
    #[cfg(any(feature = "std", test))]
    pub fn format_value(&self, value: f32) -> String {
        if let Some(label) = self.step_label(value) {
            return String::from(label);
        }
        match self.unit {
            ParamUnit::Fraction => format!("{:.0}%", value * 100.0),
            ParamUnit::Beats | ParamUnit::Divisor if self.is_stepped() => {
                format!("{:.0}{}", value, self.unit.suffix())
            }
            _ => format!("{:.2}{}", value, self.unit.suffix()),
        }
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Musical beats (cycle length numerator).
    Beats,
    /// Divides the beat (signature, speed).
    Divisor,
    /// Fraction in `[0, 1]`, displayed as a percentage.
    Fraction,
    /// Gain multiplier applied before a shaping curve.
    Multiplier,
    /// Curve exponent.
    Exponent,
    /// No unit.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tremd_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Beats.suffix(), " beats");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Beats => " beats",
            ParamUnit::Divisor => "",
            ParamUnit::Fraction => "%",
            ParamUnit::Multiplier => "x",
            ParamUnit::Exponent => "^",
            ParamUnit::None => "",
        }
    }
}
