//! The kernel's parameter table.
//!
//! Every parameter has a stable id (its [`Param`] discriminant), a `string_id`
//! used by hosts and the CLI, and a `const` [`ParamDescriptor`] in [`PARAMS`].
//!
//! | Id | Parameter | Range | Default | Group |
//! |----|-----------|-------|---------|-------|
//! | 0 | Length | 1–32 beats | 4 | primary |
//! | 1 | Signature | 1–5 | 4 | primary |
//! | 2 | Speed | 1–4 | 1 | primary |
//! | 3 | Depth | 0–1 | 0.4 | primary |
//! | 4 | Direction | Forward/Reverse | Forward | primary |
//! | 5 | Mix | 0–1 | 0.5 | output |
//! | 6 | Delay Power | 1–5 | 1 | output |
//! | 7 | Delay Power Scale | 0–5 | 1 | output |
//! | 8 | Ring Mix | 0–1 | 0 | ring |
//! | 9 | Ring | 1–32 beats | 4 | ring |
//! | 10 | Ring Signature | 1–5 | 4 | ring |
//! | 11 | Ring Speed | 1–4 | 1 | ring |
//! | 12 | Ring Depth | 0–1 | 0.4 | ring |
//! | 13 | Ring Direction | Forward/Reverse | Forward | ring |
//! | 14 | Signal Power | 1–5 | 2 | power |
//! | 15 | Signal Power Scale | 0–5 | 1 | power |
//! | 16 | Signal Power Length | 1–32 beats | 4 | power |
//! | 17 | Signal Power Signature | 1–5 | 4 | power |
//! | 18 | Signal Power Speed | 1–4 | 1 | power |
//! | 19 | Signal Power Depth | 0–1 | 0.4 | power |
//! | 20 | Signal Power Direction | Forward/Reverse | Forward | power |
//! | 21 | Fade | 0–10 | 2 | envelope |
//! | 22 | Duck | 0–10 | 0 | envelope |
//!
//! Reading goes through [`Param::read`], which never fails: missing values
//! fall back to the default and everything else is sanitized.

use tremd_core::{ParamDescriptor, ParamFlags, ParamId, ParamSource, ParamUnit};

/// Number of kernel parameters.
pub const PARAM_COUNT: usize = 23;

/// Kernel parameters. The discriminant is the stable [`ParamId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Param {
    /// Primary cycle length in beats.
    Length = 0,
    /// Primary beat divisor.
    Signature = 1,
    /// Primary speed multiplier.
    Speed = 2,
    /// Primary feedback depth.
    Depth = 3,
    /// Primary buffer direction.
    Direction = 4,
    /// Dry/wet blend of the primary path.
    Mix = 5,
    /// Exponent of the primary power term.
    DelayPower = 6,
    /// Gain applied to the primary signal before its power curve.
    DelayPowerScale = 7,
    /// Blend between the tremolo bus and the ring/power bus.
    RingMix = 8,
    /// Ring cycle length in beats.
    Ring = 9,
    /// Ring beat divisor.
    RingSignature = 10,
    /// Ring speed multiplier.
    RingSpeed = 11,
    /// Ring feedback depth and ring product gain.
    RingDepth = 12,
    /// Ring buffer direction.
    RingDirection = 13,
    /// Exponent of the signal-power term.
    SignalPower = 14,
    /// Gain applied to the power path before its power curve.
    SignalPowerScale = 15,
    /// Power-path cycle length in beats.
    SignalPowerLength = 16,
    /// Power-path beat divisor.
    SignalPowerSignature = 17,
    /// Power-path speed multiplier.
    SignalPowerSpeed = 18,
    /// Power-path feedback depth.
    SignalPowerDepth = 19,
    /// Power-path buffer direction.
    SignalPowerDirection = 20,
    /// Envelope fade amount; larger values lengthen the fade-in/out.
    Fade = 21,
    /// Envelope duck amount; flattens the envelope toward unity.
    Duck = 22,
}

impl Param {
    /// All parameters in id order.
    pub const ALL: [Param; PARAM_COUNT] = [
        Param::Length,
        Param::Signature,
        Param::Speed,
        Param::Depth,
        Param::Direction,
        Param::Mix,
        Param::DelayPower,
        Param::DelayPowerScale,
        Param::RingMix,
        Param::Ring,
        Param::RingSignature,
        Param::RingSpeed,
        Param::RingDepth,
        Param::RingDirection,
        Param::SignalPower,
        Param::SignalPowerScale,
        Param::SignalPowerLength,
        Param::SignalPowerSignature,
        Param::SignalPowerSpeed,
        Param::SignalPowerDepth,
        Param::SignalPowerDirection,
        Param::Fade,
        Param::Duck,
    ];

    /// Stable host id.
    #[inline]
    pub const fn id(self) -> ParamId {
        ParamId(self as u32)
    }

    /// Position in [`PARAMS`] and [`Param::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks a parameter up by host id.
    pub fn from_id(id: ParamId) -> Option<Self> {
        Self::ALL.get(id.0 as usize).copied()
    }

    /// Static descriptor.
    #[inline]
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &PARAMS[self.index()]
    }

    /// Reads and sanitizes this parameter from `source`.
    ///
    /// Missing or `NaN` values give the default; out-of-range values are
    /// clamped; stepped values are rounded.
    #[inline]
    pub fn read<S: ParamSource + ?Sized>(self, source: &S) -> f32 {
        let desc = self.descriptor();
        source
            .param(self.id())
            .map_or(desc.default, |raw| desc.sanitize(raw))
    }
}

/// Read/write order of a delay path's buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Writes land at the head.
    #[default]
    Forward,
    /// Writes land at the head mirrored about zero.
    Reverse,
}

impl Direction {
    /// Decodes a direction parameter value (`0` forward, `1` reverse).
    #[inline]
    pub fn from_value(value: f32) -> Self {
        if value >= 0.5 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Returns `true` for [`Direction::Reverse`].
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }
}

/// The three delay paths of a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// Tremolo/delay path, always present.
    Primary,
    /// Ring-modulation path.
    Ring,
    /// Signal-power path.
    Power,
}

/// Parameters that drive one delay path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParamSet {
    /// Cycle length in beats.
    pub length: Param,
    /// Beat divisor.
    pub signature: Param,
    /// Speed multiplier.
    pub speed: Param,
    /// Feedback depth.
    pub depth: Param,
    /// Buffer direction.
    pub direction: Param,
}

impl PathKind {
    /// All path kinds, primary first.
    pub const ALL: [PathKind; 3] = [PathKind::Primary, PathKind::Ring, PathKind::Power];

    /// The parameters this path reads. Paths never share parameters.
    pub const fn params(self) -> PathParamSet {
        match self {
            PathKind::Primary => PathParamSet {
                length: Param::Length,
                signature: Param::Signature,
                speed: Param::Speed,
                depth: Param::Depth,
                direction: Param::Direction,
            },
            PathKind::Ring => PathParamSet {
                length: Param::Ring,
                signature: Param::RingSignature,
                speed: Param::RingSpeed,
                depth: Param::RingDepth,
                direction: Param::RingDirection,
            },
            PathKind::Power => PathParamSet {
                length: Param::SignalPowerLength,
                signature: Param::SignalPowerSignature,
                speed: Param::SignalPowerSpeed,
                depth: Param::SignalPowerDepth,
                direction: Param::SignalPowerDirection,
            },
        }
    }

    /// Short name for logs and CLI output.
    pub const fn name(self) -> &'static str {
        match self {
            PathKind::Primary => "primary",
            PathKind::Ring => "ring",
            PathKind::Power => "power",
        }
    }
}

const STEPPED: ParamFlags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
const DIRECTION_LABELS: &[&str] = &["Forward", "Reverse"];

const fn length(
    name: &'static str,
    short: &'static str,
    param: Param,
    string_id: &'static str,
    group: &'static str,
) -> ParamDescriptor {
    ParamDescriptor::new(name, short, 1.0, 32.0, 4.0)
        .with_id(param.id(), string_id)
        .with_unit(ParamUnit::Beats)
        .with_step(1.0)
        .with_flags(STEPPED)
        .with_group(group)
}

const fn divisor(
    name: &'static str,
    short: &'static str,
    param: Param,
    string_id: &'static str,
    group: &'static str,
    max: f32,
    default: f32,
) -> ParamDescriptor {
    ParamDescriptor::new(name, short, 1.0, max, default)
        .with_id(param.id(), string_id)
        .with_unit(ParamUnit::Divisor)
        .with_step(1.0)
        .with_flags(STEPPED)
        .with_group(group)
}

const fn fraction(
    name: &'static str,
    short: &'static str,
    param: Param,
    string_id: &'static str,
    group: &'static str,
    default: f32,
) -> ParamDescriptor {
    ParamDescriptor::new(name, short, 0.0, 1.0, default)
        .with_id(param.id(), string_id)
        .with_unit(ParamUnit::Fraction)
        .with_group(group)
}

const fn direction(
    name: &'static str,
    short: &'static str,
    param: Param,
    string_id: &'static str,
    group: &'static str,
) -> ParamDescriptor {
    ParamDescriptor::new(name, short, 0.0, 1.0, 0.0)
        .with_id(param.id(), string_id)
        .with_step(1.0)
        .with_flags(STEPPED)
        .with_group(group)
        .with_step_labels(DIRECTION_LABELS)
}

#[allow(clippy::too_many_arguments)]
const fn shaping(
    name: &'static str,
    short: &'static str,
    param: Param,
    string_id: &'static str,
    group: &'static str,
    unit: ParamUnit,
    min: f32,
    default: f32,
) -> ParamDescriptor {
    ParamDescriptor::new(name, short, min, 5.0, default)
        .with_id(param.id(), string_id)
        .with_unit(unit)
        .with_group(group)
}

/// Descriptor table, indexed by [`Param::index`].
pub static PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    length("Length", "Length", Param::Length, "length", "primary"),
    divisor("Signature", "Sig", Param::Signature, "signature", "primary", 5.0, 4.0),
    divisor("Speed", "Speed", Param::Speed, "speed", "primary", 4.0, 1.0),
    fraction("Depth", "Depth", Param::Depth, "depth", "primary", 0.4),
    direction("Direction", "Dir", Param::Direction, "direction", "primary"),
    fraction("Mix", "Mix", Param::Mix, "mix", "output", 0.5),
    shaping(
        "Delay Power",
        "DlyPow",
        Param::DelayPower,
        "delay_power",
        "output",
        ParamUnit::Exponent,
        1.0,
        1.0,
    ),
    shaping(
        "Delay Power Scale",
        "DlyScl",
        Param::DelayPowerScale,
        "delay_power_scale",
        "output",
        ParamUnit::Multiplier,
        0.0,
        1.0,
    ),
    fraction("Ring Mix", "RngMix", Param::RingMix, "ring_mix", "ring", 0.0),
    length("Ring", "Ring", Param::Ring, "ring", "ring"),
    divisor(
        "Ring Signature",
        "RngSig",
        Param::RingSignature,
        "ring_signature",
        "ring",
        5.0,
        4.0,
    ),
    divisor(
        "Ring Speed",
        "RngSpd",
        Param::RingSpeed,
        "ring_speed",
        "ring",
        4.0,
        1.0,
    ),
    fraction(
        "Ring Depth",
        "RngDpth",
        Param::RingDepth,
        "ring_depth",
        "ring",
        0.4,
    ),
    direction(
        "Ring Direction",
        "RngDir",
        Param::RingDirection,
        "ring_direction",
        "ring",
    ),
    shaping(
        "Signal Power",
        "SigPow",
        Param::SignalPower,
        "signal_power",
        "power",
        ParamUnit::Exponent,
        1.0,
        2.0,
    ),
    shaping(
        "Signal Power Scale",
        "SigScl",
        Param::SignalPowerScale,
        "signal_power_scale",
        "power",
        ParamUnit::Multiplier,
        0.0,
        1.0,
    ),
    length(
        "Signal Power Length",
        "SigLen",
        Param::SignalPowerLength,
        "signal_power_length",
        "power",
    ),
    divisor(
        "Signal Power Signature",
        "SigSig",
        Param::SignalPowerSignature,
        "signal_power_signature",
        "power",
        5.0,
        4.0,
    ),
    divisor(
        "Signal Power Speed",
        "SigSpd",
        Param::SignalPowerSpeed,
        "signal_power_speed",
        "power",
        4.0,
        1.0,
    ),
    fraction(
        "Signal Power Depth",
        "SigDpth",
        Param::SignalPowerDepth,
        "signal_power_depth",
        "power",
        0.4,
    ),
    direction(
        "Signal Power Direction",
        "SigDir",
        Param::SignalPowerDirection,
        "signal_power_direction",
        "power",
    ),
    ParamDescriptor::new("Fade", "Fade", 0.0, 10.0, 2.0)
        .with_id(Param::Fade.id(), "fade")
        .with_step(0.1)
        .with_group("envelope"),
    ParamDescriptor::new("Duck", "Duck", 0.0, 10.0, 0.0)
        .with_id(Param::Duck.id(), "duck")
        .with_step(0.1)
        .with_group("envelope"),
];
