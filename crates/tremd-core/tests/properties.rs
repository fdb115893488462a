//! Property-based tests for tremd-core primitives.
//!
//! Tests parameter sanitizing, tempo fallback, and cycle index arithmetic
//! using proptest for randomized input generation.

use proptest::prelude::*;
use tremd_core::{CycleBuffer, ParamDescriptor, ParamFlags, TempoTracker, rectified_power};

fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1.0e6f32..1.0e6f32,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Sanitized values always lie inside the descriptor range, and stepped
    /// parameters are whole numbers.
    #[test]
    fn sanitize_stays_in_range(
        value in any_f32(),
        min in -10.0f32..10.0f32,
        span in 0.0f32..40.0f32,
        stepped in any::<bool>(),
    ) {
        let max = min + span;
        let flags = if stepped {
            ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED)
        } else {
            ParamFlags::AUTOMATABLE
        };
        let desc = ParamDescriptor::new("P", "P", min, max, min).with_flags(flags);
        let out = desc.sanitize(value);
        prop_assert!(out.is_finite(), "sanitize({}) produced {}", value, out);
        prop_assert!(out >= min && out <= max, "sanitize({}) = {} outside [{}, {}]", value, out, min, max);
        if stepped && min.fract() == 0.0 && max.fract() == 0.0 {
            prop_assert_eq!(out.fract(), 0.0);
        }
    }

    /// Whatever the host reports, beats per second stays finite and positive.
    #[test]
    fn tempo_always_usable(readings in prop::collection::vec(
        prop_oneof![
            Just(None),
            (-1.0e6f64..1.0e6f64).prop_map(Some),
            Just(Some(f64::NAN)),
            Just(Some(f64::INFINITY)),
        ],
        1..32,
    )) {
        let mut tempo = TempoTracker::new();
        for reading in readings {
            let before = tempo.beats_per_second();
            let changed = tempo.update(reading);
            let bps = tempo.beats_per_second();
            prop_assert!(bps.is_finite() && bps > 0.0);
            if !changed {
                prop_assert_eq!(bps, before);
            }
        }
    }

    /// Neighbour and mirror indices never leave the cycle.
    #[test]
    fn cycle_indices_in_range(len in 1usize..4096, offset in 0usize..4096) {
        let index = offset % len;
        prop_assert!(CycleBuffer::prev_index(index, len) < len);
        prop_assert!(CycleBuffer::next_index(index, len) < len);
        let mirrored = CycleBuffer::mirror_index(index, len);
        prop_assert!(mirrored < len);
        prop_assert_eq!(CycleBuffer::mirror_index(mirrored, len), index);
    }

    /// The rectified power curve never goes negative or non-finite for the
    /// ranges a kernel can produce.
    #[test]
    fn rectified_power_bounded(
        x in -25.0f32..25.0f32,
        scale in 0.0f32..5.0f32,
        exponent in 1.0f32..5.0f32,
    ) {
        let y = rectified_power(x, scale, exponent);
        prop_assert!(y.is_finite());
        prop_assert!(y >= 0.0);
    }
}
