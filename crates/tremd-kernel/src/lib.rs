//! tremd Kernel - tempo-synced multi-path delay tremolo
//!
//! A per-channel audio kernel that combines three circular delay paths into
//! a tremolo / ring-modulation / power-distortion composite. Every path's
//! cycle is a whole number of beats divided by a signature and speed, so the
//! effect locks to the host tempo.
//!
//! # Paths
//!
//! | Path | Role | Parameters |
//! |------|------|------------|
//! | Primary | Tremolo/delay with dry/wet mix and a power curve | `length`, `signature`, `speed`, `depth`, `direction` |
//! | Ring | Product of the ring output with its mirror | `ring`, `ring_signature`, `ring_speed`, `ring_depth`, `ring_direction` |
//! | Power | Rectified power curve of a third delay | `signal_power_*` |
//!
//! See [`params`] for the full table and [`combiner`] for the output formula.
//!
//! # Example
//!
//! ```rust
//! use tremd_core::HostContext;
//! use tremd_kernel::{KernelConfig, ParamBank, PathLayout, TremoloKernel};
//!
//! let config = KernelConfig::new(44100.0).with_layout(PathLayout::TREMOLO);
//! let mut kernel = TremoloKernel::try_new(config, HostContext::new(ParamBank::new(), 120.0))?;
//!
//! let mut block = [0.25f32; 128];
//! kernel.process_inplace(&mut block, false);
//! # Ok::<(), tremd_kernel::ConfigError>(())
//! ```
//!
//! # Real-time Contract
//!
//! Buffers are allocated in [`TremoloKernel::new`]. `process`,
//! `process_inplace` and `reset` never allocate, lock, or block.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bank;
pub mod combiner;
pub mod config;
pub mod cycle;
pub mod envelope;
pub mod kernel;
pub mod params;
pub mod path;
pub mod snapshot;

pub use bank::ParamBank;
pub use combiner::combine;
pub use config::{ConfigError, DEFAULT_CAPACITY, KernelConfig, PathLayout};
pub use cycle::{clamp_cycle_length, cycle_length, ideal_cycle_length};
pub use envelope::{DUCK_MAX, Envelope, FADE_SCALE};
pub use kernel::TremoloKernel;
pub use params::{Direction, PARAM_COUNT, PARAMS, Param, PathKind, PathParamSet};
pub use path::{DelayPath, MAX_FEEDBACK, MAX_SAMPLE, PathFrame, PathTuning};
pub use snapshot::{MixParams, PathParams, Snapshot, SnapshotDiff};
