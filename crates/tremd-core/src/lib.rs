//! tremd Core - primitives for tempo-synced delay modulation
//!
//! This crate holds the host-agnostic building blocks the tremd kernel is
//! made of. Everything here is real-time safe: allocation happens at
//! construction only.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe block-processing trait with a silence hint
//!
//! ## Host Contracts
//!
//! - [`ParamSource`] / [`TempoSource`] / [`Host`] - Pull-based parameter and tempo access
//! - [`HostContext`] - Combine any parameter source with any tempo source
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`], [`ParamId`], [`ParamFlags`], [`ParamUnit`] - `const` parameter tables
//! - [`ParameterInfo`] - Index-based parameter introspection
//!
//! ## Timing & Storage
//!
//! - [`TempoTracker`] - Beats per second with keep-last-good fallback
//! - [`CycleBuffer`] - Fixed-capacity circular sample storage
//!
//! ## Utilities
//!
//! - Math functions: [`flush_denormal`], [`finite_or_zero`], [`rectified_power`], [`half_sine`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tremd-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod cycle_buffer;
pub mod effect;
pub mod host;
pub mod math;
pub mod param_info;
pub mod tempo;

pub use cycle_buffer::CycleBuffer;
pub use effect::Effect;
pub use host::{Host, HostContext, NoParams, ParamSource, TempoSource};
pub use math::{finite_or_zero, flush_denormal, half_sine, rectified_power};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use tempo::{DEFAULT_BPM, TempoTracker};
