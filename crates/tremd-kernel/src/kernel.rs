//! The per-channel tremd kernel.
//!
//! [`TremoloKernel`] wires the pieces together:
//!
//! ```text
//! block:  silent? ─yes─▶ return
//!           │
//!           ▼
//!         tempo ◀─ host.tempo_bpm()        (keep last good)
//!         snapshot ◀─ host.param(id)...    (sanitized)
//!         diff vs previous ─▶ retune changed paths (pending cycle lengths)
//!           │
//! sample:   ▼
//!         primary ─┐
//!         ring  ───┼─▶ combine ─▶ out
//!         power ───┘
//! ```
//!
//! One kernel handles one channel. Hosts with several channels run one
//! kernel per channel and share a parameter source between them.

use libm::{ceilf, log10f};
use tremd_core::{Effect, Host, TempoTracker, finite_or_zero};

use crate::combiner::combine;
use crate::config::{ConfigError, KernelConfig};
use crate::cycle::cycle_length;
use crate::params::PathKind;
use crate::path::{DelayPath, PathTuning};
use crate::snapshot::{Snapshot, SnapshotDiff};

/// Feedback below which a tail lasts a single cycle.
const TAIL_FEEDBACK_FLOOR: f32 = 1e-3;

/// Tempo-synced multi-path delay tremolo for one channel.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tremd_core::HostContext;
/// use tremd_kernel::{KernelConfig, Param, ParamBank, TremoloKernel};
///
/// let bank = Arc::new(ParamBank::new());
/// bank.set(Param::Length, 8.0);
///
/// let host = HostContext::new(Arc::clone(&bank), 120.0);
/// let mut kernel = TremoloKernel::new(KernelConfig::new(48000.0), host);
///
/// let input = vec![0.5; 256];
/// let mut output = vec![0.0; 256];
/// kernel.process(&input, &mut output, false);
/// assert!(output.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct TremoloKernel<H> {
    host: H,
    config: KernelConfig,
    primary: DelayPath,
    ring: Option<DelayPath>,
    power: Option<DelayPath>,
    snapshot: Snapshot,
    tempo: TempoTracker,
    tuned: bool,
}

impl<H: Host> TremoloKernel<H> {
    /// Allocates a kernel. Only the paths enabled in `config.layout` get
    /// buffers.
    pub fn new(config: KernelConfig, host: H) -> Self {
        let capacity = config.capacity.max(1);
        let config = KernelConfig { capacity, ..config };
        Self {
            host,
            config,
            primary: DelayPath::new(capacity),
            ring: config.layout.ring.then(|| DelayPath::new(capacity)),
            power: config.layout.power.then(|| DelayPath::new(capacity)),
            snapshot: Snapshot::default(),
            tempo: TempoTracker::new(),
            tuned: false,
        }
    }

    /// Validates `config`, then allocates a kernel.
    pub fn try_new(config: KernelConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, host))
    }

    /// Processes `min(input.len(), output.len())` samples.
    ///
    /// A silent block is a no-op: `output` is left as is and no state
    /// advances.
    pub fn process(&mut self, input: &[f32], output: &mut [f32], silent: bool) {
        if silent {
            return;
        }
        self.begin_block();
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.tick(x);
        }
    }

    /// Processes `buffer` in place. Same contract as [`process`](Self::process).
    pub fn process_inplace(&mut self, buffer: &mut [f32], silent: bool) {
        if silent {
            return;
        }
        self.begin_block();
        for sample in buffer.iter_mut() {
            *sample = self.tick(*sample);
        }
    }

    /// Clears all buffers and heads. Parameters, tempo and pending cycle
    /// lengths survive.
    pub fn reset(&mut self) {
        for path in self.paths_mut() {
            path.reset();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate = self.config.sample_rate, "tremd kernel reset");
    }

    /// Reads tempo and parameters for the coming block and stages new
    /// cycle lengths on the paths whose inputs changed.
    fn begin_block(&mut self) {
        let tempo_changed = self.tempo.update(self.host.tempo_bpm());
        let next = Snapshot::capture(&self.host);
        let diff = if self.tuned {
            self.snapshot.diff(&next)
        } else {
            SnapshotDiff::ALL
        };
        self.snapshot = next;
        self.tuned = true;

        if !tempo_changed && diff.is_empty() {
            return;
        }
        for kind in PathKind::ALL {
            if tempo_changed || diff.path(kind) {
                self.retune(kind);
            }
        }
    }

    fn retune(&mut self, kind: PathKind) {
        let params = *self.snapshot.path(kind);
        let len = cycle_length(
            f64::from(self.config.sample_rate),
            &params,
            self.tempo.beats_per_second(),
            self.config.capacity,
        );
        let tuning = PathTuning::from_params(&params, len);
        #[cfg(feature = "tracing")]
        let bpm = self.tempo.bpm();
        if let Some(path) = self.path_mut(kind) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                path = kind.name(),
                from = path.pending().cycle_len,
                to = len,
                bpm,
                "retuned delay path"
            );
            path.retune(tuning);
        }
    }

    #[inline]
    fn tick(&mut self, input: f32) -> f32 {
        let x = finite_or_zero(input);
        let envelope = self.snapshot.envelope;
        let primary = self.primary.tick(x, &envelope);
        let ring = self.ring.as_mut().map(|path| path.tick(x, &envelope));
        let power = self.power.as_mut().map(|path| path.tick(x, &envelope));
        combine(
            x,
            &self.snapshot.mix,
            self.snapshot.ring.depth,
            &primary,
            ring.as_ref(),
            power.as_ref(),
        )
    }
}

impl<H> TremoloKernel<H> {
    /// Host the kernel pulls parameters and tempo from.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Construction settings.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Parameters captured at the start of the last processed block.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Tempo state.
    pub fn tempo(&self) -> &TempoTracker {
        &self.tempo
    }

    /// Delay path `kind`, if the layout allocated it.
    pub fn path(&self, kind: PathKind) -> Option<&DelayPath> {
        match kind {
            PathKind::Primary => Some(&self.primary),
            PathKind::Ring => self.ring.as_ref(),
            PathKind::Power => self.power.as_ref(),
        }
    }

    fn path_mut(&mut self, kind: PathKind) -> Option<&mut DelayPath> {
        match kind {
            PathKind::Primary => Some(&mut self.primary),
            PathKind::Ring => self.ring.as_mut(),
            PathKind::Power => self.power.as_mut(),
        }
    }

    fn paths(&self) -> impl Iterator<Item = &DelayPath> {
        core::iter::once(&self.primary)
            .chain(self.ring.as_ref())
            .chain(self.power.as_ref())
    }

    fn paths_mut(&mut self) -> impl Iterator<Item = &mut DelayPath> {
        core::iter::once(&mut self.primary)
            .chain(self.ring.as_mut())
            .chain(self.power.as_mut())
    }

    /// Samples until feedback in the longest staged cycle decays by 60 dB.
    pub fn tail_len(&self) -> usize {
        self.paths()
            .map(|path| {
                let tuning = path.pending();
                tuning.cycle_len.saturating_mul(feedback_repeats(tuning.feedback))
            })
            .max()
            .unwrap_or(0)
    }
}

/// Cycles until a feedback loop with gain `feedback` falls 60 dB.
fn feedback_repeats(feedback: f32) -> usize {
    if feedback <= TAIL_FEEDBACK_FLOOR {
        1
    } else {
        ceilf(-3.0 / log10f(feedback)) as usize + 1
    }
}

impl<H: Host> Effect for TremoloKernel<H> {
    fn process_block(&mut self, input: &[f32], output: &mut [f32], silent: bool) {
        self.process(input, output, silent);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32], silent: bool) {
        self.process_inplace(buffer, silent);
    }

    fn reset(&mut self) {
        TremoloKernel::reset(self);
    }

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    fn tail_samples(&self) -> usize {
        self.tail_len()
    }
}
