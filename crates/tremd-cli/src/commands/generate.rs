//! Test signal generation command.

use crate::wav::{WavSpec, write_wav};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Signal kinds for auditioning the kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SignalKind {
    /// Sine tone at `--freq`
    #[default]
    Sine,
    /// Single full-scale sample followed by silence
    Impulse,
    /// Constant level, shows the feedback build-up directly
    Dc,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Signal to write
    #[arg(long, value_enum, default_value_t = SignalKind::Sine)]
    kind: SignalKind,

    /// Frequency in Hz (sine only)
    #[arg(long, default_value = "440.0")]
    freq: f32,

    /// Duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,

    /// Number of identical channels
    #[arg(long, default_value = "1")]
    channels: u16,
}

pub fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be a positive number of seconds");
    }
    if args.sample_rate == 0 || args.channels == 0 {
        anyhow::bail!("--sample-rate and --channels must be at least 1");
    }

    let samples = render(args.kind, args.freq, args.duration, args.sample_rate, args.amplitude);
    println!(
        "Generating {:?}: {:.2}s at {} Hz ({} samples)",
        args.kind,
        args.duration,
        args.sample_rate,
        samples.len()
    );

    let spec = WavSpec {
        channels: args.channels,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
    };
    let channels = vec![samples; usize::from(args.channels)];
    write_wav(&args.output, &channels, spec)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}

fn render(
    kind: SignalKind,
    freq: f32,
    duration: f32,
    sample_rate: u32,
    amplitude: f32,
) -> Vec<f32> {
    let len = (duration * sample_rate as f32) as usize;
    let amplitude = amplitude.clamp(0.0, 1.0);
    match kind {
        SignalKind::Sine => (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * freq * t).sin() * amplitude
            })
            .collect(),
        SignalKind::Impulse => {
            let mut samples = vec![0.0; len];
            if let Some(first) = samples.first_mut() {
                *first = amplitude;
            }
            samples
        }
        SignalKind::Dc => vec![amplitude; len],
    }
}
