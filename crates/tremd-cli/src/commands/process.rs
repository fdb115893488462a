//! File-based processing command.

use super::common::{LayoutArg, apply_params, db_to_linear, linear_to_db, parse_key_val, peak, rms};
use crate::wav::{WavSpec, read_wav, write_wav};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tremd_core::{DEFAULT_BPM, Effect, HostContext};
use tremd_kernel::{KernelConfig, ParamBank, TremoloKernel};

/// Longest tail `--tail` appends, in seconds.
const MAX_TAIL_SECS: f32 = 60.0;

type CliKernel = TremoloKernel<HostContext<Arc<ParamBank>, Option<f64>>>;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Kernel parameters (e.g., "length=8", "ring_direction=reverse")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Host tempo in beats per minute
    #[arg(long, default_value_t = DEFAULT_BPM)]
    bpm: f64,

    /// Run without host tempo (the kernel falls back to its default)
    #[arg(long, conflicts_with = "bpm")]
    no_tempo: bool,

    /// Which delay paths to run
    #[arg(long, value_enum, default_value_t = LayoutArg::Full)]
    layout: LayoutArg,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Flag blocks whose peak is below this level (dBFS) as silent and
    /// pass them through untouched
    #[arg(long, allow_negative_numbers = true)]
    silence_threshold: Option<f32>,

    /// Append the feedback tail after the input ends
    #[arg(long)]
    tail: bool,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("--bit-depth must be 16, 24, or 32");
    }

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    let frames = channels.first().map_or(0, Vec::len);

    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        channels.len(),
        frames,
        spec.sample_rate,
        frames as f32 / sample_rate
    );
    tracing::info!(
        channels = channels.len(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "input format"
    );

    let tempo = if args.no_tempo { None } else { Some(args.bpm) };
    let config = KernelConfig::new(sample_rate).with_layout(args.layout.into());
    config.validate()?;
    if let Err(err) = config.check_capacity(tempo.unwrap_or(DEFAULT_BPM)) {
        tracing::warn!(%err, "longest cycles will be clamped");
    }

    let mut bank = ParamBank::new();
    apply_params(&mut bank, &args.param)?;
    let bank = Arc::new(bank);

    let mut kernels = channels
        .iter()
        .map(|_| TremoloKernel::try_new(config, HostContext::new(Arc::clone(&bank), tempo)))
        .collect::<Result<Vec<CliKernel>, _>>()?;

    let threshold = args.silence_threshold.map(db_to_linear);
    let mut output: Vec<Vec<f32>> = channels.iter().map(|c| vec![0.0; c.len()]).collect();

    println!("Processing {:?} layout...", args.layout);
    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut silent_channel_blocks = 0usize;
    for start in (0..frames).step_by(args.block_size) {
        let end = (start + args.block_size).min(frames);
        for ((kernel, input), out) in kernels.iter_mut().zip(&channels).zip(output.iter_mut()) {
            let block = &input[start..end];
            let out = &mut out[start..end];
            let silent = threshold.is_some_and(|level| peak(block) < level);
            if silent {
                out.copy_from_slice(block);
                silent_channel_blocks += 1;
            }
            kernel.process(block, out, silent);
        }
        pb.set_position(end as u64);
    }
    pb.finish_with_message("done");
    if silent_channel_blocks > 0 {
        tracing::info!(silent_channel_blocks, "passed silent channel blocks through");
    }

    if args.tail {
        let tail = render_tail(&mut kernels, &mut output, sample_rate, args.block_size);
        for input in &mut channels {
            input.resize(input.len() + tail, 0.0);
        }
        println!("  Appended {:.2}s tail", tail as f32 / sample_rate);
    }

    let input_all = channels.concat();
    let output_all = output.concat();
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&input_all)),
        linear_to_db(peak(&input_all))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output_all)),
        linear_to_db(peak(&output_all))
    );

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

/// Feeds silence until the longest feedback tail has decayed and appends
/// the result. Returns the tail length in frames.
fn render_tail(
    kernels: &mut [CliKernel],
    output: &mut [Vec<f32>],
    sample_rate: f32,
    block_size: usize,
) -> usize {
    let longest = kernels.iter().map(Effect::tail_samples).max().unwrap_or(0);
    let tail = longest.min((MAX_TAIL_SECS * sample_rate) as usize);
    tracing::debug!(longest, tail, "rendering feedback tail");

    let silence = vec![0.0; block_size];
    for (kernel, out) in kernels.iter_mut().zip(output.iter_mut()) {
        let start = out.len();
        out.resize(start + tail, 0.0);
        for block in out[start..].chunks_mut(block_size) {
            let len = block.len();
            kernel.process(&silence[..len], block, false);
        }
    }
    tail
}
