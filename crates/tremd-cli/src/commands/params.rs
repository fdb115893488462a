//! Parameter listing command.

use super::common::{apply_params, parse_key_val};
use clap::Args;
use tremd_core::{DEFAULT_BPM, ParameterInfo, TempoTracker};
use tremd_kernel::{
    DEFAULT_CAPACITY, KernelConfig, ParamBank, PathKind, PathParams, cycle_length,
    ideal_cycle_length,
};

#[derive(Args)]
pub struct ParamsArgs {
    /// Tempo for the cycle-length table
    #[arg(long, default_value_t = DEFAULT_BPM)]
    bpm: f64,

    /// Sample rate for the cycle-length table
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Override values before computing cycle lengths (e.g., "length=8")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,
}

pub fn run(args: &ParamsArgs) -> anyhow::Result<()> {
    if !(args.bpm.is_finite() && args.bpm > 0.0) {
        anyhow::bail!("--bpm must be a positive number");
    }
    let mut bank = ParamBank::new();
    apply_params(&mut bank, &args.param)?;

    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:>2}  {:24}  {:22}  {:>12}  {:>10}  {}",
        "Id", "Name", "Key", "Range", "Default", "Steps"
    );
    println!(
        "  {:>2}  {:24}  {:22}  {:>12}  {:>10}  {}",
        "--", "----", "---", "-----", "-------", "-----"
    );

    let mut group = "";
    for index in 0..bank.param_count() {
        let Some(desc) = bank.param_info(index) else {
            continue;
        };
        if desc.group != group {
            group = desc.group;
            println!("  [{group}]");
        }
        let range = format!("{}..{}", desc.min, desc.max);
        let steps = if desc.step_labels.is_empty() {
            String::new()
        } else {
            desc.step_labels.join(" / ")
        };
        println!(
            "  {:>2}  {:24}  {:22}  {:>12}  {:>10}  {}",
            desc.id.0,
            desc.name,
            desc.string_id,
            range,
            desc.format_value(bank.get_param(index)),
            steps
        );
    }

    let sample_rate = f64::from(args.sample_rate);
    let tempo = TempoTracker::with_bpm(args.bpm);
    let bps = tempo.beats_per_second();
    println!();
    println!(
        "Cycle lengths at {} BPM, {} Hz (capacity {} samples)",
        tempo.bpm(),
        args.sample_rate,
        DEFAULT_CAPACITY
    );
    println!("  {:.1} samples per beat", tempo.samples_per_beat(sample_rate));
    if !KernelConfig::new(args.sample_rate as f32).covers(tempo.bpm()) {
        println!("  longest settings exceed capacity at this tempo");
    }
    println!();
    for kind in PathKind::ALL {
        let params = PathParams::capture(kind, &bank);
        let ideal = ideal_cycle_length(
            sample_rate,
            f64::from(params.length),
            bps,
            f64::from(params.signature),
            f64::from(params.speed),
        );
        let len = cycle_length(sample_rate, &params, bps, DEFAULT_CAPACITY);
        let clamped = if ideal.round() > len as f64 {
            "  (clamped)"
        } else {
            ""
        };
        println!(
            "  {:8} {:>8} samples  {:>8.3}s{}",
            kind.name(),
            len,
            len as f64 / sample_rate,
            clamped
        );
    }

    Ok(())
}
