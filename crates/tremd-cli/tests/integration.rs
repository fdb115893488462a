//! Integration tests for tremd-cli.
//!
//! Tests cover the CLI binary invocation and end-to-end file processing.

use std::path::Path;
use std::process::Command;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Helper to get the path to the `tremd` binary built by cargo.
fn tremd_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tremd"))
}

fn write_test_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let s = (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin() * 0.5;
        for ch in 0..channels {
            writer.write_sample(if ch == 0 { s } else { -s }).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_samples(path: &Path) -> (Vec<f32>, hound::WavSpec) {
    let reader = WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader
        .into_samples::<f32>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    (samples, spec)
}

// ---------------------------------------------------------------------------
// CLI binary tests -- general
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = tremd_bin()
        .arg("--help")
        .output()
        .expect("failed to run tremd --help");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("process"));
    assert!(stdout.contains("params"));
    assert!(stdout.contains("generate"));
}

#[test]
fn cli_version_works() {
    let output = tremd_bin()
        .arg("--version")
        .output()
        .expect("failed to run tremd --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tremd"), "version output should contain 'tremd'");
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `tremd params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_table_and_cycles() {
    let output = tremd_bin()
        .args(["params", "--bpm", "120", "--sample-rate", "44100"])
        .output()
        .expect("failed to run tremd params");

    assert!(
        output.status.success(),
        "tremd params failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in ["length", "ring_mix", "signal_power_direction", "fade", "duck"] {
        assert!(stdout.contains(key), "params listing should contain '{key}'");
    }
    assert!(stdout.contains("Forward / Reverse"));
    // 44100 · 4 beats / (2 bps · 4) = 22050
    assert!(stdout.contains("22050"), "got: {stdout}");
    assert!(stdout.contains("22050.0 samples per beat"), "got: {stdout}");
    // 32 beats at 1/1 and speed 1 need 705600 samples
    assert!(stdout.contains("exceed capacity"), "got: {stdout}");
}

#[test]
fn cli_params_fast_tempo_fits_capacity() {
    let output = tremd_bin()
        .args(["params", "--bpm", "600", "--sample-rate", "8000"])
        .output()
        .expect("failed to run tremd params");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("800.0 samples per beat"), "got: {stdout}");
    assert!(!stdout.contains("exceed capacity"), "got: {stdout}");
}

#[test]
fn cli_params_override_changes_cycle() {
    let output = tremd_bin()
        .args([
            "params",
            "--sample-rate",
            "44100",
            "--param",
            "length=8",
            "--param",
            "signature=1",
        ])
        .output()
        .expect("failed to run tremd params");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("176400"), "got: {stdout}");
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `tremd process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_wav(&input_path, 2, 48000, 24000);

    let output = tremd_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--param",
            "length=1",
            "--param",
            "ring_mix=0.5",
            "--param",
            "direction=reverse",
            "--bpm",
            "140",
        ])
        .output()
        .expect("failed to run tremd process");

    assert!(
        output.status.success(),
        "tremd process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (samples, spec) = read_samples(&output_path);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(samples.len(), 2 * 24000);
    assert!(samples.iter().all(|s| s.is_finite()));
}

#[test]
fn cli_process_dry_settings_pass_through() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_wav(&input_path, 1, 8000, 4000);

    let output = tremd_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--param",
            "mix=0",
            "--param",
            "depth=0",
            "--param",
            "fade=0",
            "--param",
            "ring_mix=0",
            "--layout",
            "tremolo",
            "--no-tempo",
        ])
        .output()
        .expect("failed to run tremd process");

    assert!(
        output.status.success(),
        "tremd process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (input, _) = read_samples(&input_path);
    let (processed, _) = read_samples(&output_path);
    assert_eq!(input, processed);
}

#[test]
fn cli_process_silence_threshold_passes_quiet_input() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    // -6 dBFS peak sine, below a 0 dB threshold everywhere
    write_test_wav(&input_path, 1, 8000, 2000);

    let output = tremd_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--silence-threshold",
            "0",
        ])
        .output()
        .expect("failed to run tremd process");

    assert!(output.status.success());
    let (input, _) = read_samples(&input_path);
    let (processed, _) = read_samples(&output_path);
    assert_eq!(input, processed);
}

#[test]
fn cli_process_tail_extends_output() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_wav(&input_path, 1, 8000, 1000);

    let output = tremd_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--tail",
        ])
        .output()
        .expect("failed to run tremd process");

    assert!(
        output.status.success(),
        "tremd process --tail failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let (processed, _) = read_samples(&output_path);
    assert!(processed.len() > 1000);
}

#[test]
fn cli_process_unknown_param_fails() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_wav(&input_path, 1, 8000, 100);

    let output = tremd_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--param",
            "drive=12",
        ])
        .output()
        .expect("failed to run tremd");

    assert!(!output.status.success(), "unknown parameter should fail");
    assert!(!output_path.exists());
}

#[test]
fn cli_process_rejects_bit_depth_before_processing() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_wav(&input_path, 1, 8000, 100);

    let output = tremd_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--bit-depth",
            "12",
        ])
        .output()
        .expect("failed to run tremd");

    assert!(!output.status.success(), "12-bit output should be rejected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bit-depth"), "got: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Reading"), "got: {stdout}");
    assert!(!output_path.exists());
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let output = tremd_bin()
        .args([
            "process",
            "/tmp/nonexistent_tremd_test_file_12345.wav",
            "/tmp/nonexistent_tremd_test_output_12345.wav",
        ])
        .output()
        .expect("failed to run tremd");

    assert!(
        !output.status.success(),
        "process with nonexistent input should fail"
    );
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `tremd generate`
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_kinds() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    for kind in ["sine", "impulse", "dc"] {
        let output_path = dir.path().join(format!("{kind}.wav"));
        let output = tremd_bin()
            .args([
                "generate",
                output_path.to_str().unwrap(),
                "--kind",
                kind,
                "--duration",
                "0.1",
            ])
            .output()
            .expect("failed to run tremd generate");

        assert!(
            output.status.success(),
            "tremd generate {kind} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let (samples, spec) = read_samples(&output_path);
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(samples.len(), 4800);
    }
}
