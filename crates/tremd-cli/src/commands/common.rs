//! Shared CLI helpers used across multiple commands.

use clap::ValueEnum;
use tremd_core::ParameterInfo;
use tremd_kernel::{ParamBank, PathLayout};

/// Path layouts selectable on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Primary path only
    Tremolo,
    /// Primary and ring paths
    Ring,
    /// All three paths
    #[default]
    Full,
}

impl From<LayoutArg> for PathLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Tremolo => PathLayout::TREMOLO,
            LayoutArg::Ring => PathLayout::RING,
            LayoutArg::Full => PathLayout::FULL,
        }
    }
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        ));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Applies `key=value` pairs to `bank`.
///
/// Keys match a parameter's name, short name, or string id. Values are
/// numbers, or a step label such as `reverse` for stepped parameters.
pub fn apply_params(bank: &mut ParamBank, params: &[(String, String)]) -> anyhow::Result<()> {
    for (key, raw) in params {
        let index = bank.find_param_by_name(key).ok_or_else(|| {
            anyhow::anyhow!("Unknown parameter: '{key}'. Use 'tremd params' to list them.")
        })?;
        let Some(desc) = bank.param_info(index) else {
            anyhow::bail!("Unknown parameter: '{key}'");
        };

        let value = match raw.parse::<f32>() {
            Ok(value) => value,
            Err(_) => desc
                .step_labels
                .iter()
                .position(|label| label.eq_ignore_ascii_case(raw))
                .map(|step| desc.min + step as f32)
                .ok_or_else(|| anyhow::anyhow!("Invalid value for {}: '{raw}'", desc.name))?,
        };

        if !value.is_finite() {
            anyhow::bail!("Invalid value for {}: '{raw}'", desc.name);
        }
        if value < desc.min || value > desc.max {
            tracing::warn!(
                param = desc.string_id,
                value,
                min = desc.min,
                max = desc.max,
                "value out of range, clamping"
            );
        }

        bank.set_param(index, value);
        tracing::debug!(param = desc.string_id, value = bank.get_param(index), "set parameter");
    }
    Ok(())
}

/// Root-mean-square level.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Largest absolute sample.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Linear gain to decibels, floored at -120 dB.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}

/// Decibels to linear gain.
pub fn db_to_linear(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}
