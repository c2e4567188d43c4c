use anyhow::Result;
use config::Config as eConfig;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::algorithms::Algorithm;
use crate::error::SgCoreError;
use crate::routines::evaluation::schedule::Budget;
use crate::routines::output::OutputFile;

/// Settings for a comparison sweep
///
/// Deserialized from a TOML file by [read_settings]; the `[sweep]` section
/// is required, everything else has defaults.
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Settings {
    pub sweep: Sweep,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub log: Log,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Sweep {
    /// Problem sizes to run, as (observations, dimension) pairs
    pub sizes: Vec<(usize, usize)>,
    /// Fixed iteration count, mutually exclusive with `epsilon`
    pub horizon: Option<usize>,
    /// Target accuracy, mutually exclusive with `horizon`
    pub epsilon: Option<f64>,
    /// Seed for instance generation
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Algorithms to compare on every size
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Output {
    /// Whether to write the results and settings to disk
    #[serde(default = "default_true")]
    pub write: bool,
    /// Folder all output files are written into
    #[serde(default = "default_output_folder")]
    pub path: String,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            write: default_true(),
            path: default_output_folder(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Log {
    /// Maximum log level, e.g. "debug" or "info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Name of the log file inside the output folder
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Settings {
    /// Resolve the configured accuracy and horizon into a [Budget]
    ///
    /// # Errors
    ///
    /// Returns [SgCoreError::Config] if both or neither are supplied; there
    /// is no silent precedence between them.
    pub fn budget(&self) -> Result<Budget, SgCoreError> {
        match (self.sweep.epsilon, self.sweep.horizon) {
            (Some(_), Some(_)) => Err(SgCoreError::Config(
                "epsilon and horizon are mutually exclusive, supply exactly one".to_string(),
            )),
            (None, None) => Err(SgCoreError::Config(
                "neither epsilon nor horizon is set, supply exactly one".to_string(),
            )),
            (Some(epsilon), None) => Ok(Budget::Accuracy(epsilon)),
            (None, Some(horizon)) => Ok(Budget::Horizon(horizon)),
        }
    }
}

/// Read settings from a TOML file at `path`
///
/// Values can be overridden through environment variables with the `SGCORE_`
/// prefix, e.g. `SGCORE_SWEEP_SEED=1`.
pub fn read_settings(path: String) -> Result<Settings, config::ConfigError> {
    let settings_path = path;

    let parsed = eConfig::builder()
        .add_source(config::File::with_name(&settings_path).format(config::FileFormat::Toml))
        .add_source(config::Environment::with_prefix("SGCORE").separator("_"))
        .build()?;

    let settings: Settings = parsed.try_deserialize()?;

    Ok(settings)
}

/// Write a copy of the effective settings to `settings.json` in the output
/// folder
pub fn write_settings_to_file(settings: &Settings) -> Result<()> {
    let serialized = serde_json::to_string_pretty(settings)?;

    let outputfile = OutputFile::new(&settings.output.path, "settings.json")?;
    outputfile.file().write_all(serialized.as_bytes())?;

    Ok(())
}

// *********************************
// Default values for deserializing
// *********************************
fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "sweep.log".to_string()
}

fn default_output_folder() -> String {
    "output".to_string()
}

fn default_seed() -> u64 {
    347
}

fn default_algorithms() -> Vec<Algorithm> {
    vec![Algorithm::PGD, Algorithm::MDA]
}
