//! Tutor configuration stored under `.tutor/config.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::problem::MAX_ADDENDS;
use crate::core::types::{DEFAULT_COLUMNS, MAX_COLUMNS};

/// Fewest addends in a generated addition. The engine itself accepts two.
pub const GENERATED_MIN_ADDENDS: usize = 3;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".tutor/config.toml";

/// Tutor configuration (TOML).
///
/// Meant to be edited by hand. Missing fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TutorConfig {
    /// Number of columns on the board (five digits plus a final carry).
    pub columns: usize,

    /// Pause between a correct column and the next active column, in milliseconds.
    pub settle_delay_ms: u64,

    /// Pause before a drill moves to its next question, in milliseconds.
    pub training_advance_ms: u64,

    pub generator: GeneratorConfig,
}

/// Bounds for randomly generated board problems.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_addends: usize,
    pub max_addends: usize,
    /// Smallest generated operand.
    pub operand_min: u64,
    /// Largest generated operand.
    pub operand_max: u64,
    /// Smallest generated minuend.
    pub minuend_min: u64,
    /// Minimum gap between minuend and subtrahend.
    pub min_difference: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_addends: 3,
            max_addends: 4,
            operand_min: 10_000,
            operand_max: 99_999,
            minuend_min: 30_000,
            min_difference: 1_000,
        }
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            settle_delay_ms: 500,
            training_advance_ms: 1_000,
            generator: GeneratorConfig::default(),
        }
    }
}

impl TutorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(anyhow!("columns must be between 1 and {}", MAX_COLUMNS));
        }
        let generator = &self.generator;
        if generator.min_addends < GENERATED_MIN_ADDENDS || generator.max_addends > MAX_ADDENDS {
            return Err(anyhow!(
                "generator addends must stay within {}..={}",
                GENERATED_MIN_ADDENDS,
                MAX_ADDENDS
            ));
        }
        if generator.min_addends > generator.max_addends {
            return Err(anyhow!("generator.min_addends must be <= generator.max_addends"));
        }
        if generator.operand_min > generator.operand_max {
            return Err(anyhow!("generator.operand_min must be <= generator.operand_max"));
        }
        if generator.minuend_min < generator.operand_min
            || generator.minuend_min > generator.operand_max
        {
            return Err(anyhow!(
                "generator.minuend_min must lie within operand_min..=operand_max"
            ));
        }
        let smallest_minuend = generator
            .operand_min
            .checked_add(generator.min_difference)
            .ok_or_else(|| anyhow!("generator.operand_min + min_difference overflows"))?;
        if generator.minuend_min < smallest_minuend {
            return Err(anyhow!(
                "generator.minuend_min must be >= operand_min + min_difference"
            ));
        }
        let widest_sum = generator
            .operand_max
            .checked_mul(generator.max_addends as u64)
            .ok_or_else(|| anyhow!("generator.operand_max is too large"))?;
        if widest_sum.to_string().len() > self.columns {
            return Err(anyhow!(
                "{} addends of {} need more than {} columns",
                generator.max_addends,
                generator.operand_max,
                self.columns
            ));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn training_advance(&self) -> Duration {
        Duration::from_millis(self.training_advance_ms)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TutorConfig::default()`.
pub fn load_config(path: &Path) -> Result<TutorConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = TutorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TutorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), columns = cfg.columns, "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &TutorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
