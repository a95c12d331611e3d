//! Configuration settings for the life simulator

use crate::driver::MAX_TICK_INTERVAL;
use crate::error::LifeError;
use crate::game_of_life::library;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub seeds: Vec<SeedConfig>,
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: u64,
    pub tick_interval_ms: u64,
    pub stop_when_extinct: bool,
}

/// One pattern placed at an origin. Exactly one of `pattern` and `file` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub origin: [i64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    pub pan_x: i64,
    pub pan_y: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl SeedConfig {
    pub fn named(pattern: &str, x: i64, y: i64) -> Self {
        Self {
            pattern: Some(pattern.to_string()),
            file: None,
            origin: [x, y],
        }
    }

    pub fn from_file(file: PathBuf, x: i64, y: i64) -> Self {
        Self {
            pattern: None,
            file: Some(file),
            origin: [x, y],
        }
    }

    fn validate(&self) -> Result<()> {
        match (&self.pattern, &self.file) {
            (Some(name), None) => {
                if library::lookup(name).is_none() {
                    return Err(LifeError::UnknownPattern(name.clone()).into());
                }
            }
            (None, Some(file)) => {
                if !file.exists() {
                    anyhow::bail!("Pattern file does not exist: {}", file.display());
                }
            }
            _ => anyhow::bail!(
                "Seed at ({}, {}) must name exactly one of 'pattern' or 'file'",
                self.origin[0],
                self.origin[1]
            ),
        }
        Ok(())
    }
}

/// Parses `source@x,y`, origin defaulting to `0,0` when omitted
fn split_seed_arg(s: &str) -> Result<(&str, i64, i64)> {
    let (source, origin) = match s.rsplit_once('@') {
        Some((source, origin)) => (source, Some(origin)),
        None => (s, None),
    };
    if source.is_empty() {
        anyhow::bail!("Seed '{}' has no pattern", s);
    }

    let Some(origin) = origin else {
        return Ok((source, 0, 0));
    };
    let (x, y) = origin
        .split_once(',')
        .with_context(|| format!("Seed origin '{}' must be x,y", origin))?;
    let x = x.trim().parse().with_context(|| format!("Invalid x in '{}'", s))?;
    let y = y.trim().parse().with_context(|| format!("Invalid y in '{}'", s))?;
    Ok((source, x, y))
}

/// A `--seed name@x,y` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSeedArg(pub SeedConfig);

impl FromStr for NamedSeedArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, x, y) = split_seed_arg(s)?;
        Ok(Self(SeedConfig::named(name, x, y)))
    }
}

/// A `--pattern-file path@x,y` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSeedArg(pub SeedConfig);

impl FromStr for FileSeedArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (path, x, y) = split_seed_arg(s)?;
        Ok(Self(SeedConfig::from_file(PathBuf::from(path), x, y)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                generations: 100,
                tick_interval_ms: 500,
                stop_when_extinct: true,
            },
            seeds: vec![
                SeedConfig::named("pentadecathlon", -8, 0),
                SeedConfig::named("pulsar", 8, 0),
                SeedConfig::named("glider", -5, -10),
            ],
            display: DisplayConfig {
                width: 48,
                height: 32,
                pan_x: 0,
                pan_y: 0,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                export_path: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if u128::from(self.simulation.tick_interval_ms) > MAX_TICK_INTERVAL.as_millis() {
            anyhow::bail!(
                "Tick interval must be at most {} ms",
                MAX_TICK_INTERVAL.as_millis()
            );
        }

        if self.display.width == 0 || self.display.height == 0 {
            anyhow::bail!("Viewport dimensions must be positive");
        }

        for seed in &self.seeds {
            seed.validate()?;
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(width) = cli_overrides.width {
            self.display.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.display.height = height;
        }
        if !cli_overrides.seeds.is_empty() {
            self.seeds = cli_overrides.seeds.clone();
        }
        if let Some(ref export_path) = cli_overrides.export_path {
            self.output.export_path = Some(export_path.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    /// Replaces the configured seeds when non-empty
    pub seeds: Vec<SeedConfig>,
    pub export_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}
