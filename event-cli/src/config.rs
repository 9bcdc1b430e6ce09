//! Application configuration loading and parsing

use anyhow::{Context, Result};
use event_analyzer::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of particle blocks per CSV row
pub const DEFAULT_MAX_PARTICLES: usize = 50;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub input: InputConfig,
    /// The analysis itself: categories, observables, signal search
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// JSON-lines event file
    pub events: PathBuf,
    /// Stop after this many events (useful for testing)
    #[serde(default)]
    pub max_events: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// CSV row file; no CSV is written when absent
    #[serde(default)]
    pub csv: Option<PathBuf>,

    /// Particle blocks per CSV row (zero-padded / truncated to this count)
    #[serde(default = "default_max_particles")]
    pub max_particles: usize,

    /// Observable feeding the first CSV column; defaults to the first
    /// configured observable
    #[serde(default)]
    pub observable: Option<String>,

    /// Category whose leading particle PID fills the second CSV column;
    /// defaults to "initial"
    #[serde(default)]
    pub seed_category: Option<String>,

    /// Category feeding the particle blocks; defaults to the signal-search
    /// result when a search is configured, else the first category
    #[serde(default)]
    pub particles_from: Option<String>,

    /// Plain-text run summary file; summary goes to stdout when absent
    #[serde(default)]
    pub summary: Option<PathBuf>,
}

fn default_max_particles() -> usize {
    DEFAULT_MAX_PARTICLES
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv: None,
            max_particles: DEFAULT_MAX_PARTICLES,
            observable: None,
            seed_category: None,
            particles_from: None,
            summary: None,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
