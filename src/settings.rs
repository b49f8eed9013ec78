use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "latex_blocks";
const ENV_PREFIX: &str = "LATEX_BLOCKS";

/// Runtime settings: defaults, then `latex_blocks.toml` (optional), then
/// `LATEX_BLOCKS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tutorials_dir: PathBuf,
    pub extension: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tutorials_dir: PathBuf::from("tutorials"),
            extension: "tex".to_string(),
            log: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// `file` is a path with or without extension; a missing file is skipped.
    pub fn load_from(file: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
