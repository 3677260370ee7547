use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Run settings loaded from an optional TOML file.
///
/// ```toml
/// seed = 42
/// samples = 3
/// obstacles = 2
/// continue_on_error = true
/// register_rovers = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    /// Seed for the location generator; entropy is used when absent.
    pub(crate) seed: Option<u64>,
    /// Number of samples to seed; proportional to the grid when absent.
    pub(crate) samples: Option<usize>,
    /// Number of obstacles to seed; proportional to the grid when absent.
    pub(crate) obstacles: Option<usize>,
    /// Keep running remaining rovers after a failure.
    pub(crate) continue_on_error: bool,
    /// Register each finished rover so later rovers collide with it.
    pub(crate) register_rovers: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            samples: None,
            obstacles: None,
            continue_on_error: false,
            register_rovers: true,
        }
    }
}

impl RunConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid run configuration toml")
    }
}
