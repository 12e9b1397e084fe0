//! Runtime configuration.
//!
//! Read from `taskdeck.toml` (or an explicit path), then overridden by
//! `TASKDECK_*` environment variables. Every field has a default, so an
//! absent file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::executor::DEFAULT_LATENCY;
use crate::seed::SeedData;

/// Looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "taskdeck.toml";

pub const ENV_SEED: &str = "TASKDECK_SEED";
pub const ENV_LATENCY_MS: &str = "TASKDECK_LATENCY_MS";
pub const ENV_LOG_FILE: &str = "TASKDECK_LOG_FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed fixture; the built-in sample data when unset.
    pub seed_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub executor: ExecutorConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub latency_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub recent_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { recent_limit: 3 }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`, or from `taskdeck.toml` in `dir` if present, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>, dir: &Path) -> CoreResult<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    CoreError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&text)?
            }
            None => {
                let default_path = dir.join(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    debug!(path = %default_path.display(), "Using config file");
                    Self::from_toml_str(&std::fs::read_to_string(&default_path)?)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `TASKDECK_*` overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> CoreResult<()> {
        if let Some(seed) = lookup(ENV_SEED).filter(|v| !v.is_empty()) {
            self.seed_path = Some(PathBuf::from(seed));
        }
        if let Some(file) = lookup(ENV_LOG_FILE).filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(file));
        }
        if let Some(latency) = lookup(ENV_LATENCY_MS) {
            self.executor.latency_ms = latency.trim().parse().map_err(|_| {
                CoreError::Config(format!("{} must be a number of milliseconds, got '{}'", ENV_LATENCY_MS, latency))
            })?;
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.executor.latency_ms)
    }

    /// Seed data named by the config, or the built-in sample.
    pub fn load_seed(&self) -> CoreResult<SeedData> {
        match &self.seed_path {
            Some(path) => SeedData::from_path(path),
            None => SeedData::builtin(),
        }
    }
}
