//! Motus configuration file handling

use anyhow::{Context, Result};
use motus_animation::PresetConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level Motus configuration (motus.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MotusConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub presets: PresetConfig,
}

/// How the CLI drives the scheduler
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Simulated frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Stop after this much simulated time, for presets that never end
    #[serde(default = "default_max_ms")]
    pub max_ms: u32,
    /// Print every n-th frame
    #[serde(default = "default_trace_every")]
    pub trace_every: u32,
}

fn default_fps() -> u32 {
    60
}

fn default_max_ms() -> u32 {
    3000
}

fn default_trace_every() -> u32 {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_ms: default_max_ms(),
            trace_every: default_trace_every(),
        }
    }
}

impl MotusConfig {
    /// Load configuration from a file or a directory containing motus.toml.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("motus.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            tracing::debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MotusConfig = toml::from_str(content)?;
        config.presets.validate()?;
        if config.simulation.fps == 0 {
            anyhow::bail!("simulation.fps must be greater than zero");
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = MotusConfig::load(dir.path()).unwrap();
        assert_eq!(config, MotusConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nfps = 30\n\n[presets]\npulse_scale = 1.2").unwrap();

        let config = MotusConfig::load(file.path()).unwrap();
        assert_eq!(config.simulation.fps, 30);
        assert_eq!(config.simulation.max_ms, 3000);
        assert_eq!(config.presets.pulse_scale, 1.2);
        assert_eq!(config.presets.flip_duration_ms, 500);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = MotusConfig::default();
        let parsed = MotusConfig::from_toml_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_zero_fps() {
        assert!(MotusConfig::from_toml_str("[simulation]\nfps = 0").is_err());
    }
}
