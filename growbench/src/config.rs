//! Configuration loading from growbench.toml
//!
//! Growbench configuration can be specified in a `growbench.toml` file in
//! the project root. The configuration is automatically discovered by
//! walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Growbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GrowConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Warm-up duration per entry (e.g., "1s")
    #[serde(default = "default_warmup")]
    pub warmup_time: String,
    /// Target duration for each timed run (e.g., "1s")
    #[serde(default = "default_measurement")]
    pub measurement_time: String,
    /// Number of sizes to measure at
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Smallest size
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Distance between consecutive sizes
    #[serde(default = "default_step_size")]
    pub step_size: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_time: default_warmup(),
            measurement_time: default_measurement(),
            steps: default_steps(),
            min_size: default_min_size(),
            step_size: default_step_size(),
        }
    }
}

fn default_warmup() -> String {
    "1s".to_string()
}
fn default_measurement() -> String {
    "1s".to_string()
}
fn default_steps() -> usize {
    growbench_core::DEFAULT_STEPS
}
fn default_min_size() -> usize {
    growbench_core::DEFAULT_MIN_SIZE
}
fn default_step_size() -> usize {
    growbench_core::DEFAULT_STEP_SIZE
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Path to write the JSON report to
    #[serde(default)]
    pub json: Option<String>,
    /// Path to write the CSV report to
    #[serde(default)]
    pub csv: Option<String>,
    /// Path to write the chart payload to
    #[serde(default)]
    pub chart_data: Option<String>,
    /// Include per-label comparison charts in the chart payload
    #[serde(default)]
    pub compare: bool,
}

impl GrowConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("growbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Growbench Configuration

[runner]
# Warm-up duration per entry
warmup_time = "1s"
# Target duration for each timed run
measurement_time = "1s"
# Number of sizes to measure at
steps = 5
# Smallest size
min_size = 100
# Distance between consecutive sizes
step_size = 100

[output]
# Report paths (uncomment to enable)
# json = "growth.json"
# csv = "growth.csv"
# chart_data = "growth_chart.json"
# Include per-label comparison charts in the chart payload
compare = false
"#
        .to_string()
    }

    /// Parse duration string (e.g., "1s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}
