//! Analyzer configuration, loadable from TOML with environment overrides.

use serde::Deserialize;

use bw_log_tools::detect::{DEFAULT_THRESHOLD, DEFAULT_WINDOW_SECS};
use bw_log_tools::{DetectorConfig, LogResult};

pub const ENV_THRESHOLD: &str = "BURSTWATCH_THRESHOLD";
pub const ENV_WINDOW_SECS: &str = "BURSTWATCH_WINDOW_SECS";
pub const ENV_OUTPUT: &str = "BURSTWATCH_OUTPUT";

/// How the report is rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown output format: {other}"),
        }
    }
}

/// Top-level configuration for the analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Flag a window when its ERROR count exceeds this.
    #[serde(default = "default_threshold")]
    pub threshold: u64,
    /// Window width in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: i64,
    /// Report format.
    #[serde(default)]
    pub output: OutputFormat,
    /// Cap on malformed-line diagnostics in the text report.
    #[serde(default = "default_max_malformed")]
    pub max_malformed_reported: usize,
}

fn default_threshold() -> u64 {
    DEFAULT_THRESHOLD
}

fn default_window_secs() -> i64 {
    DEFAULT_WINDOW_SECS
}

fn default_max_malformed() -> usize {
    20
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            window_secs: default_window_secs(),
            output: OutputFormat::default(),
            max_malformed_reported: default_max_malformed(),
        }
    }
}

impl AnalyzerConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `BURSTWATCH_*` environment variables on top of this config.
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(v) = lookup(ENV_THRESHOLD) {
            self.threshold = v
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("{ENV_THRESHOLD}={v}: {e}"))?;
        }
        if let Some(v) = lookup(ENV_WINDOW_SECS) {
            self.window_secs = v
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("{ENV_WINDOW_SECS}={v}: {e}"))?;
        }
        if let Some(v) = lookup(ENV_OUTPUT) {
            self.output = v.trim().parse()?;
        }
        Ok(self)
    }

    /// Validated detector parameters.
    pub fn detector_config(&self) -> LogResult<DetectorConfig> {
        DetectorConfig::from_secs(self.threshold, self.window_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn deserialize_empty_config_uses_defaults() {
        let config: AnalyzerConfig = toml::from_str("").unwrap();
        assert_eq!(config.threshold, 10);
        assert_eq!(config.window_secs, 60);
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.max_malformed_reported, 20);
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
threshold = 3
window_secs = 300
output = "json"
max_malformed_reported = 5
"#;
        let config: AnalyzerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.threshold, 3);
        assert_eq!(config.window_secs, 300);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.max_malformed_reported, 5);
        let detector = config.detector_config().unwrap();
        assert_eq!(detector.window_secs(), 300);
    }

    #[test]
    fn negative_threshold_rejected_by_toml() {
        assert!(toml::from_str::<AnalyzerConfig>("threshold = -1").is_err());
    }

    #[test]
    fn zero_values_fail_validation() {
        let config: AnalyzerConfig = toml::from_str("threshold = 0").unwrap();
        assert!(config.detector_config().is_err());
        let config: AnalyzerConfig = toml::from_str("window_secs = 0").unwrap();
        assert!(config.detector_config().is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_THRESHOLD, "25"),
            (ENV_WINDOW_SECS, " 120 "),
            (ENV_OUTPUT, "JSON"),
        ]);
        let config = AnalyzerConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.threshold, 25);
        assert_eq!(config.window_secs, 120);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn bad_override_is_error() {
        let result = AnalyzerConfig::default()
            .with_overrides(|k| (k == ENV_THRESHOLD).then(|| "lots".to_string()));
        assert!(result.is_err());

        let result = AnalyzerConfig::default()
            .with_overrides(|k| (k == ENV_OUTPUT).then(|| "xml".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn no_overrides_is_identity() {
        let config = AnalyzerConfig::default().with_overrides(|_| None).unwrap();
        assert_eq!(config.threshold, 10);
        assert_eq!(config.output, OutputFormat::Text);
    }
}
