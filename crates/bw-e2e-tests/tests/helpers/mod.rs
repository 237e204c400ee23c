//! Shared test harness for E2E integration tests.
//!
//! Wraps a `MockLogSource` so each test can stage NDJSON input and drive the
//! analyzer runner and the log tools against the same data.

#![allow(dead_code)]

use bw_analyzer::config::AnalyzerConfig;
use bw_analyzer::runner;
use bw_log_tools::{AnalysisReport, LogSource, MockLogSource};

/// End-to-end harness around an in-memory log source.
pub struct TestHarness {
    pub source: MockLogSource,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            source: MockLogSource::new(),
        }
    }

    /// Harness preloaded with the burst and mixed samples.
    pub fn with_samples() -> Self {
        let mut source = MockLogSource::new();
        source.add_file(
            bw_log_tools::mock::BURST_SAMPLE_PATH,
            MockLogSource::burst_sample_lines(),
        );
        source.add_file(
            bw_log_tools::mock::MIXED_SAMPLE_PATH,
            MockLogSource::mixed_sample_lines(),
        );
        Self { source }
    }

    pub fn stage(&mut self, path: &str, lines: Vec<String>) {
        self.source.add_file(path, lines);
    }

    pub async fn run(&self, path: &str, config: &AnalyzerConfig) -> anyhow::Result<AnalysisReport> {
        runner::run(path, config, &self.source).await
    }

    pub async fn lines(&self, path: &str) -> Vec<String> {
        self.source.read_lines(path).await.unwrap()
    }
}

/// One NDJSON record line. `context` is raw JSON, e.g. `{"user_id":1}`.
pub fn line(ts: &str, service: &str, level: &str, context: &str) -> String {
    format!(
        r#"{{"timestamp":"{ts}","service":"{service}","level":"{level}","message":"m","context":{context}}}"#
    )
}

/// `n` identical record lines.
pub fn lines(n: usize, ts: &str, service: &str, level: &str) -> Vec<String> {
    (0..n).map(|_| line(ts, service, level, "{}")).collect()
}

pub fn config(threshold: u64, window_secs: i64) -> AnalyzerConfig {
    AnalyzerConfig {
        threshold,
        window_secs,
        ..AnalyzerConfig::default()
    }
}
