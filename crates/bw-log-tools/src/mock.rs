//! Mock log source for testing — serves pre-loaded log content.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{LogError, LogResult};
use crate::source::LogSource;

/// Path the burst sample is registered under.
pub const BURST_SAMPLE_PATH: &str = "/var/log/app.ndjson";

/// Path the mixed sample is registered under.
pub const MIXED_SAMPLE_PATH: &str = "/var/log/mixed.ndjson";

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: HashMap<String, Vec<String>>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Add a file with the given lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        self.files.insert(path.into(), lines);
    }

    /// An 11-error auth burst at 12:00 plus background payment traffic.
    ///
    /// 21 records: 14 ERROR, 7 INFO, 4 distinct users, 6 distinct orders.
    pub fn burst_sample_lines() -> Vec<String> {
        let mut lines = Vec::new();
        for i in 0..11 {
            lines.push(format!(
                r#"{{"timestamp":"2024-08-03T12:00:{:02}Z","service":"auth","level":"ERROR","message":"Failed login","context":{{"user_id":{}}}}}"#,
                i * 5,
                100 + i % 4
            ));
        }
        for i in 1..=5 {
            lines.push(format!(
                r#"{{"timestamp":"2024-08-03T12:00:{:02}Z","service":"payment","level":"INFO","message":"Payment accepted","context":{{"order_id":"ORD-{i}"}}}}"#,
                i * 7
            ));
        }
        for i in 0..3 {
            lines.push(format!(
                r#"{{"timestamp":"2024-08-03T12:01:{:02}Z","service":"payment","level":"ERROR","message":"Card declined","context":{{"order_id":"ORD-6"}}}}"#,
                i * 10
            ));
        }
        lines.push(r#"{"timestamp":"2024-08-03T12:01:30Z","service":"auth","level":"INFO","message":"Login ok","context":{"user_id":100}}"#.into());
        lines.push(r#"{"timestamp":"2024-08-03T12:01:45Z","service":"auth","level":"INFO","message":"Logout","context":{"user_id":100}}"#.into());
        lines
    }

    /// A small stream with malformed and blank lines mixed in.
    ///
    /// 8 valid records (6 ERROR, 1 WARN, 1 INFO), 3 malformed lines, 1 blank.
    pub fn mixed_sample_lines() -> Vec<String> {
        vec![
            r#"{"timestamp":"2024-08-03T12:00:05Z","service":"auth","level":"ERROR","message":"Failed login","context":{"user_id":1}}"#.into(),
            r#"{"timestamp":"2024-08-03T12:00:15Z","service":"auth","level":"ERROR","message":"Failed login","context":{"user_id":2}}"#.into(),
            r#"{"timestamp":"bad","service":"auth","level":"INFO"}"#.into(),
            r#"{"timestamp":"2024-08-03T12:00:45Z","service":"auth","level":"ERROR","message":"Failed login","context":{"user_id":1}}"#.into(),
            r#"{"timestamp":"2024-08-03T12:00:50Z","service":"payment","level":"WARN","message":"Slow gateway","context":{"order_id":77}}"#.into(),
            "".into(),
            r#"{"timestamp":"2024-08-03T12:01:00Z","service":"payment","level":"ERROR","message":"Card declined","context":{"order_id":77}}"#.into(),
            "{not json".into(),
            r#"{"timestamp":"2024-08-03T12:01:10Z","service":"payment","level":"ERROR","message":"Card declined","context":{"order_id":78}}"#.into(),
            r#"{"timestamp":"2024-08-03T12:01:59Z","service":"payment","level":"ERROR","message":"Gateway timeout"}"#.into(),
            r#"{"timestamp":"2024-08-03T12:01:30Z","service":"auth","level":"ERROR","context":"{\"user_id\":3}"}"#.into(),
            r#"{"timestamp":"2024-08-03T12:02:00Z","service":"inventory","level":"INFO","message":"Restocked"}"#.into(),
        ]
    }

    pub fn with_burst_sample() -> Self {
        let mut m = Self::new();
        m.add_file(BURST_SAMPLE_PATH, Self::burst_sample_lines());
        m
    }

    pub fn with_mixed_sample() -> Self {
        let mut m = Self::new();
        m.add_file(MIXED_SAMPLE_PATH, Self::mixed_sample_lines());
        m
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LogError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
