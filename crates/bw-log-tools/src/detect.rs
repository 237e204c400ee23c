//! Windowed error-burst detection.
//!
//! Records are bucketed by `(window_start, service, level)`. Once the stream
//! is consumed, every `(window_start, service)` pair whose ERROR bucket holds
//! more than `threshold` records becomes an [`Anomaly`].
//!
//! Output order follows first observation: windows in the order they first
//! appeared, and within a window, services in the order they first appeared
//! (at any level).

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, HashSet};

use crate::error::{LogError, LogResult};
use crate::types::{Anomaly, LogRecord, ERROR_LEVEL};

pub const DEFAULT_THRESHOLD: u64 = 10;
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Largest accepted window. Any parseable timestamp (years 0000 to 9999)
/// floors to a start chrono can still represent.
pub const MAX_WINDOW_SECS: i64 = 400_000_000_000;

// ── Configuration ─────────────────────────────────────────────

/// Detection parameters. Validated before any record is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Exclusive bound: a pair is anomalous only when `error_count > threshold`.
    pub threshold: u64,
    /// Fixed window width, whole seconds.
    pub window: TimeDelta,
}

impl DetectorConfig {
    pub fn new(threshold: u64, window: TimeDelta) -> LogResult<Self> {
        let config = Self { threshold, window };
        config.validate()?;
        Ok(config)
    }

    pub fn from_secs(threshold: u64, window_secs: i64) -> LogResult<Self> {
        let window = TimeDelta::try_seconds(window_secs).ok_or_else(|| {
            LogError::InvalidConfiguration(format!("window of {window_secs}s is out of range"))
        })?;
        Self::new(threshold, window)
    }

    pub fn validate(&self) -> LogResult<()> {
        if self.threshold == 0 {
            return Err(LogError::InvalidConfiguration(
                "threshold must be positive".into(),
            ));
        }
        if self.window <= TimeDelta::zero() {
            return Err(LogError::InvalidConfiguration(format!(
                "window size must be positive, got {}s",
                self.window.num_seconds()
            )));
        }
        if self.window.num_seconds() > MAX_WINDOW_SECS {
            return Err(LogError::InvalidConfiguration(format!(
                "window size must be at most {MAX_WINDOW_SECS}s, got {}s",
                self.window.num_seconds()
            )));
        }
        if self.window.subsec_nanos() != 0 {
            return Err(LogError::InvalidConfiguration(
                "window size must be a whole number of seconds".into(),
            ));
        }
        Ok(())
    }

    pub fn window_secs(&self) -> i64 {
        self.window.num_seconds()
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window: TimeDelta::seconds(DEFAULT_WINDOW_SECS),
        }
    }
}

/// Start of the fixed-size window containing `ts`, aligned to the Unix epoch.
///
/// Sub-second precision is dropped; no rounding.
pub fn window_start(ts: DateTime<Utc>, window_secs: i64) -> LogResult<DateTime<Utc>> {
    let secs = ts.timestamp();
    let start = secs - secs.rem_euclid(window_secs);
    DateTime::from_timestamp(start, 0).ok_or_else(|| LogError::Window(ts.to_rfc3339()))
}

// ── Detector ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BucketKey {
    window_start: DateTime<Utc>,
    service: String,
    level: String,
}

/// Services seen in one window, in first-seen order.
#[derive(Debug)]
struct WindowSlot {
    start: DateTime<Utc>,
    services: Vec<String>,
}

/// Accumulating burst detector for a single run.
#[derive(Debug)]
pub struct WindowAnomalyDetector {
    config: DetectorConfig,
    buckets: HashMap<BucketKey, usize>,
    windows: Vec<WindowSlot>,
    window_index: HashMap<DateTime<Utc>, usize>,
    seen_pairs: HashSet<(DateTime<Utc>, String)>,
}

impl WindowAnomalyDetector {
    /// Fails with `InvalidConfiguration` before any record is seen.
    pub fn new(config: DetectorConfig) -> LogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            buckets: HashMap::new(),
            windows: Vec::new(),
            window_index: HashMap::new(),
            seen_pairs: HashSet::new(),
        })
    }

    /// Bucket one record.
    pub fn observe(&mut self, record: &LogRecord) -> LogResult<()> {
        let start = window_start(record.timestamp, self.config.window_secs())?;

        let slot = match self.window_index.get(&start) {
            Some(&idx) => idx,
            None => {
                self.windows.push(WindowSlot {
                    start,
                    services: Vec::new(),
                });
                self.window_index.insert(start, self.windows.len() - 1);
                self.windows.len() - 1
            }
        };
        if self.seen_pairs.insert((start, record.service.clone())) {
            self.windows[slot].services.push(record.service.clone());
        }

        let key = BucketKey {
            window_start: start,
            service: record.service.clone(),
            level: record.level.clone(),
        };
        *self.buckets.entry(key).or_insert(0) += 1;
        Ok(())
    }

    /// Scan the buckets and emit anomalies in first-observed order.
    pub fn finish(self) -> Vec<Anomaly> {
        let threshold = self.config.threshold;
        let mut anomalies = Vec::new();
        for window in &self.windows {
            for service in &window.services {
                let key = BucketKey {
                    window_start: window.start,
                    service: service.clone(),
                    level: ERROR_LEVEL.to_string(),
                };
                // No ERROR bucket means no comparison at all.
                let Some(&error_count) = self.buckets.get(&key) else {
                    continue;
                };
                if error_count as u64 > threshold {
                    tracing::debug!(
                        window_start = %window.start,
                        service = %service,
                        error_count,
                        threshold,
                        "error burst detected"
                    );
                    anomalies.push(Anomaly {
                        window_start: window.start,
                        service: service.clone(),
                        error_count,
                    });
                }
            }
        }
        anomalies
    }
}

/// Detect error bursts over a full sequence of records.
pub fn detect<'a, I>(records: I, config: &DetectorConfig) -> LogResult<Vec<Anomaly>>
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    let mut detector = WindowAnomalyDetector::new(*config)?;
    for record in records {
        detector.observe(record)?;
    }
    Ok(detector.finish())
}
