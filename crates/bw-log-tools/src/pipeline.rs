//! Single-pass analysis: parse once, fan each record out to both accumulators.

use serde::Serialize;

use crate::aggregate::SummaryAggregator;
use crate::detect::{DetectorConfig, WindowAnomalyDetector};
use crate::error::{LogResult, MalformedRecord};
use crate::parsers;
use crate::types::{Anomaly, Summary};

/// Everything a reporter needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub anomalies: Vec<Anomaly>,
    pub malformed: Vec<MalformedRecord>,
    pub threshold: u64,
    pub window_secs: i64,
}

impl AnalysisReport {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }
}

/// Analyze a batch of raw lines.
///
/// Configuration is validated before the first line is touched. Malformed
/// lines are collected into the report and never abort the run.
pub fn analyze(lines: &[String], config: &DetectorConfig) -> LogResult<AnalysisReport> {
    let mut detector = WindowAnomalyDetector::new(*config)?;
    let mut aggregator = SummaryAggregator::new();
    let mut malformed = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parsers::parse_line(line, i + 1) {
            Ok(record) => {
                aggregator.push(&record);
                detector.observe(&record)?;
            }
            Err(err) => {
                tracing::warn!(line = err.line_number, reason = %err.reason, "skipping malformed record");
                malformed.push(err);
            }
        }
    }

    let summary = aggregator.finish();
    let anomalies = detector.finish();
    tracing::info!(
        total = summary.total_count,
        malformed = malformed.len(),
        anomalies = anomalies.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        summary,
        anomalies,
        malformed,
        threshold: config.threshold,
        window_secs: config.window_secs(),
    })
}
