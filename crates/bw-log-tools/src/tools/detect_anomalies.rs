//! detect_anomalies — flag per-service error bursts in fixed time windows.

use async_trait::async_trait;
use serde_json::json;

use crate::detect::{DetectorConfig, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SECS};
use crate::error::{LogError, LogResult};
use crate::pipeline;
use crate::source::LogSource;
use crate::types::{LogTool, ToolResult};

pub struct DetectAnomalies;

impl DetectAnomalies {
    fn config_from_args(args: &serde_json::Value) -> LogResult<DetectorConfig> {
        let threshold = match &args["threshold"] {
            serde_json::Value::Null => DEFAULT_THRESHOLD,
            v => v.as_u64().ok_or_else(|| {
                LogError::InvalidConfiguration(format!("threshold must be a positive integer, got {v}"))
            })?,
        };
        let window_secs = match &args["window_secs"] {
            serde_json::Value::Null => DEFAULT_WINDOW_SECS,
            v => v.as_i64().ok_or_else(|| {
                LogError::InvalidConfiguration(format!("window_secs must be an integer, got {v}"))
            })?,
        };
        DetectorConfig::from_secs(threshold, window_secs)
    }
}

#[async_trait]
impl LogTool for DetectAnomalies {
    fn name(&self) -> &str {
        "detect_anomalies"
    }

    fn description(&self) -> &str {
        "Find time windows where a service logged more ERROR records than the threshold"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the newline-delimited JSON log file"
                },
                "threshold": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Flag a window when its ERROR count exceeds this (default: 10)"
                },
                "window_secs": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Window width in seconds (default: 60)"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn LogSource,
    ) -> LogResult<ToolResult> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| LogError::Other("missing 'path' argument".into()))?;
        let config = Self::config_from_args(&args)?;

        let lines = source.read_lines(path).await?;
        let report = pipeline::analyze(&lines, &config)?;

        let count = report.anomalies.len();
        let data = json!({
            "path": path,
            "threshold": report.threshold,
            "window_secs": report.window_secs,
            "total_count": report.summary.total_count,
            "malformed_count": report.malformed_count(),
            "anomaly_count": count,
            "anomalies": report.anomalies,
        });

        Ok(ToolResult::success(
            "detect_anomalies",
            data,
            format!(
                "Found {count} error bursts (>{} errors per {}s window) in {path}",
                report.threshold, report.window_secs
            ),
        ))
    }
}
