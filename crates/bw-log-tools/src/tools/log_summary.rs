//! log_summary — record totals, per-level counts and distinct user/order ids.

use async_trait::async_trait;
use serde_json::json;

use crate::aggregate::aggregate;
use crate::error::{LogError, LogResult};
use crate::parsers;
use crate::source::LogSource;
use crate::types::{sorted_values, LogTool, ToolResult};

pub struct LogSummary;

#[async_trait]
impl LogTool for LogSummary {
    fn name(&self) -> &str {
        "log_summary"
    }

    fn description(&self) -> &str {
        "Count records by severity level and distinct user/order identifiers"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the newline-delimited JSON log file"
                },
                "include_ids": {
                    "type": "boolean",
                    "description": "Include the distinct identifier values, not just their counts"
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
        let include_ids = args["include_ids"].as_bool().unwrap_or(false);

        let lines = source.read_lines(path).await?;
        let (records, malformed) = parsers::parse_lines(&lines);
        let summary = aggregate(&records);

        let mut data = json!({
            "path": path,
            "total_lines": lines.len(),
            "total_count": summary.total_count,
            "malformed_count": malformed.len(),
            "level_counts": summary.level_counts,
            "unique_user_count": summary.unique_user_ids.len(),
            "unique_order_count": summary.unique_order_ids.len(),
        });
        if include_ids {
            data["unique_user_ids"] = json!(sorted_values(&summary.unique_user_ids));
            data["unique_order_ids"] = json!(sorted_values(&summary.unique_order_ids));
        }

        Ok(ToolResult::success(
            "log_summary",
            data,
            format!(
                "{} records ({} malformed skipped), {} users, {} orders in {path}",
                summary.total_count,
                malformed.len(),
                summary.unique_user_ids.len(),
                summary.unique_order_ids.len()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockLogSource, BURST_SAMPLE_PATH, MIXED_SAMPLE_PATH};

    #[tokio::test]
    async fn summary_burst_sample() {
        let source = MockLogSource::with_burst_sample();
        let result = LogSummary
            .execute(json!({"path": BURST_SAMPLE_PATH}), &source)
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.as_ref().unwrap();
        assert_eq!(data["total_count"], 21);
        assert_eq!(data["level_counts"]["ERROR"], 14);
        assert_eq!(data["level_counts"]["INFO"], 7);
        assert_eq!(data["unique_user_count"], 4);
        assert_eq!(data["unique_order_count"], 6);
        assert!(data.get("unique_user_ids").is_none());
    }

    #[tokio::test]
    async fn summary_reports_malformed() {
        let source = MockLogSource::with_mixed_sample();
        let result = LogSummary
            .execute(json!({"path": MIXED_SAMPLE_PATH, "include_ids": true}), &source)
            .await
            .unwrap();
        let data = result.data.as_ref().unwrap();
        assert_eq!(data["total_count"], 8);
        assert_eq!(data["malformed_count"], 3);
        assert_eq!(data["unique_user_ids"], json!([1, 2]));
        assert_eq!(data["unique_order_ids"], json!([77, 78]));
    }

    #[tokio::test]
    async fn summary_empty_file() {
        let mut source = MockLogSource::new();
        source.add_file("/empty.ndjson", vec![]);
        let result = LogSummary
            .execute(json!({"path": "/empty.ndjson"}), &source)
            .await
            .unwrap();
        let data = result.data.as_ref().unwrap();
        assert_eq!(data["total_count"], 0);
        assert_eq!(data["level_counts"], json!({}));
    }

    #[tokio::test]
    async fn summary_missing_path_argument() {
        let source = MockLogSource::new();
        assert!(LogSummary.execute(json!({}), &source).await.is_err());
    }
}
