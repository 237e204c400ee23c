//! Core log analysis types and the LogTool trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::error::LogResult;

/// Severity label subject to burst detection. Matched exactly, case-sensitive.
pub const ERROR_LEVEL: &str = "ERROR";

/// Context key feeding `Summary::unique_user_ids`.
pub const USER_ID_KEY: &str = "user_id";

/// Context key feeding `Summary::unique_order_ids`.
pub const ORDER_ID_KEY: &str = "order_id";

// ── Context Value ─────────────────────────────────────────────

/// A scalar value from a record's `context` object.
///
/// Identifiers are deduplicated by value, so `142` and `"142"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl ContextValue {
    /// Convert a JSON value, rejecting nested objects and arrays.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
            serde_json::Value::String(s) => Some(Self::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::String(_) => 3,
        }
    }

    /// Total order for stable output: null < bool < number < string,
    /// numbers by value, strings lexically.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => compare_numbers(a, b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    // Equal-valued floats with different spellings still need a fixed order.
    x.total_cmp(&y).then_with(|| a.to_string().cmp(&b.to_string()))
}

impl std::fmt::Display for ContextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

// ── Log Record ────────────────────────────────────────────────

/// A validated log record, one per input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Second-resolution UTC timestamp.
    pub timestamp: DateTime<Utc>,
    /// Originating service, treated as an opaque label.
    pub service: String,
    /// Severity label, e.g. "INFO" or "ERROR".
    pub level: String,
    /// Free text, never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Scalar context values keyed by name (`user_id`, `order_id`, ...).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, ContextValue>,
    /// 1-based line number in the source.
    pub line_number: usize,
}

impl LogRecord {
    /// Look up a context value, treating `null` the same as absent.
    pub fn context_value(&self, key: &str) -> Option<&ContextValue> {
        self.context.get(key).filter(|v| !v.is_null())
    }
}

// ── Summary ───────────────────────────────────────────────────

/// Aggregate counts over every successfully parsed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub level_counts: BTreeMap<String, usize>,
    #[serde(serialize_with = "serialize_sorted")]
    pub unique_user_ids: HashSet<ContextValue>,
    #[serde(serialize_with = "serialize_sorted")]
    pub unique_order_ids: HashSet<ContextValue>,
}

impl Summary {
    /// Count for `level`, 0 if it never appeared.
    pub fn level_count(&self, level: &str) -> usize {
        self.level_counts.get(level).copied().unwrap_or(0)
    }
}

/// Identifier values in `ContextValue::total_cmp` order.
pub fn sorted_values(set: &HashSet<ContextValue>) -> Vec<&ContextValue> {
    let mut values: Vec<_> = set.iter().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

fn serialize_sorted<S: Serializer>(
    set: &HashSet<ContextValue>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(sorted_values(set))
}

// ── Anomaly ───────────────────────────────────────────────────

/// A window/service pair whose ERROR count exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub window_start: DateTime<Utc>,
    pub service: String,
    pub error_count: usize,
}

// ── Tool Result ───────────────────────────────────────────────

/// Result of executing a log analysis tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that produced this result.
    pub tool_name: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Structured result data (JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error message if success is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            data: Some(data),
            summary: Some(summary.into()),
            error: None,
        }
    }
}

// ── LogTool Trait ─────────────────────────────────────────────

/// Trait for log analysis tools driven by JSON arguments.
#[async_trait]
pub trait LogTool: Send + Sync {
    /// Tool name (e.g., "log_summary").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments against a log source.
    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn crate::source::LogSource,
    ) -> LogResult<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_value_rejects_nested() {
        assert!(ContextValue::from_json(&json!({"a": 1})).is_none());
        assert!(ContextValue::from_json(&json!([1, 2])).is_none());
        assert_eq!(
            ContextValue::from_json(&json!(142)),
            Some(ContextValue::Number(142.into()))
        );
    }

    #[test]
    fn number_and_string_ids_are_distinct() {
        let mut set = HashSet::new();
        set.insert(ContextValue::Number(142.into()));
        set.insert(ContextValue::String("142".into()));
        set.insert(ContextValue::Number(142.into()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn summary_serializes_sorted_ids() {
        let mut summary = Summary::default();
        summary.unique_user_ids.insert(ContextValue::Number(7.into()));
        summary.unique_user_ids.insert(ContextValue::Number(3.into()));
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["unique_user_ids"], json!([3, 7]));
        assert_eq!(summary.level_count("DEBUG"), 0);
    }

    #[test]
    fn sorted_ids_are_total_and_numeric() {
        // Fresh sets each round so HashSet iteration order varies.
        for _ in 0..50 {
            let mut summary = Summary::default();
            for id in [
                ContextValue::String("142".into()),
                ContextValue::Number(10.into()),
                ContextValue::Number(142.into()),
                ContextValue::Number(9.into()),
            ] {
                summary.unique_user_ids.insert(id);
            }
            let value = serde_json::to_value(&summary).unwrap();
            assert_eq!(value["unique_user_ids"], json!([9, 10, 142, "142"]));
        }
    }

    #[test]
    fn total_cmp_ranks_variants() {
        let mut values = vec![
            ContextValue::String("a".into()),
            ContextValue::Number(serde_json::Number::from_f64(-1.5).unwrap()),
            ContextValue::Bool(true),
            ContextValue::Null,
            ContextValue::Number(u64::MAX.into()),
            ContextValue::Bool(false),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(
            values,
            vec![
                ContextValue::Null,
                ContextValue::Bool(false),
                ContextValue::Bool(true),
                ContextValue::Number(serde_json::Number::from_f64(-1.5).unwrap()),
                ContextValue::Number(u64::MAX.into()),
                ContextValue::String("a".into()),
            ]
        );
    }

    #[test]
    fn anomaly_serializes_rfc3339_window() {
        let anomaly = Anomaly {
            window_start: "2024-08-03T12:00:00Z".parse().unwrap(),
            service: "auth".into(),
            error_count: 11,
        };
        let value = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(value["window_start"], "2024-08-03T12:00:00Z");
        assert_eq!(value["error_count"], 11);
    }
}
