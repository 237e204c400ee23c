//! Newline-delimited JSON record parser with strict schema validation.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::MalformedRecord;
use crate::types::{ContextValue, LogRecord};

/// Exact timestamp layout accepted on input.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// chrono alone tolerates single-digit fields and signed years; pin the shape first.
static TIMESTAMP_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap());

/// Parse a single JSON line into a `LogRecord`.
pub fn parse_line(line: &str, line_number: usize) -> Result<LogRecord, MalformedRecord> {
    let malformed = |reason: String| MalformedRecord::new(line_number, line, reason);

    let obj: serde_json::Value =
        serde_json::from_str(line).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    let map = obj
        .as_object()
        .ok_or_else(|| malformed("record is not a JSON object".into()))?;

    let raw_timestamp = required_string(map, "timestamp").map_err(&malformed)?;
    let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| {
        malformed(format!(
            "timestamp {raw_timestamp:?} does not match YYYY-MM-DDTHH:MM:SSZ"
        ))
    })?;
    let service = required_string(map, "service").map_err(&malformed)?;
    let level = required_string(map, "level").map_err(&malformed)?;

    let message = match map.get("message") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(malformed("field 'message' is not a string".into())),
    };

    let context = match map.get("context") {
        None | Some(serde_json::Value::Null) => BTreeMap::new(),
        Some(serde_json::Value::Object(ctx)) => {
            let mut out = BTreeMap::new();
            for (key, value) in ctx {
                let scalar = ContextValue::from_json(value).ok_or_else(|| {
                    malformed(format!("context key '{key}' holds a non-scalar value"))
                })?;
                out.insert(key.clone(), scalar);
            }
            out
        }
        Some(_) => return Err(malformed("field 'context' is not a JSON object".into())),
    };

    Ok(LogRecord {
        timestamp,
        service: service.to_string(),
        level: level.to_string(),
        message,
        context,
        line_number,
    })
}

/// Parse a strict `YYYY-MM-DDTHH:MM:SSZ` timestamp.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if !TIMESTAMP_SHAPE.is_match(s) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|ndt| ndt.and_utc())
}

fn required_string<'a>(
    map: &'a serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<&'a str, String> {
    match map.get(key) {
        None | Some(serde_json::Value::Null) => Err(format!("missing required field '{key}'")),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
            Err(format!("required field '{key}' is blank"))
        }
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(_) => Err(format!("required field '{key}' is not a string")),
    }
}
