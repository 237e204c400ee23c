//! Record parsing for newline-delimited JSON log streams.

pub mod record;

pub use record::{parse_line, parse_timestamp};

use crate::error::MalformedRecord;
use crate::types::LogRecord;

/// Parse all lines, splitting valid records from malformed ones.
///
/// Blank lines are skipped and are not reported as malformed.
pub fn parse_lines(lines: &[String]) -> (Vec<LogRecord>, Vec<MalformedRecord>) {
    let mut records = Vec::with_capacity(lines.len());
    let mut malformed = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, i + 1) {
            Ok(record) => records.push(record),
            Err(err) => malformed.push(err),
        }
    }
    (records, malformed)
}
