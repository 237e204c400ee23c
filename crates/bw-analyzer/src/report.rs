//! Report rendering: plain text for terminals, JSON for machines.

use bw_log_tools::parsers::record::TIMESTAMP_FORMAT;
use bw_log_tools::AnalysisReport;

/// Render the report as plain text.
///
/// At most `max_malformed` malformed-line diagnostics are listed; the rest are
/// summarized as a count.
pub fn render_text(report: &AnalysisReport, max_malformed: usize) -> String {
    let summary = &report.summary;
    let mut lines = vec![
        "Log summary".to_string(),
        format!("  total records:     {}", summary.total_count),
        format!("  malformed skipped: {}", report.malformed_count()),
        "  records by level:".to_string(),
    ];

    let width = summary.level_counts.keys().map(|l| l.len()).max().unwrap_or(0);
    if summary.level_counts.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (level, count) in &summary.level_counts {
        lines.push(format!("    {level:<width$}  {count}"));
    }
    lines.push(format!("  unique user ids:   {}", summary.unique_user_ids.len()));
    lines.push(format!("  unique order ids:  {}", summary.unique_order_ids.len()));

    lines.push(String::new());
    lines.push(format!(
        "Error bursts (> {} ERROR records per {}s window)",
        report.threshold, report.window_secs
    ));
    if report.anomalies.is_empty() {
        lines.push("  none".to_string());
    }
    for anomaly in &report.anomalies {
        lines.push(format!(
            "  {}  {}  {} errors",
            anomaly.window_start.format(TIMESTAMP_FORMAT),
            anomaly.service,
            anomaly.error_count
        ));
    }

    if !report.malformed.is_empty() {
        lines.push(String::new());
        lines.push(format!("Malformed lines ({})", report.malformed_count()));
        for bad in report.malformed.iter().take(max_malformed) {
            lines.push(format!("  line {}: {}", bad.line_number, bad.reason));
        }
        let hidden = report.malformed_count().saturating_sub(max_malformed);
        if hidden > 0 {
            lines.push(format!("  ... and {hidden} more"));
        }
    }

    lines.join("\n")
}

/// Render the full report as pretty-printed JSON.
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
