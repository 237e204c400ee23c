//! One analyzer run: validate config, read the source, analyze, render.

use bw_log_tools::{analyze, AnalysisReport, LogSource};

use crate::config::{AnalyzerConfig, OutputFormat};
use crate::report;

/// Analyze `path` from `source` and return the validated report.
///
/// Invalid detector settings fail before the source is read.
pub async fn run(
    path: &str,
    config: &AnalyzerConfig,
    source: &dyn LogSource,
) -> anyhow::Result<AnalysisReport> {
    let detector = config.detector_config()?;
    let lines = source.read_lines(path).await?;
    tracing::info!(path, lines = lines.len(), "input loaded");
    let report = analyze(&lines, &detector)?;
    Ok(report)
}

/// Render a report in the configured output format.
pub fn render(report: &AnalysisReport, config: &AnalyzerConfig) -> anyhow::Result<String> {
    match config.output {
        OutputFormat::Text => Ok(report::render_text(report, config.max_malformed_reported)),
        OutputFormat::Json => Ok(report::render_json(report)?),
    }
}
