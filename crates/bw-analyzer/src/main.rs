//! burstwatch analyzer — summarize an NDJSON log file and flag error bursts.
//!
//! Usage: `bw-analyzer <input.ndjson> [config.toml]`

use tracing_subscriber::EnvFilter;

use bw_analyzer::config::AnalyzerConfig;
use bw_analyzer::runner;
use bw_log_tools::FileLogSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bw-analyzer starting");

    // ── Load config ─────────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let Some(input_path) = args.next() else {
        anyhow::bail!("usage: bw-analyzer <input.ndjson> [config.toml]");
    };
    let config = match args.next() {
        Some(path) => AnalyzerConfig::from_file(&path)?,
        None => AnalyzerConfig::default(),
    }
    .with_env_overrides()?;
    tracing::info!(
        threshold = config.threshold,
        window_secs = config.window_secs,
        output = ?config.output,
        "config loaded"
    );

    // ── Analyze and report ──────────────────────────────────────
    let report = runner::run(&input_path, &config, &FileLogSource).await?;
    if report.malformed_count() > 0 {
        tracing::warn!(
            malformed = report.malformed_count(),
            "some input lines were skipped"
        );
    }
    println!("{}", runner::render(&report, &config)?);

    Ok(())
}
