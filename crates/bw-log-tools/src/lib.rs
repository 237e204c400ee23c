//! Log analysis core for burstwatch.
//!
//! Parses newline-delimited JSON log records, aggregates them into a
//! [`Summary`] (totals, per-level counts, distinct user/order ids) and flags
//! per-service error bursts in fixed time windows as [`Anomaly`] values.
//! A `LogSource` abstraction keeps I/O out of the core, and two tools
//! (log_summary, detect_anomalies) expose the analysis behind JSON arguments.

pub mod aggregate;
pub mod detect;
pub mod error;
pub mod mock;
pub mod parsers;
pub mod pipeline;
pub mod source;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use aggregate::{aggregate, SummaryAggregator};
pub use detect::{detect, DetectorConfig, WindowAnomalyDetector};
pub use error::{LogError, LogResult, MalformedRecord};
pub use mock::MockLogSource;
pub use pipeline::{analyze, AnalysisReport};
pub use source::{FileLogSource, LogSource};
pub use types::{Anomaly, ContextValue, LogRecord, LogTool, Summary, ToolResult};
