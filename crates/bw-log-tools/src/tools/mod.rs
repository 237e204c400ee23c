pub mod detect_anomalies;
pub mod log_summary;

pub use detect_anomalies::DetectAnomalies;
pub use log_summary::LogSummary;

use crate::types::LogTool;

/// Every analysis tool this crate ships, in registration order.
pub fn all_tools() -> Vec<Box<dyn LogTool>> {
    vec![Box::new(LogSummary), Box::new(DetectAnomalies)]
}
