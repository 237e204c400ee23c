//! Log source abstraction — read raw lines from files, mocks, or other backends.

use async_trait::async_trait;

use crate::error::{LogError, LogResult};

/// Supplies the raw, newline-delimited input for one analysis run.
///
/// The core never opens files itself; it only sees the lines handed over here.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read all lines from the given path/identifier.
    async fn read_lines(&self, path: &str) -> LogResult<Vec<String>>;

    /// Check if a source path exists and is readable.
    async fn exists(&self, path: &str) -> bool;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

#[async_trait]
impl LogSource for FileLogSource {
    async fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogError::NotFound(path.to_string())
            } else {
                LogError::Io(format!("{path}: {e}"))
            }
        })?;
        let lines: Vec<String> = content.lines().map(String::from).collect();
        tracing::debug!(path, lines = lines.len(), "read log source");
        Ok(lines)
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
