//! Report persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::types::ReportRow;

/// Errors from the report sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode report: {0}")]
    Encode(String),

    #[error("failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for report sinks.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Persist the rows, returning where they landed.
    async fn write(&self, rows: &[ReportRow]) -> Result<PathBuf, SinkError>;

    /// Where the last-written report lives. Idempotent lookup, used by the
    /// download endpoint.
    fn location(&self) -> PathBuf;
}

/// CSV file sink with a fixed path. Each write replaces the previous file.
pub struct CsvReportSink {
    path: PathBuf,
}

impl CsvReportSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReportSink for CsvReportSink {
    async fn write(&self, rows: &[ReportRow]) -> Result<PathBuf, SinkError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| SinkError::Encode(e.to_string()))?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| SinkError::Encode(e.to_string()))?;

        tokio::fs::write(&self.path, data).await?;
        info!(rows = rows.len(), path = %self.path.display(), "report written");
        Ok(self.path.clone())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(prospect: &str) -> ReportRow {
        ReportRow {
            client_email: "client@example.com".to_string(),
            campaign_id: "c1".to_string(),
            campaign: "Spring".to_string(),
            prospect_email: prospect.to_string(),
            source_page: "https://linkedin.com/in/p".to_string(),
            visited_at: "15-03-2024".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let sink = CsvReportSink::new(&path);

        let written = sink
            .write(&[sample_row("a@x.com"), sample_row("b@x.com")])
            .await
            .unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "client_email,campaign_id,campaign,prospect_email,source_page,visited_at"
        );
        assert_eq!(lines.count(), 2);
        assert!(content.contains("a@x.com"));
        assert!(content.contains("15-03-2024"));
    }

    #[tokio::test]
    async fn test_write_replaces_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let sink = CsvReportSink::new(&path);

        sink.write(&[sample_row("a@x.com"), sample_row("b@x.com")])
            .await
            .unwrap();
        sink.write(&[sample_row("c@x.com")]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("a@x.com"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_location_is_stable() {
        let sink = CsvReportSink::new("/tmp/report.csv");
        assert_eq!(sink.location(), PathBuf::from("/tmp/report.csv"));
        assert_eq!(sink.location(), sink.location());
    }
}
