//! Mock report sink for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::report::{ReportRow, ReportSink, SinkError};

/// Mock implementation of the ReportSink trait, recording every write.
pub struct MockReportSink {
    path: PathBuf,
    written: Arc<RwLock<Vec<Vec<ReportRow>>>>,
}

impl Default for MockReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReportSink {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("/tmp/mock-report.csv"),
            written: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Every batch of rows written, in order.
    pub async fn written(&self) -> Vec<Vec<ReportRow>> {
        self.written.read().await.clone()
    }

    pub async fn write_count(&self) -> usize {
        self.written.read().await.len()
    }
}

#[async_trait]
impl ReportSink for MockReportSink {
    async fn write(&self, rows: &[ReportRow]) -> Result<PathBuf, SinkError> {
        self.written.write().await.push(rows.to_vec());
        Ok(self.path.clone())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
