use crate::common::PriceScannerError;
use crate::report::{CycleReport, ReportSink};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overwrites `path` with the latest cycle report as pretty JSON.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn publish(&self, report: &CycleReport) -> Result<(), PriceScannerError> {
        let body = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&self.path, body).await?;
        debug!(path = %self.path.display(), cycle = report.cycle, "report written");
        Ok(())
    }
}
