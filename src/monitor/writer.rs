use std::path::{Path, PathBuf};

use tokio::fs;

use crate::types::MonitorError;

use super::status::StatusRecord;

/// Writes the status file the bar reads. Every publish goes through a
/// staging file in the same directory followed by a rename, so a reader
/// either sees the old record or the new one, never a torn write.
pub struct StatusWriter {
    path: PathBuf,
}

impl StatusWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `status` as a single JSON line and swap it into place.
    /// If the staging write fails, the previously published file is
    /// left untouched.
    pub async fn publish(&self, status: &StatusRecord) -> Result<(), MonitorError> {
        let mut line = serde_json::to_string(status)?;
        line.push('\n');

        let staging = self.staging_path();
        fs::write(&staging, line).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}
