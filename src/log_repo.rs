// Append-only JSONL benchmark log. One record per line; the file is only ever extended.

use crate::error::CollectorError;
use crate::models::Record;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub struct LogRepo {
    path: PathBuf,
}

impl LogRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append on the blocking pool so the file write never stalls the runtime thread.
    #[instrument(skip(self, record), fields(repo = "log", operation = "append", path = %self.path.display()))]
    pub async fn append(&self, record: &Record) -> Result<(), CollectorError> {
        let path = self.path.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || append_record(&path, &record))
            .await
            .map_err(|e| CollectorError::Io(std::io::Error::other(format!("append task join: {e}"))))??;
        Ok(())
    }
}

/// Serialize `record` as one line and append it to `path`, creating parent
/// directories and the file when missing. The line goes out in a single write on an
/// `O_APPEND` handle so a reader never observes a partial line from this process.
pub fn append_record(path: &Path, record: &Record) -> std::io::Result<()> {
    let mut line = serde_json::to_string(record).map_err(std::io::Error::other)?;
    line.push('\n');

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.sync_data()?;
    Ok(())
}
