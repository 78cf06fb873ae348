use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::ports::DatasetSink;
use crate::constants::{OUTPUT_PARTITION_FILE, SUCCESS_MARKER};
use crate::error::{PipelineError, Result};
use crate::types::Table;

/// Writes a single-partition CSV dataset directory:
/// `<path>/part-00000.csv` plus an empty `<path>/_SUCCESS` marker.
///
/// The directory is assembled in a sibling staging directory and moved into
/// place only once complete, replacing whatever was at `path`.
pub struct CsvDirectorySink {
    path: PathBuf,
}

impl CsvDirectorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_dir(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let staging_name = format!(".{}.staging-{}", name, Uuid::new_v4());
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(staging_name),
            _ => PathBuf::from(staging_name),
        }
    }

    fn write_partition(dir: &Path, table: &Table) -> Result<()> {
        let mut writer = csv::Writer::from_path(dir.join(OUTPUT_PARTITION_FILE))?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        fs::File::create(dir.join(SUCCESS_MARKER))?;
        Ok(())
    }

    /// Sibling path the previous output is parked at during the swap
    fn backup_path(&self, staging: &Path) -> PathBuf {
        let mut name = staging.as_os_str().to_os_string();
        name.push(".previous");
        PathBuf::from(name)
    }

    /// Move `staging` into place. Existing output is parked aside first and
    /// only deleted once the new directory is committed; if the commit
    /// fails it is moved back.
    fn replace_target(&self, staging: &Path) -> Result<()> {
        let commit_error = |e: std::io::Error| PipelineError::Commit {
            path: self.path.display().to_string(),
            message: e.to_string(),
        };

        let backup = if self.path.exists() {
            let backup = self.backup_path(staging);
            fs::rename(&self.path, &backup).map_err(commit_error)?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(staging, &self.path) {
            if let Some(backup) = &backup {
                if let Err(restore) = fs::rename(backup, &self.path) {
                    warn!(
                        "Failed to restore previous output from {}: {}",
                        backup.display(),
                        restore
                    );
                }
            }
            return Err(commit_error(e));
        }

        if let Some(backup) = backup {
            let removed = if backup.is_dir() {
                fs::remove_dir_all(&backup)
            } else {
                fs::remove_file(&backup)
            };
            if let Err(e) = removed {
                warn!("Failed to remove previous output {}: {}", backup.display(), e);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DatasetSink for CsvDirectorySink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn write(&self, table: &Table) -> Result<()> {
        let staging = self.staging_dir();
        if let Some(parent) = staging.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::create_dir(&staging)?;

        let result = Self::write_partition(&staging, table).and_then(|_| self.replace_target(&staging));
        if let Err(e) = &result {
            warn!("Output commit failed, discarding staged data: {}", e);
            let _ = fs::remove_dir_all(&staging);
            return result;
        }

        info!("Wrote {} rows to {}", table.len(), self.path.display());
        Ok(())
    }
}
