use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::app::ports::DatasetSource;
use crate::error::{PipelineError, Result};
use crate::types::Table;

/// Parse a headed CSV stream into a [`Table`].
///
/// Quoted fields may span lines. Rows shorter or longer than the header are
/// kept as-is; schema conversion pads or truncates them. Invalid UTF-8 is
/// decoded lossily so one bad row never fails the read.
pub fn parse_csv<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| decode_field(h).trim().to_string())
        .collect();
    let mut table = Table::new(headers);

    let mut lossy_rows = 0usize;
    for record in rdr.byte_records() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            lossy_rows += 1;
        }
        table.rows.push(record.iter().map(decode_field).collect());
    }

    if lossy_rows > 0 {
        warn!("{} row(s) contained invalid UTF-8; bytes replaced with U+FFFD", lossy_rows);
    }

    Ok(table)
}

/// Invalid UTF-8 sequences become U+FFFD instead of failing the read
fn decode_field(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Reads a local CSV file, or every `*.csv` file in a local directory
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Data files of a directory dataset, sorted by name. Hidden and
    /// `_`-prefixed files (e.g. `_SUCCESS`) are skipped.
    fn partition_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let is_data = path.is_file()
                && !name.starts_with('_')
                && !name.starts_with('.')
                && path
                    .extension()
                    .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
            if is_data {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_directory(&self) -> Result<Table> {
        let files = Self::partition_files(&self.path)?;
        if files.is_empty() {
            return Err(PipelineError::InputNotFound(format!(
                "no CSV files in directory {}",
                self.path.display()
            )));
        }

        let mut combined: Option<Table> = None;
        for file in &files {
            debug!("Reading partition {}", file.display());
            let part = parse_csv(File::open(file)?)?;
            match combined.as_mut() {
                // Later partitions are read positionally against the first header
                Some(table) => table.rows.extend(part.rows),
                None => combined = Some(part),
            }
        }

        info!("Read {} partition file(s) from {}", files.len(), self.path.display());
        Ok(combined.unwrap_or_default())
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Table> {
        if !self.path.exists() {
            return Err(PipelineError::InputNotFound(self.describe()));
        }
        if self.path.is_dir() {
            self.read_directory()
        } else {
            parse_csv(File::open(&self.path)?)
        }
    }
}
