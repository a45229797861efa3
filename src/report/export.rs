//! CSV download of the filtered listings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::pipeline::error::DashboardError;
use crate::pipeline::ColumnMapping;

/// Content type offered with the download
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A downloadable CSV file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvDownload {
    /// Serialize `df` with a header row and no index column
    pub fn from_frame(
        df: &DataFrame,
        mapping: &ColumnMapping,
    ) -> std::result::Result<Self, DashboardError> {
        Ok(Self {
            file_name: mapping.export_file_name.clone(),
            content_type: CSV_CONTENT_TYPE,
            bytes: to_csv_bytes(df)?,
        })
    }

    /// Write the download to `target`.
    ///
    /// A directory target receives the file under its fixed file name.
    /// Returns the path written.
    pub fn save(&self, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(&self.file_name)
        } else {
            target.to_path_buf()
        };

        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "exported filtered listings");
        Ok(path)
    }
}

/// Serialize a table to CSV bytes, header included
pub fn to_csv_bytes(df: &DataFrame) -> std::result::Result<Vec<u8>, DashboardError> {
    let mut frame = df.clone();
    let mut buffer: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut frame)
        .map_err(DashboardError::Export)?;
    Ok(buffer)
}
