//! Error types for loading and filtering listing datasets.
//!
//! Only the loader can fail for data reasons: a missing required column or an
//! unreadable source is fatal and stops the session before any filter runs.
//! Filtering itself is total over validated data; the `Polars` variant only
//! surfaces internal table errors.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading, filtering or exporting a dataset.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// One or more required columns are absent from the source.
    ///
    /// `missing` lists every absent column, in the order the schema requires them.
    #[error("Missing required column(s) in dataset: {}", .missing.join(", "))]
    Schema {
        /// Names of the required columns that were not found
        missing: Vec<String>,
    },

    /// The price or year column is not numeric.
    #[error("Column '{column}' must be numeric, found {dtype}")]
    NonNumeric {
        column: String,
        dtype: String,
    },

    /// The source could not be opened or read.
    #[error("Failed to read dataset: {}", .path.display())]
    Io {
        /// Path of the source file
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was readable but could not be parsed as a table.
    #[error("Failed to parse dataset: {}", .path.display())]
    Parse {
        /// Path of the source file
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// The file extension is not one the loader understands.
    #[error("Unsupported file format: {0}. Supported formats: csv, parquet")]
    UnsupportedFormat(String),

    /// A custom column mapping file was invalid.
    #[error("Invalid column mapping: {0}")]
    Mapping(String),

    /// Serializing the filtered table to CSV failed.
    #[error("Failed to export filtered results: {0}")]
    Export(#[source] PolarsError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl DashboardError {
    /// Whether this error means the dataset can never be shown (schema or source problems).
    pub fn is_fatal_load_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Schema { .. }
                | DashboardError::NonNumeric { .. }
                | DashboardError::Io { .. }
                | DashboardError::Parse { .. }
                | DashboardError::UnsupportedFormat(_)
        )
    }
}

/// Result type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, DashboardError>;
