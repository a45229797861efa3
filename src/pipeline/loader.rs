//! Dataset loader for CSV and Parquet files

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

use polars::prelude::*;

use super::error::{DashboardError, Result};
use super::schema::ColumnMapping;

/// CSV cells read as missing, in addition to empty fields
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A validated listing table together with the mapping it was validated against.
///
/// Cloning is cheap: polars columns share their buffers.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    mapping: ColumnMapping,
    dropped_rows: usize,
}

impl Dataset {
    /// Validate `frame` against `mapping` and drop rows with nulls in required columns.
    ///
    /// Fails with [`DashboardError::Schema`] naming every missing required column,
    /// or [`DashboardError::NonNumeric`] when the price or year column holds text.
    pub fn from_frame(frame: DataFrame, mapping: ColumnMapping) -> Result<Self> {
        let present: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = mapping
            .required_columns()
            .iter()
            .filter(|col| !present.iter().any(|p| p == *col))
            .map(|col| col.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DashboardError::Schema { missing });
        }

        for name in [mapping.price.as_str(), mapping.year.as_str()] {
            let dtype = frame.column(name)?.dtype();
            if !(dtype.is_integer() || dtype.is_float()) {
                return Err(DashboardError::NonNumeric {
                    column: name.to_string(),
                    dtype: dtype.to_string(),
                });
            }
        }

        let before = frame.height();
        let frame = drop_incomplete_rows(&frame, &mapping.required_columns())?;
        let dropped_rows = before - frame.height();

        if dropped_rows > 0 {
            tracing::info!(
                dropped_rows,
                remaining = frame.height(),
                "dropped rows with missing required values"
            );
        }

        Ok(Self {
            frame,
            mapping,
            dropped_rows,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Rows removed during loading because a required value was missing
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Keep only rows where every column in `required` is non-null and, for float
/// columns, not NaN.
fn drop_incomplete_rows(df: &DataFrame, required: &[&str]) -> Result<DataFrame> {
    let mut mask = BooleanChunked::full("mask".into(), true, df.height());
    for name in required {
        let column = df.column(name)?;
        let present = if column.dtype().is_float() {
            column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.is_some_and(|x| !x.is_nan()))
                .collect::<BooleanChunked>()
        } else {
            column.as_materialized_series().is_not_null()
        };
        mask = &mask & &present;
    }
    Ok(df.filter(&mask)?)
}

/// Read a CSV or Parquet file into a DataFrame without any schema validation.
///
/// # Arguments
/// * `path` - Source file; the format is chosen by extension
/// * `infer_schema_length` - Rows used for CSV type inference (0 = full scan)
pub fn read_frame(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // Surface "not found" and permission problems as IO errors before polars sees the file
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_err = |source: PolarsError| DashboardError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let df = match extension.as_str() {
        "csv" => {
            drop(file);
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            let na_tokens: Vec<PlSmallStr> =
                NA_TOKENS.iter().map(|t| PlSmallStr::from(*t)).collect();
            CsvReadOptions::default()
                .with_has_header(true)
                .with_infer_schema_length(schema_length)
                .with_parse_options(
                    CsvParseOptions::default()
                        .with_null_values(Some(NullValues::AllColumns(na_tokens))),
                )
                .try_into_reader_with_file_path(Some(path.to_path_buf()))
                .map_err(parse_err)?
                .finish()
                .map_err(parse_err)?
        }
        "parquet" => ParquetReader::new(file).finish().map_err(parse_err)?,
        _ => return Err(DashboardError::UnsupportedFormat(extension)),
    };

    Ok(df)
}

/// Load and validate a dataset.
///
/// Reads the source, checks that every required column of `mapping` is present
/// and removes rows with a missing value in any required column. Other columns
/// pass through unchanged and row order is preserved.
pub fn load_dataset(
    path: &Path,
    mapping: &ColumnMapping,
    infer_schema_length: usize,
) -> Result<Dataset> {
    let df = read_frame(path, infer_schema_length)?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read dataset"
    );
    Dataset::from_frame(df, mapping.clone())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    mapping: ColumnMapping,
}

fn dataset_cache() -> &'static RwLock<HashMap<CacheKey, Dataset>> {
    static CACHE: OnceLock<RwLock<HashMap<CacheKey, Dataset>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Load a dataset through the process-wide cache.
///
/// Entries are keyed by the canonical source path and the column mapping. A
/// populated entry is never replaced, and failed loads are not cached.
pub fn load_dataset_cached(
    path: &Path,
    mapping: &ColumnMapping,
    infer_schema_length: usize,
) -> Result<Dataset> {
    let canonical = path.canonicalize().map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let key = CacheKey {
        path: canonical,
        mapping: mapping.clone(),
    };

    if let Some(dataset) = dataset_cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        tracing::debug!(path = %path.display(), "dataset cache hit");
        return Ok(dataset.clone());
    }

    let dataset = load_dataset(path, mapping, infer_schema_length)?;

    let mut cache = dataset_cache()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    Ok(cache.entry(key).or_insert(dataset).clone())
}

/// Shape and estimated memory of a loaded dataset: (rows, columns, MB)
pub fn describe_dataset(dataset: &Dataset) -> (usize, usize, f64) {
    let (rows, cols) = dataset.frame().shape();
    let memory_mb = dataset.frame().estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}
