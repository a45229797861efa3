//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::error::Result;
use crate::pipeline::{ColumnMapping, SchemaProfile};
use crate::report::DEFAULT_BINS;

/// cardash - Filter, summarize and export vehicle listings from the terminal
#[derive(Parser, Debug)]
#[command(name = "cardash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Schema profile naming the price, label, category and year columns
    #[arg(long, value_enum, default_value_t = SchemaProfile::Vehicles)]
    pub profile: SchemaProfile,

    /// JSON file with a custom column mapping (overrides --profile)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Lower bound of the price range (inclusive).
    /// Defaults to 5000 clamped to the data.
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Upper bound of the price range (inclusive).
    /// Defaults to 30000 clamped to the data.
    #[arg(long)]
    pub price_max: Option<f64>,

    /// Lower bound of the year range (inclusive). Defaults to the oldest year.
    #[arg(long)]
    pub year_min: Option<f64>,

    /// Upper bound of the year range (inclusive). Defaults to the newest year.
    #[arg(long)]
    pub year_max: Option<f64>,

    /// Categories to keep (comma-separated), e.g. manufacturers or fuel types.
    /// Defaults to every category.
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Labels to keep (comma-separated), e.g. models.
    /// Narrowed to the labels of the selected categories. Defaults to all of them.
    #[arg(long, value_delimiter = ',')]
    pub label: Vec<String>,

    /// Number of bins for the price histogram
    #[arg(long, default_value_t = DEFAULT_BINS, value_parser = validate_bins)]
    pub bins: usize,

    /// Export the filtered listings as CSV to this file or directory.
    /// A directory receives the profile's fixed file name.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write histogram and scatter series as JSON to this file
    #[arg(long)]
    pub charts: Option<PathBuf>,

    /// Skip interactive prompts and use arguments and defaults only
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dataset statistics and the available filter values
    Inspect {
        /// Input file path (CSV or Parquet)
        input: PathBuf,

        /// Schema profile naming the price, label, category and year columns
        #[arg(long, value_enum, default_value_t = SchemaProfile::Vehicles)]
        profile: SchemaProfile,

        /// JSON file with a custom column mapping (overrides --profile)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Number of rows to use for schema inference.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Get the input path, if one was given.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Column mapping from `--schema` if given, otherwise from `--profile`.
    pub fn mapping(&self) -> Result<ColumnMapping> {
        resolve_mapping(self.profile, self.schema.as_deref())
    }
}

/// Column mapping from a mapping file, falling back to a profile
pub fn resolve_mapping(
    profile: SchemaProfile,
    schema: Option<&std::path::Path>,
) -> Result<ColumnMapping> {
    match schema {
        Some(path) => ColumnMapping::from_json_file(path),
        None => Ok(profile.mapping()),
    }
}

/// Validator for the bins parameter
fn validate_bins(s: &str) -> std::result::Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("bins must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
