//! Column mappings for the supported listing schemas
//!
//! The dashboard runs one pipeline over two deployment schemas. Each schema is a
//! [`ColumnMapping`] naming the price, year, category and label columns; a
//! deployment picks exactly one and never mixes them.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::{DashboardError, Result};

/// Built-in schema profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaProfile {
    /// Used-vehicle adverts: price, model, manufacturer, model_year
    Vehicles,
    /// Car details listings: selling_price, name, year, fuel
    CarDetails,
}

impl SchemaProfile {
    /// Column mapping for this profile
    pub fn mapping(self) -> ColumnMapping {
        match self {
            SchemaProfile::Vehicles => ColumnMapping {
                price: "price".to_string(),
                label: "model".to_string(),
                category: "manufacturer".to_string(),
                year: "model_year".to_string(),
                tooltip_category: false,
                export_file_name: "filtered_vehicles.csv".to_string(),
            },
            SchemaProfile::CarDetails => ColumnMapping {
                price: "selling_price".to_string(),
                label: "name".to_string(),
                category: "fuel".to_string(),
                year: "year".to_string(),
                tooltip_category: true,
                export_file_name: "filtered_cars.csv".to_string(),
            },
        }
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaProfile::Vehicles => write!(f, "vehicles"),
            SchemaProfile::CarDetails => write!(f, "car-details"),
        }
    }
}

/// Names of the columns the pipeline reads
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Numeric price column (range filter, mean, histogram)
    pub price: String,
    /// Label column whose options derive from the category selection
    pub label: String,
    /// Categorical grouping column (set filter, mode, chart color)
    pub category: String,
    /// Numeric year column (range filter, scatter x axis)
    pub year: String,
    /// Whether scatter tooltips also carry the category value
    #[serde(default)]
    pub tooltip_category: bool,
    /// File name offered for the CSV download
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_export_file_name() -> String {
    "filtered_listings.csv".to_string()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        SchemaProfile::Vehicles.mapping()
    }
}

impl ColumnMapping {
    /// Columns that must be present and non-null after loading, in reporting order
    pub fn required_columns(&self) -> [&str; 4] {
        [
            self.price.as_str(),
            self.label.as_str(),
            self.category.as_str(),
            self.year.as_str(),
        ]
    }

    /// Read a custom mapping from a JSON file
    ///
    /// ```json
    /// { "price": "selling_price", "label": "name", "category": "fuel", "year": "year" }
    /// ```
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mapping: ColumnMapping = serde_json::from_str(&text)
            .map_err(|e| DashboardError::Mapping(format!("{}: {}", path.display(), e)))?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Reject mappings with empty or repeated column names
    pub fn validate(&self) -> Result<()> {
        let required = self.required_columns();
        if let Some(empty) = ["price", "label", "category", "year"]
            .iter()
            .zip(required.iter())
            .find(|(_, name)| name.trim().is_empty())
        {
            return Err(DashboardError::Mapping(format!(
                "'{}' column name must not be empty",
                empty.0
            )));
        }

        for (i, name) in required.iter().enumerate() {
            if required[i + 1..].contains(name) {
                return Err(DashboardError::Mapping(format!(
                    "column '{}' is mapped more than once",
                    name
                )));
            }
        }

        Ok(())
    }
}
