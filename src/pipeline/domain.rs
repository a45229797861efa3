//! Filter domains derived from the loaded dataset
//!
//! Widget domains always come from the *loaded* table, never from a filtered
//! one. The only exception is the label domain, which is derived from the
//! current category selection.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;

use super::error::Result;
use super::filter::{NumericRange, Selection};
use super::loader::Dataset;

/// Initial price range offered before the user touches the price filter
pub const DEFAULT_PRICE_RANGE: (f64, f64) = (5000.0, 30000.0);

/// Bounds and candidate values for every filter widget
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDomain {
    /// Whole-number bounds of the price column, `None` for an empty dataset
    pub price_bounds: Option<NumericRange>,
    /// Whole-number bounds of the year column, `None` for an empty dataset
    pub year_bounds: Option<NumericRange>,
    /// Sorted distinct category values
    pub categories: Vec<String>,
    labels_by_category: BTreeMap<String, BTreeSet<String>>,
}

impl FilterDomain {
    /// Build the domain from a loaded dataset
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let df = dataset.frame();
        let mapping = dataset.mapping();

        let price_bounds = numeric_bounds(df, &mapping.price)?;
        let year_bounds = numeric_bounds(df, &mapping.year)?;

        let categories = string_values(df, &mapping.category)?;
        let labels = string_values(df, &mapping.label)?;

        let mut labels_by_category: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (category, label) in categories.iter().zip(labels.iter()) {
            if let (Some(category), Some(label)) = (category, label) {
                labels_by_category
                    .entry(category.clone())
                    .or_default()
                    .insert(label.clone());
            }
        }

        let categories: Vec<String> = labels_by_category.keys().cloned().collect();

        tracing::debug!(
            categories = categories.len(),
            ?price_bounds,
            ?year_bounds,
            "built filter domain"
        );

        Ok(Self {
            price_bounds,
            year_bounds,
            categories,
            labels_by_category,
        })
    }

    /// Sorted distinct labels observed together with any of `selected` categories.
    ///
    /// Unknown categories contribute nothing; an empty selection yields no options.
    pub fn label_options(&self, selected: &BTreeSet<String>) -> Vec<String> {
        selected
            .iter()
            .filter_map(|category| self.labels_by_category.get(category))
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Every distinct label in the dataset
    pub fn all_labels(&self) -> Vec<String> {
        self.label_options(&self.categories.iter().cloned().collect())
    }

    /// Default price range: [`DEFAULT_PRICE_RANGE`] clamped to the price bounds.
    ///
    /// When the default lies entirely outside the data the full bounds are used.
    pub fn default_price_range(&self) -> NumericRange {
        let (low, high) = DEFAULT_PRICE_RANGE;
        match self.price_bounds {
            Some(bounds) => {
                let clamped = NumericRange::new(low.max(bounds.low), high.min(bounds.high));
                if clamped.is_empty() {
                    bounds
                } else {
                    clamped
                }
            }
            None => NumericRange::new(low, high),
        }
    }

    /// Full year bounds, or an empty range when there is no data
    pub fn default_year_range(&self) -> NumericRange {
        self.year_bounds.unwrap_or(NumericRange::new(0.0, -1.0))
    }

    /// Selection with default ranges and every category and label selected
    pub fn default_selection(&self) -> Selection {
        let categories: BTreeSet<String> = self.categories.iter().cloned().collect();
        let labels: BTreeSet<String> = self.label_options(&categories).into_iter().collect();
        Selection {
            price: self.default_price_range(),
            year: self.default_year_range(),
            categories,
            labels,
        }
    }
}

/// Whole-number (floored) min and max of a numeric column, ignoring nulls and NaN.
fn numeric_bounds(df: &DataFrame, column: &str) -> Result<Option<NumericRange>> {
    let values = numeric_values(df, column)?;
    let bounds = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    Ok(bounds.map(|(lo, hi)| NumericRange::new(lo.floor(), hi.floor())))
}

/// Column values as `f64`, one entry per row
pub(crate) fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let cast = df.column(column)?.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Column values as strings, one entry per row
pub(crate) fn string_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let cast = df.column(column)?.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
