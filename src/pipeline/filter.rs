//! Range and set-membership filtering over a loaded dataset
//!
//! A [`FilterSpec`] is a conjunction of inclusive numeric ranges and
//! categorical membership tests. [`Selection`] is the widget-level state that
//! produces a spec; it owns the derived-domain rule for labels.

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::Serialize;

use super::domain::{numeric_values, string_values, FilterDomain};
use super::error::Result;
use super::loader::Dataset;

/// Inclusive closed interval `[low, high]`.
///
/// `low > high` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub low: f64,
    pub high: f64,
}

impl NumericRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `value` lies within the range, both ends included
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// True when no value can satisfy the range
    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }
}

/// Set-membership predicate over one column. An empty `allowed` set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalFilter {
    pub column: String,
    pub allowed: BTreeSet<String>,
}

impl CategoricalFilter {
    pub fn new<I, S>(column: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.to_string(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

/// Conjunction of every active predicate
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Range over the mapping's price column
    pub price: NumericRange,
    /// Range over the mapping's year column
    pub year: NumericRange,
    /// Zero or more membership filters
    pub categorical: Vec<CategoricalFilter>,
}

impl FilterSpec {
    /// Spec with only the two ranges
    pub fn ranges(price: NumericRange, year: NumericRange) -> Self {
        Self {
            price,
            year,
            categorical: Vec::new(),
        }
    }

    /// Add a membership filter
    pub fn with_categorical(mut self, filter: CategoricalFilter) -> Self {
        self.categorical.push(filter);
        self
    }
}

/// Widget state: two ranges, the selected categories and the selected labels.
///
/// Labels are a derived domain. Whenever the category selection changes, the
/// label candidates are recomputed from the loaded dataset and any selected
/// label that is no longer a candidate is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub price: NumericRange,
    pub year: NumericRange,
    pub categories: BTreeSet<String>,
    pub labels: BTreeSet<String>,
}

impl Selection {
    /// Replace the category selection and narrow the label selection to the new candidates.
    ///
    /// Returns the recomputed label candidates.
    pub fn set_categories<I, S>(&mut self, domain: &FilterDomain, categories: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        let candidates = domain.label_options(&self.categories);

        let before = self.labels.len();
        self.labels.retain(|label| candidates.binary_search(label).is_ok());
        if self.labels.len() < before {
            tracing::debug!(
                dropped = before - self.labels.len(),
                "dropped labels outside the selected categories"
            );
        }

        candidates
    }

    /// Replace the label selection, ignoring values that are not current candidates
    pub fn set_labels<I, S>(&mut self, domain: &FilterDomain, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = domain.label_options(&self.categories);
        self.labels = labels
            .into_iter()
            .map(Into::into)
            .filter(|label: &String| candidates.binary_search(label).is_ok())
            .collect();
    }

    /// Filter spec for `dataset`'s mapping: both ranges plus category and label membership
    pub fn to_spec(&self, dataset: &Dataset) -> FilterSpec {
        let mapping = dataset.mapping();
        FilterSpec::ranges(self.price, self.year)
            .with_categorical(CategoricalFilter::new(
                &mapping.category,
                self.categories.iter().cloned(),
            ))
            .with_categorical(CategoricalFilter::new(
                &mapping.label,
                self.labels.iter().cloned(),
            ))
    }
}

/// Row mask for `spec` over `dataset`: true where every predicate passes.
pub fn filter_mask(dataset: &Dataset, spec: &FilterSpec) -> Result<BooleanChunked> {
    let df = dataset.frame();
    let mapping = dataset.mapping();
    let mut keep = vec![true; df.height()];

    let ranges = [(&mapping.price, spec.price), (&mapping.year, spec.year)];
    for (column, range) in ranges {
        let values = numeric_values(df, column)?;
        for (flag, value) in keep.iter_mut().zip(values) {
            *flag = *flag && value.is_some_and(|v| range.contains(v));
        }
    }

    for filter in &spec.categorical {
        let values = string_values(df, &filter.column)?;
        for (flag, value) in keep.iter_mut().zip(values) {
            *flag = *flag && value.is_some_and(|v| filter.allowed.contains(&v));
        }
    }

    Ok(keep.into_iter().collect())
}

/// Rows of `dataset` passing every predicate in `spec`, in their original order.
pub fn filter_dataset(dataset: &Dataset, spec: &FilterSpec) -> Result<DataFrame> {
    let mask = filter_mask(dataset, spec)?;
    let filtered = dataset.frame().filter(&mask)?;
    tracing::debug!(
        rows = dataset.height(),
        matched = filtered.height(),
        "applied filters"
    );
    Ok(filtered)
}
