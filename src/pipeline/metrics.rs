//! Summary metrics over a filtered table

use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;

use super::domain::{numeric_values, string_values};
use super::error::Result;
use super::filter::{filter_dataset, FilterSpec};
use super::loader::Dataset;
use super::schema::ColumnMapping;

/// Count, mean price and most frequent category of a filtered table.
///
/// `mean_price` and `top_category` are `None` when `count` is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub count: usize,
    pub mean_price: Option<f64>,
    pub top_category: Option<String>,
}

impl MetricsSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compute the metrics of `df` using the columns named by `mapping`
pub fn compute_metrics(df: &DataFrame, mapping: &ColumnMapping) -> Result<MetricsSummary> {
    let count = df.height();
    if count == 0 {
        return Ok(MetricsSummary {
            count,
            mean_price: None,
            top_category: None,
        });
    }

    let prices: Vec<f64> = numeric_values(df, &mapping.price)?
        .into_iter()
        .flatten()
        .collect();
    let categories = string_values(df, &mapping.category)?;

    Ok(MetricsSummary {
        count,
        mean_price: mean(&prices),
        top_category: mode(categories.iter().flatten().map(String::as_str)),
    })
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Most frequent value. Ties go to the value encountered first.
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // value -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value.to_string())
}

/// Filter `dataset` with `spec` and summarize the result.
///
/// Pure: the dataset is not modified and identical inputs give identical output.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> Result<(DataFrame, MetricsSummary)> {
    let filtered = filter_dataset(dataset, spec)?;
    let metrics = compute_metrics(&filtered, dataset.mapping())?;
    Ok((filtered, metrics))
}
