//! Chart series for the price histogram and the price vs year scatter
//!
//! The series are plain data: a renderer (terminal or web) decides how to draw
//! them. [`ChartPayload`] bundles both with the metrics as JSON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::pipeline::domain::{numeric_values, string_values};
use crate::pipeline::{ColumnMapping, MetricsSummary, Selection};

use super::summary::{format_count, format_price};

/// Number of histogram bins used when none is given
pub const DEFAULT_BINS: usize = 30;

/// One equal-width histogram bucket `[start, end)`; the last bucket is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Price distribution of the filtered listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Price values, one per listing, in row order
    pub values: Vec<f64>,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width bins spanning their min and max.
    ///
    /// Empty input gives no bins; identical values give a single bin.
    pub fn from_values(values: Vec<f64>, bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((min, max)) = finite.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        }) else {
            return Self {
                values,
                bins: Vec::new(),
            };
        };

        if bins == 0 || min == max {
            let bins = vec![HistogramBin {
                start: min,
                end: max,
                count: finite.len(),
            }];
            return Self { values, bins };
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in &finite {
            let index = (((v - min) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + width * i as f64,
                end: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count,
            })
            .collect();

        Self { values, bins }
    }

    /// Histogram of the mapping's price column
    pub fn from_frame(df: &DataFrame, mapping: &ColumnMapping, bins: usize) -> Result<Self> {
        let values: Vec<f64> = numeric_values(df, &mapping.price)?
            .into_iter()
            .flatten()
            .collect();
        Ok(Self::from_values(values, bins))
    }
}

/// Hover payload for a scatter point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub label: String,
    pub price: f64,
    pub year: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One listing in the price vs year scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Year (x axis)
    pub x: f64,
    /// Price (y axis)
    pub y: f64,
    /// Category used as the color dimension
    pub color: String,
    pub tooltip: Tooltip,
}

/// Scatter points for every row with a price and a year
pub fn scatter_points(df: &DataFrame, mapping: &ColumnMapping) -> Result<Vec<ScatterPoint>> {
    let years = numeric_values(df, &mapping.year)?;
    let prices = numeric_values(df, &mapping.price)?;
    let categories = string_values(df, &mapping.category)?;
    let labels = string_values(df, &mapping.label)?;

    let points = years
        .into_iter()
        .zip(prices)
        .zip(categories)
        .zip(labels)
        .filter_map(|(((year, price), category), label)| {
            let (year, price) = (year?, price?);
            let category = category.unwrap_or_default();
            Some(ScatterPoint {
                x: year,
                y: price,
                tooltip: Tooltip {
                    label: label.unwrap_or_default(),
                    price,
                    year,
                    category: mapping.tooltip_category.then(|| category.clone()),
                },
                color: category,
            })
        })
        .collect();

    Ok(points)
}

/// Metadata about the chart payload
#[derive(Debug, Serialize)]
pub struct ChartMetadata {
    /// Timestamp of the render (ISO 8601 format)
    pub timestamp: String,
    pub cardash_version: String,
    pub input_file: String,
    pub columns: ColumnMapping,
    /// Filters that produced the series
    pub filters: Selection,
}

/// Everything a renderer needs to draw the dashboard
#[derive(Debug, Serialize)]
pub struct ChartPayload {
    pub metadata: ChartMetadata,
    pub metrics: MetricsSummary,
    pub histogram: Histogram,
    pub scatter: Vec<ScatterPoint>,
}

impl ChartPayload {
    /// Build the payload for a filtered table
    pub fn build(
        df: &DataFrame,
        mapping: &ColumnMapping,
        metrics: &MetricsSummary,
        selection: &Selection,
        input_file: &str,
        bins: usize,
    ) -> Result<Self> {
        Ok(Self {
            metadata: ChartMetadata {
                timestamp: Utc::now().to_rfc3339(),
                cardash_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                columns: mapping.clone(),
                filters: selection.clone(),
            },
            metrics: metrics.clone(),
            histogram: Histogram::from_frame(df, mapping, bins)?,
            scatter: scatter_points(df, mapping)?,
        })
    }

    /// Write the payload as pretty JSON
    pub fn write_json(&self, output_path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize chart payload to JSON")?;

        std::fs::write(output_path, json).with_context(|| {
            format!("Failed to write chart payload to {}", output_path.display())
        })?;

        Ok(())
    }
}

/// Draw the histogram as horizontal bars
pub fn display_histogram(histogram: &Histogram) {
    println!();
    println!(
        "    {} {}",
        style("📈").cyan(),
        style("PRICE DISTRIBUTION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    if histogram.bins.is_empty() {
        println!("      {}", style("No prices to plot").dim());
        return;
    }

    let bar_width = 30usize;
    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    for bin in &histogram.bins {
        let len = (bin.count * bar_width).div_ceil(max_count);
        println!(
            "      {:>9} - {:<9} {} {}",
            format_price(Some(bin.start)),
            format_price(Some(bin.end)),
            style("█".repeat(len)).blue(),
            style(bin.count).dim()
        );
    }
}

/// Summarize the scatter series per color group
pub fn display_scatter(points: &[ScatterPoint], mapping: &ColumnMapping) {
    println!();
    println!(
        "    {} {}",
        style("🌀").cyan(),
        style("PRICE VS YEAR").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    if points.is_empty() {
        println!("      {}", style("No points to plot").dim());
        return;
    }

    // color -> (points, min year, max year, price sum)
    let mut groups: BTreeMap<&str, (usize, f64, f64, f64)> = BTreeMap::new();
    for p in points {
        let entry = groups
            .entry(p.color.as_str())
            .or_insert((0, f64::INFINITY, f64::NEG_INFINITY, 0.0));
        entry.0 += 1;
        entry.1 = entry.1.min(p.x);
        entry.2 = entry.2.max(p.x);
        entry.3 += p.y;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(super::summary::title_case(&mapping.category)).add_attribute(Attribute::Bold),
        Cell::new("Points").add_attribute(Attribute::Bold),
        Cell::new("Years").add_attribute(Attribute::Bold),
        Cell::new("Avg Price").add_attribute(Attribute::Bold),
    ]);

    for (color, (count, min_year, max_year, price_sum)) in groups {
        table.add_row(vec![
            Cell::new(color),
            Cell::new(format_count(count)),
            Cell::new(format!("{:.0}-{:.0}", min_year, max_year)),
            Cell::new(format_price(Some(price_sum / count as f64))),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
