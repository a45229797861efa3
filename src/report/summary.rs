//! Metric cards for the filtered listings

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{ColumnMapping, MetricsSummary};

/// Placeholder shown for metrics that are undefined on an empty result
pub const UNDEFINED: &str = "n/a";

/// Format an integer with comma thousands separators (`12345` -> `12,345`)
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a listing count for display
pub fn format_count(count: usize) -> String {
    format_thousands(count as u64)
}

/// Format a price rounded to whole dollars (`$12,345`), or [`UNDEFINED`]
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => {
            let rounded = p.round();
            let sign = if rounded < 0.0 { "-" } else { "" };
            format!("{}${}", sign, format_thousands(rounded.abs() as u64))
        }
        _ => UNDEFINED.to_string(),
    }
}

/// Format the top category, or [`UNDEFINED`]
pub fn format_category(category: Option<&str>) -> String {
    category.unwrap_or(UNDEFINED).to_string()
}

/// Metric labels and values, in card order
pub fn metric_rows(metrics: &MetricsSummary, mapping: &ColumnMapping) -> Vec<(String, String)> {
    vec![
        ("Total Listings".to_string(), format_count(metrics.count)),
        ("Average Price".to_string(), format_price(metrics.mean_price)),
        (
            format!("Top {}", title_case(&mapping.category)),
            format_category(metrics.top_category.as_deref()),
        ),
    ]
}

/// Print the three metric cards as a table
pub fn display_metrics(metrics: &MetricsSummary, mapping: &ColumnMapping) {
    println!();
    println!(
        "    {} {}",
        style("📦").cyan(),
        style("KEY METRICS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let rows = metric_rows(metrics, mapping);
    let icons = ["📦", "💵", "🏆"];

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for (icon, (label, value)) in icons.iter().zip(rows) {
        let color = if value == UNDEFINED {
            Color::DarkGrey
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(format!("{} {}", icon, label)),
            Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        ]);
    }

    // Indent the table
    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    if metrics.is_empty() {
        println!();
        println!(
            "    {} {}",
            style("⚠").yellow(),
            style("No listings match the current filters").yellow()
        );
    }
}

/// `model_year` -> `Model Year`
pub fn title_case(column: &str) -> String {
    column
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
