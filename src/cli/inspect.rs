//! Dataset inspection: statistics and filter domains

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;

use crate::pipeline::{describe_dataset, load_dataset, ColumnMapping, FilterDomain};
use crate::report::{format_count, format_price, title_case};
use crate::utils::{create_spinner, finish_with_error, finish_with_success};

/// Load `input` with `mapping` and print its shape and the values each filter offers
pub fn run_inspect(input: &Path, mapping: &ColumnMapping, infer_schema_length: usize) -> Result<()> {
    println!(
        "\n {} Inspecting dataset",
        style("◆").cyan().bold()
    );
    println!("   Input:  {}", style(input.display()).dim());
    println!();

    let spinner = create_spinner("Loading dataset...");
    let dataset = match load_dataset(input, mapping, infer_schema_length) {
        Ok(dataset) => dataset,
        Err(e) => {
            finish_with_error(&spinner, "Dataset could not be loaded");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols, memory_mb) = describe_dataset(&dataset);
    let domain = FilterDomain::from_dataset(&dataset)?;

    println!();
    println!("   {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", format_count(rows));
    println!("      Columns: {}", cols);
    println!(
        "      Dropped rows (missing required values): {}",
        format_count(dataset.dropped_rows())
    );
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Filter").add_attribute(Attribute::Bold),
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Domain").add_attribute(Attribute::Bold),
    ]);

    let price_domain = match domain.price_bounds {
        Some(b) => format!(
            "{} - {}",
            format_price(Some(b.low)),
            format_price(Some(b.high))
        ),
        None => "empty".to_string(),
    };
    let year_domain = match domain.year_bounds {
        Some(b) => format!("{:.0} - {:.0}", b.low, b.high),
        None => "empty".to_string(),
    };

    table.add_row(vec![
        Cell::new(title_case(&mapping.price)),
        Cell::new(&mapping.price),
        Cell::new(price_domain),
    ]);
    table.add_row(vec![
        Cell::new(title_case(&mapping.category)),
        Cell::new(&mapping.category),
        Cell::new(format!("{} distinct values", domain.categories.len())),
    ]);
    table.add_row(vec![
        Cell::new(title_case(&mapping.label)),
        Cell::new(&mapping.label),
        Cell::new(format!("{} distinct values", domain.all_labels().len())),
    ]);
    table.add_row(vec![
        Cell::new(title_case(&mapping.year)),
        Cell::new(&mapping.year),
        Cell::new(year_domain),
    ]);

    println!();
    for line in table.to_string().lines() {
        println!("   {}", line);
    }

    if !domain.categories.is_empty() {
        println!();
        println!(
            "   {} {}:",
            style(title_case(&mapping.category)).yellow(),
            style(format!("({})", domain.categories.len())).dim()
        );
        for category in &domain.categories {
            println!("      {} {}", style("•").dim(), category);
        }
    }

    println!();
    Ok(())
}
