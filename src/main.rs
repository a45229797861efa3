//! cardash: Vehicle Listings Dashboard CLI
//!
//! A command-line dashboard that filters a listings dataset by price, category,
//! label and year, then shows metrics, chart series and exports the result.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cardash::cli::{self, confirm_step, input_range, select_values, Cli, Commands};
use cardash::pipeline::{
    apply, describe_dataset, load_dataset_cached, ColumnMapping, Dataset, FilterDomain,
    NumericRange, Selection,
};
use cardash::report::{
    display_histogram, display_metrics, display_scatter, format_count, scatter_points,
    ChartPayload, CsvDownload, Histogram,
};
use cardash::utils::{
    create_spinner, finish_with_error, finish_with_success, init_logging, print_banner,
    print_completion, print_filters, print_info, print_step_header, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Inspect {
                input,
                profile,
                schema,
                infer_schema_length,
            } => {
                let mapping = cli::resolve_mapping(*profile, schema.as_deref())?;
                cli::inspect::run_inspect(input, &mapping, *infer_schema_length)
            }
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let mapping = cli.mapping()?;
    let interactive = !cli.no_confirm;

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset - schema and IO errors stop the session here
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let dataset = load(input, &mapping, cli.infer_schema_length)?;

    let (rows, cols, memory_mb) = describe_dataset(&dataset);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", format_count(rows));
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    if dataset.dropped_rows() > 0 {
        print_info(&format!(
            "Dropped {} row(s) with missing required values",
            format_count(dataset.dropped_rows())
        ));
    }
    print_step_time(step_start);

    let domain = FilterDomain::from_dataset(&dataset)?;
    let mut selection = initial_selection(&cli, &domain);

    loop {
        if interactive {
            prompt_selection(&mut selection, &domain)?;
        }

        let label_total = domain.label_options(&selection.categories).len();
        print_filters(input, &mapping, &selection, label_total);

        // Step 2: Filter and summarize
        print_step_header(2, "Filter Listings");
        let step_start = Instant::now();
        let dataset = load_dataset_cached(input, &mapping, cli.infer_schema_length)?;
        let spec = selection.to_spec(&dataset);
        let (filtered, metrics) = apply(&dataset, &spec)?;
        print_success(&format!(
            "{} of {} listings match",
            format_count(metrics.count),
            format_count(dataset.height())
        ));
        display_metrics(&metrics, &mapping);
        print_step_time(step_start);

        // Step 3: Charts
        print_step_header(3, "Charts");
        let histogram = Histogram::from_frame(&filtered, &mapping, cli.bins)?;
        display_histogram(&histogram);
        let points = scatter_points(&filtered, &mapping)?;
        display_scatter(&points, &mapping);

        if let Some(charts_path) = &cli.charts {
            let payload = ChartPayload::build(
                &filtered,
                &mapping,
                &metrics,
                &selection,
                &input.display().to_string(),
                cli.bins,
            )?;
            payload.write_json(charts_path)?;
            print_success(&format!("Chart data saved to {}", charts_path.display()));
        }

        // Step 4: Download
        print_step_header(4, "Download Filtered Results");
        let download = CsvDownload::from_frame(&filtered, &mapping)?;
        match export_target(&cli, &download, interactive)? {
            Some(target) => {
                let spinner = create_spinner("Writing CSV file...");
                let path = download.save(&target)?;
                finish_with_success(&spinner, &format!("Saved to {}", path.display()));
            }
            None => print_info("CSV export skipped"),
        }

        if !interactive || !confirm_step("Adjust filters and run again?", false)? {
            break;
        }
    }

    print_completion();

    Ok(())
}

/// Load the dataset behind a spinner, reporting fatal load errors before returning them
fn load(input: &Path, mapping: &ColumnMapping, infer_schema_length: usize) -> Result<Dataset> {
    let spinner = create_spinner("Loading dataset...");
    match load_dataset_cached(input, mapping, infer_schema_length) {
        Ok(dataset) => {
            finish_with_success(&spinner, "Dataset loaded");
            Ok(dataset)
        }
        Err(e) => {
            finish_with_error(&spinner, "Dataset could not be loaded");
            if e.is_fatal_load_error() {
                print_warning("The dashboard cannot be shown for this file");
            }
            Err(e.into())
        }
    }
}

/// Default selection with command-line overrides applied
fn initial_selection(cli: &Cli, domain: &FilterDomain) -> Selection {
    let mut selection = domain.default_selection();

    selection.price = NumericRange::new(
        cli.price_min.unwrap_or(selection.price.low),
        cli.price_max.unwrap_or(selection.price.high),
    );
    selection.year = NumericRange::new(
        cli.year_min.unwrap_or(selection.year.low),
        cli.year_max.unwrap_or(selection.year.high),
    );

    if !cli.category.is_empty() {
        let unknown: Vec<&str> = cli
            .category
            .iter()
            .filter(|c| !domain.categories.contains(*c))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            print_warning(&format!("Unknown categories ignored: {}", unknown.join(", ")));
        }
        selection.set_categories(domain, cli.category.iter().cloned());
    }

    if !cli.label.is_empty() {
        let requested: BTreeSet<&String> = cli.label.iter().collect();
        selection.set_labels(domain, cli.label.iter().cloned());
        if selection.labels.len() < requested.len() {
            print_warning("Labels outside the selected categories were ignored");
        }
    }

    if selection.price.is_empty() || selection.year.is_empty() {
        print_warning("A range filter has its lower bound above its upper bound; no listings will match");
    }

    selection
}

/// Sidebar prompts: categories, derived labels, then both ranges
fn prompt_selection(selection: &mut Selection, domain: &FilterDomain) -> Result<()> {
    let previous_options = domain.label_options(&selection.categories);
    let categories = select_values("Categories", &domain.categories, &selection.categories)?;
    let options = selection.set_categories(domain, categories);

    // Labels that only just became available start checked
    let mut checked = selection.labels.clone();
    checked.extend(
        options
            .iter()
            .filter(|o| previous_options.binary_search(o).is_err())
            .cloned(),
    );

    let labels = select_values("Labels", &options, &checked)?;
    selection.set_labels(domain, labels);

    if let Some(bounds) = domain.price_bounds {
        selection.price = input_range("Price", selection.price, bounds)?;
    }
    if let Some(bounds) = domain.year_bounds {
        selection.year = input_range("Year", selection.year, bounds)?;
    }

    Ok(())
}

/// Where to write the CSV download, if anywhere
fn export_target(cli: &Cli, download: &CsvDownload, interactive: bool) -> Result<Option<PathBuf>> {
    if let Some(output) = &cli.output {
        return Ok(Some(output.clone()));
    }

    if interactive
        && confirm_step(
            &format!("Download CSV as {}?", download.file_name),
            false,
        )?
    {
        return Ok(Some(PathBuf::from(&download.file_name)));
    }

    Ok(None)
}

fn print_step_time(start: Instant) {
    println!(
        "      {}",
        style(format!("⏱ {:.2}s", start.elapsed().as_secs_f64())).dim()
    );
}
